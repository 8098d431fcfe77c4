use super::BreakpointError;
use std::fmt;
use std::ops;

//===========================================================================//

/// The kinds of memory access that can trigger a breakpoint.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AccessKind {
    /// The processor fetched an instruction from the address.
    Exec,
    /// The processor read data from the address.
    Read,
    /// The processor wrote data to the address.
    Write,
}

impl AccessKind {
    /// Returns the breakpoint type flag that corresponds to this kind of
    /// access.
    pub fn flag(self) -> BreakpointTypeFlags {
        match self {
            AccessKind::Exec => BreakpointTypeFlags::EXECUTE,
            AccessKind::Read => BreakpointTypeFlags::READ,
            AccessKind::Write => BreakpointTypeFlags::WRITE,
        }
    }
}

//===========================================================================//

/// A set of access kinds that a breakpoint triggers on, stored as the bitmask
/// used by exported breakpoint records.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct BreakpointTypeFlags(u8);

impl BreakpointTypeFlags {
    /// The empty set.
    pub const NONE: BreakpointTypeFlags = BreakpointTypeFlags(0);

    /// Break when an instruction is executed.
    pub const EXECUTE: BreakpointTypeFlags = BreakpointTypeFlags(1);

    /// Break when data is read.
    pub const READ: BreakpointTypeFlags = BreakpointTypeFlags(2);

    /// Break when data is written.
    pub const WRITE: BreakpointTypeFlags = BreakpointTypeFlags(4);

    const ALL_BITS: u8 = 0x7;

    /// Returns the raw bitmask.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Converts a raw bitmask into a set of flags, failing if any undefined
    /// bits are set.
    pub fn from_bits(
        bits: u8,
    ) -> Result<BreakpointTypeFlags, BreakpointError> {
        if bits & !BreakpointTypeFlags::ALL_BITS != 0 {
            Err(BreakpointError::InvalidTypeFlags(bits))
        } else {
            Ok(BreakpointTypeFlags(bits))
        }
    }

    /// Returns true if every flag in `other` is also set in `self`.
    pub fn contains(self, other: BreakpointTypeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for BreakpointTypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::<&str>::new();
        if self.contains(BreakpointTypeFlags::EXECUTE) {
            names.push("EXECUTE");
        }
        if self.contains(BreakpointTypeFlags::READ) {
            names.push("READ");
        }
        if self.contains(BreakpointTypeFlags::WRITE) {
            names.push("WRITE");
        }
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join(" | "))
        }
    }
}

impl ops::BitOr for BreakpointTypeFlags {
    type Output = BreakpointTypeFlags;

    fn bitor(self, rhs: BreakpointTypeFlags) -> BreakpointTypeFlags {
        BreakpointTypeFlags(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for BreakpointTypeFlags {
    fn bitor_assign(&mut self, rhs: BreakpointTypeFlags) {
        *self = *self | rhs;
    }
}

//===========================================================================//


//===========================================================================//
