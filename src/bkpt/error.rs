use std::io;

//===========================================================================//

/// An error encountered while encoding or decoding a breakpoint.
#[derive(Debug, thiserror::Error)]
pub enum BreakpointError {
    /// The condition expression doesn't fit in an export record.
    #[error("condition too long: {len} bytes (the limit is {max})")]
    ConditionTooLong {
        /// The length of the encoded condition, in bytes.
        len: usize,
        /// The maximum number of condition bytes an export record can hold.
        max: usize,
    },
    /// The condition expression contains a NUL character, which would
    /// terminate it early once exported.
    #[error("condition contains a NUL character")]
    ConditionContainsNul,
    /// An export record's condition buffer isn't valid UTF-8.
    #[error("condition is not valid UTF-8")]
    InvalidConditionEncoding,
    /// An address is too large to be represented in an export record.
    #[error("address out of range for export: {0:#x}")]
    AddressOutOfRange(u32),
    /// An address range's end comes before its start.
    #[error("address range ends before it starts: {start:#x} - {end:#x}")]
    InvalidAddressRange {
        /// The first address of the range.
        start: u32,
        /// The last address of the range.
        end: u32,
    },
    /// An export record contained a negative address other than the -1
    /// sentinel.
    #[error("invalid address in export record: {0}")]
    InvalidAddress(i32),
    /// An export record used a memory type tag that doesn't exist.
    #[error("unknown memory type tag: {0}")]
    UnknownMemoryType(u8),
    /// An export record used a CPU type tag that doesn't exist.
    #[error("unknown CPU type tag: {0}")]
    UnknownCpuType(u8),
    /// An export record's breakpoint type had unknown bits set.
    #[error("invalid breakpoint type flags: {0:#04x}")]
    InvalidTypeFlags(u8),
    /// An export record's boolean field was neither 0 nor 1.
    #[error("invalid boolean value: {0}")]
    InvalidBool(u8),
    /// An I/O error occurred while reading or writing export records.
    #[error("failed to transfer breakpoint records: {0}")]
    Io(#[from] io::Error),
}

//===========================================================================//
