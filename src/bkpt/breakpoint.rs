use super::{BreakpointError, BreakpointTypeFlags, ExportRecord};
use crate::debug::{AddressTranslator, CodeLabel, LabelResolver};
use crate::mem::{AddressInfo, CpuType, MemoryType};
use std::fmt;

//===========================================================================//

/// Returns true if breakpoints on the given memory type are CPU breakpoints,
/// that is, if execute breakpoints and relative address translation apply to
/// them.  This is true for every memory type except registers and PPU memory.
pub fn is_cpu_breakpoint(memory_type: MemoryType) -> bool {
    memory_type.is_cpu_addressable()
}

const UNSET_FLAG: char = '\u{2012}';

//===========================================================================//

/// Determines how a breakpoint's start and end addresses are interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AddressType {
    /// The breakpoint applies to every address in its memory type, and its
    /// start and end addresses are ignored.
    AnyAddress,
    /// The breakpoint applies only to its start address.
    #[default]
    SingleAddress,
    /// The breakpoint applies to every address from its start address to its
    /// end address, inclusive.  The start must not come after the end; such
    /// a range matches nothing and is refused on export and decode.
    AddressRange,
}

//===========================================================================//

/// The configuration of a single debugger breakpoint.
///
/// Fields are public and are meant to be edited in place; every derived
/// value (display strings, export records) is recomputed on demand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Breakpoint {
    /// The memory type that the addresses refer to.
    pub memory_type: MemoryType,
    /// The processor that the breakpoint is scoped to.
    pub cpu_type: CpuType,
    /// How `start_address` and `end_address` are interpreted.
    pub address_type: AddressType,
    /// The first (or only) address covered by the breakpoint.
    pub start_address: u32,
    /// The last address covered by the breakpoint, for address ranges.
    pub end_address: u32,
    /// Trigger on reads.
    pub break_on_read: bool,
    /// Trigger on writes.
    pub break_on_write: bool,
    /// Trigger on instruction fetches.  Ignored for non-CPU memory types.
    pub break_on_exec: bool,
    /// Whether a hit pauses emulation.
    pub enabled: bool,
    /// Whether a hit is recorded in the event viewer.
    pub mark_event: bool,
    /// An expression that the debugging engine evaluates on each hit; the
    /// breakpoint only triggers if it is true.  Empty means "always".
    pub condition: String,
}

impl Breakpoint {
    /// Returns a new enabled breakpoint on address zero of the given memory
    /// type, with no trigger flags set.
    pub fn new(cpu_type: CpuType, memory_type: MemoryType) -> Breakpoint {
        Breakpoint {
            memory_type,
            cpu_type,
            address_type: AddressType::SingleAddress,
            start_address: 0,
            end_address: 0,
            break_on_read: false,
            break_on_write: false,
            break_on_exec: false,
            enabled: true,
            mark_event: false,
            condition: String::new(),
        }
    }

    /// Returns true if this breakpoint's memory type is CPU-addressable.
    pub fn is_cpu_breakpoint(&self) -> bool {
        is_cpu_breakpoint(self.memory_type)
    }

    /// Returns true if this breakpoint's addresses are offsets into a
    /// physical memory chip rather than addresses on a CPU's bus.
    pub fn is_absolute_address(&self) -> bool {
        !self.memory_type.is_relative_memory()
    }

    /// Returns the set of access kinds that this breakpoint triggers on.
    /// The execute flag is only included for CPU breakpoints.
    pub fn type_flags(&self) -> BreakpointTypeFlags {
        let mut flags = BreakpointTypeFlags::NONE;
        if self.break_on_read {
            flags |= BreakpointTypeFlags::READ;
        }
        if self.break_on_write {
            flags |= BreakpointTypeFlags::WRITE;
        }
        if self.break_on_exec && self.is_cpu_breakpoint() {
            flags |= BreakpointTypeFlags::EXECUTE;
        }
        flags
    }

    /// Returns true if an access to `address` within `memory_type`, made by
    /// `cpu_type` (if known), falls within this breakpoint.
    ///
    /// Breakpoints with [`AddressType::AnyAddress`] never match here; they
    /// have to be looked up by memory type alone (see
    /// [`BreakpointList::any_address_matches`]).
    ///
    /// [`BreakpointList::any_address_matches`]:
    ///     super::BreakpointList::any_address_matches
    pub fn matches(
        &self,
        address: u32,
        memory_type: MemoryType,
        cpu_type: Option<CpuType>,
    ) -> bool {
        if cpu_type.is_some_and(|cpu| cpu != self.cpu_type) {
            return false;
        }
        if is_cpu_breakpoint(memory_type) != self.is_cpu_breakpoint() {
            return false;
        }
        match self.address_type {
            AddressType::AnyAddress => false,
            AddressType::SingleAddress => {
                address == self.start_address
                    && memory_type == self.memory_type
            }
            AddressType::AddressRange => {
                (self.start_address..=self.end_address).contains(&address)
                    && memory_type == self.memory_type
            }
        }
    }

    /// Returns the start address as seen by this breakpoint's CPU.  Absolute
    /// addresses of CPU breakpoints are translated; anything else is
    /// returned as-is.  Returns -1 if the address isn't currently mapped.
    pub fn relative_address(&self, translator: &dyn AddressTranslator) -> i32 {
        self.relative(self.start_address, translator)
    }

    /// Like [`Breakpoint::relative_address`], but for the end address.
    /// Returns -1 unless this breakpoint covers an address range.
    pub fn relative_address_end(
        &self,
        translator: &dyn AddressTranslator,
    ) -> i32 {
        if self.address_type == AddressType::AddressRange {
            self.relative(self.end_address, translator)
        } else {
            -1
        }
    }

    fn relative(
        &self,
        address: u32,
        translator: &dyn AddressTranslator,
    ) -> i32 {
        if self.is_cpu_breakpoint() && self.is_absolute_address() {
            let Ok(address) = i32::try_from(address) else {
                return -1;
            };
            let absolute = AddressInfo::new(address, self.memory_type);
            translator.relative_address(absolute, self.cpu_type).address
        } else {
            address as i32
        }
    }

    /// Encodes this breakpoint into the record layout expected by the
    /// native debugging engine, using `id` as its identifier.
    ///
    /// Fails if the condition doesn't fit in the record, if an address
    /// can't be represented as a non-negative `i32`, or if an address range
    /// ends before it starts.
    pub fn to_export_record(
        &self,
        id: i32,
    ) -> Result<ExportRecord, BreakpointError> {
        let (start_address, end_address) = match self.address_type {
            AddressType::AnyAddress => (-1, -1),
            AddressType::SingleAddress => {
                (export_address(self.start_address)?, -1)
            }
            AddressType::AddressRange => {
                check_range(self.start_address, self.end_address)?;
                (
                    export_address(self.start_address)?,
                    export_address(self.end_address)?,
                )
            }
        };
        Ok(ExportRecord {
            id,
            cpu_type: self.cpu_type,
            memory_type: self.memory_type,
            type_flags: self.type_flags(),
            mark_event: self.mark_event,
            enabled: self.enabled,
            start_address,
            end_address,
            condition: ExportRecord::encode_condition(&self.condition)?,
        })
    }

    /// Reconstructs a breakpoint from an export record.  Line breaks that
    /// were collapsed during export are not restored.
    pub fn from_export_record(
        record: &ExportRecord,
    ) -> Result<Breakpoint, BreakpointError> {
        let (address_type, start_address, end_address) =
            match (record.start_address, record.end_address) {
                (-1, _) => (AddressType::AnyAddress, 0, 0),
                (start, -1) => {
                    let start = import_address(start)?;
                    (AddressType::SingleAddress, start, start)
                }
                (start, end) => {
                    let start = import_address(start)?;
                    let end = import_address(end)?;
                    check_range(start, end)?;
                    (AddressType::AddressRange, start, end)
                }
            };
        let flags = record.type_flags;
        Ok(Breakpoint {
            memory_type: record.memory_type,
            cpu_type: record.cpu_type,
            address_type,
            start_address,
            end_address,
            break_on_read: flags.contains(BreakpointTypeFlags::READ),
            break_on_write: flags.contains(BreakpointTypeFlags::WRITE),
            break_on_exec: flags.contains(BreakpointTypeFlags::EXECUTE),
            enabled: record.enabled,
            mark_event: record.mark_event,
            condition: record.condition_str()?.to_string(),
        })
    }

    /// Returns a short description of the memory type and trigger flags,
    /// e.g. `"PRG:RW‒"`.  The execute column only appears for CPU
    /// breakpoints.
    pub fn describe_type(&self) -> String {
        let mut text = format!("{}:", self.memory_type.short_name());
        text.push(if self.break_on_read { 'R' } else { UNSET_FLAG });
        text.push(if self.break_on_write { 'W' } else { UNSET_FLAG });
        if self.is_cpu_breakpoint() {
            text.push(if self.break_on_exec { 'X' } else { UNSET_FLAG });
        }
        text
    }

    /// Returns the covered address(es) formatted in hex, e.g. `"$0080A0"`.
    pub fn describe_address(&self) -> String {
        let width = self.memory_type.hex_digits();
        match self.address_type {
            AddressType::AnyAddress => "<any>".to_string(),
            AddressType::SingleAddress => {
                format!("${:0width$X}", self.start_address)
            }
            AddressType::AddressRange => format!(
                "${:0width$X} - ${:0width$X}",
                self.start_address, self.end_address
            ),
        }
    }

    /// Like [`Breakpoint::describe_address`], but followed by the label at
    /// the start address in brackets, if there is one.
    pub fn describe_address_with_label(
        &self,
        labels: &dyn LabelResolver,
        translator: &dyn AddressTranslator,
    ) -> String {
        let mut text = self.describe_address();
        if self.address_type != AddressType::AnyAddress {
            if let Some(label) = self.address_label(labels, translator) {
                if !label.label.trim().is_empty() {
                    text.push_str(&format!(" [{}]", label.label));
                }
            }
        }
        text
    }

    /// Returns the label defined at this breakpoint's start address, if
    /// any.  Only CPU breakpoints have labels; relative addresses are
    /// converted to absolute ones before the lookup.
    pub fn address_label<'l>(
        &self,
        labels: &'l dyn LabelResolver,
        translator: &dyn AddressTranslator,
    ) -> Option<&'l CodeLabel> {
        if !self.is_cpu_breakpoint() {
            return None;
        }
        let address = i32::try_from(self.start_address).ok()?;
        let info = AddressInfo::new(address, self.memory_type);
        if self.is_absolute_address() {
            labels.label_at(info)
        } else {
            let absolute = translator.absolute_address(info);
            if absolute.address < 0 {
                return None;
            }
            labels.label_at(absolute)
        }
    }
}

fn export_address(address: u32) -> Result<i32, BreakpointError> {
    i32::try_from(address)
        .map_err(|_| BreakpointError::AddressOutOfRange(address))
}

fn check_range(start: u32, end: u32) -> Result<(), BreakpointError> {
    if start > end {
        return Err(BreakpointError::InvalidAddressRange { start, end });
    }
    Ok(())
}

fn import_address(address: i32) -> Result<u32, BreakpointError> {
    u32::try_from(address)
        .map_err(|_| BreakpointError::InvalidAddress(address))
}

/// Formats the breakpoint as a single breakpoint script statement.
impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "break {} {} ", self.cpu_type, self.memory_type)?;
        if !(self.break_on_read || self.break_on_write || self.break_on_exec)
        {
            f.write_str("none")?;
        } else {
            if self.break_on_read {
                f.write_str("r")?;
            }
            if self.break_on_write {
                f.write_str("w")?;
            }
            if self.break_on_exec {
                f.write_str("x")?;
            }
        }
        let width = self.memory_type.hex_digits();
        match self.address_type {
            AddressType::AnyAddress => f.write_str(" *")?,
            AddressType::SingleAddress => {
                write!(f, " ${:0width$X}", self.start_address)?
            }
            AddressType::AddressRange => write!(
                f,
                " ${:0width$X} - ${:0width$X}",
                self.start_address, self.end_address
            )?,
        }
        if !self.enabled {
            f.write_str(" disabled")?;
        }
        if self.mark_event {
            f.write_str(" mark")?;
        }
        if !self.condition.is_empty() {
            f.write_str(" if \"")?;
            for chr in self.condition.chars() {
                match chr {
                    '"' => f.write_str("\\\"")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    '\r' => f.write_str("\\r")?,
                    '\t' => f.write_str("\\t")?,
                    _ => write!(f, "{chr}")?,
                }
            }
            f.write_str("\"")?;
        }
        Ok(())
    }
}

//===========================================================================//


//===========================================================================//
