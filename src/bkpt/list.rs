use super::{
    AccessKind, AddressType, Breakpoint, BreakpointError, ExportRecord,
};
use crate::mem::{CpuType, MemoryType};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

//===========================================================================//

/// The user's list of breakpoints, and the owner of the ids under which they
/// are exported to the debugging engine.
///
/// A breakpoint's export id is its index in the list, so ids stay valid
/// until the list is next modified.
#[derive(Clone, Debug, Default)]
pub struct BreakpointList {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointList {
    /// Returns an empty breakpoint list.
    pub fn new() -> BreakpointList {
        BreakpointList { breakpoints: Vec::new() }
    }

    /// Appends a breakpoint to the end of the list.
    pub fn push(&mut self, breakpoint: Breakpoint) {
        self.breakpoints.push(breakpoint);
    }

    /// Removes and returns the breakpoint at `index`, or returns `None` if
    /// the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Breakpoint> {
        if index < self.breakpoints.len() {
            Some(self.breakpoints.remove(index))
        } else {
            None
        }
    }

    /// Removes every breakpoint.
    pub fn clear(&mut self) {
        self.breakpoints.clear();
    }

    /// Returns the breakpoint at `index`.
    pub fn get(&self, index: usize) -> Option<&Breakpoint> {
        self.breakpoints.get(index)
    }

    /// Returns the breakpoint at `index` for editing.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Breakpoint> {
        self.breakpoints.get_mut(index)
    }

    /// Returns the number of breakpoints in the list.
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns true if the list has no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Iterates over the breakpoints in order.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    /// Returns the breakpoint that the engine reported under `id`.
    pub fn breakpoint_for_id(&self, id: i32) -> Option<&Breakpoint> {
        self.breakpoints.get(usize::try_from(id).ok()?)
    }

    /// Encodes every breakpoint that the engine needs to know about (those
    /// that are enabled or that mark events).  If any breakpoint fails to
    /// encode, no records are returned at all.
    pub fn export_records(
        &self,
    ) -> Result<Vec<ExportRecord>, BreakpointError> {
        let mut records = Vec::new();
        for (index, breakpoint) in self.breakpoints.iter().enumerate() {
            if !(breakpoint.enabled || breakpoint.mark_event) {
                continue;
            }
            let id = index as i32;
            match breakpoint.to_export_record(id) {
                Ok(record) => records.push(record),
                Err(error) => {
                    log::warn!("breakpoint {id} ({breakpoint}): {error}");
                    return Err(error);
                }
            }
        }
        log::debug!(
            "exporting {} of {} breakpoints",
            records.len(),
            self.breakpoints.len()
        );
        Ok(records)
    }

    /// Writes the export snapshot as a little-endian record count followed
    /// by the records themselves.  Returns the number of records written.
    pub fn write_records<W: Write>(
        &self,
        writer: &mut W,
    ) -> Result<usize, BreakpointError> {
        let records = self.export_records()?;
        writer.write_u32::<LittleEndian>(records.len() as u32)?;
        for record in &records {
            record.write_to(writer)?;
        }
        Ok(records.len())
    }

    /// Returns the first enabled breakpoint that covers an access of the
    /// given kind.  Breakpoints on any address are not considered; see
    /// [`BreakpointList::any_address_matches`].
    pub fn find_match(
        &self,
        address: u32,
        memory_type: MemoryType,
        cpu_type: Option<CpuType>,
        kind: AccessKind,
    ) -> Option<(usize, &Breakpoint)> {
        self.breakpoints.iter().enumerate().find(|(_, breakpoint)| {
            breakpoint.enabled
                && breakpoint.type_flags().contains(kind.flag())
                && breakpoint.matches(address, memory_type, cpu_type)
        })
    }

    /// Iterates over the enabled breakpoints that apply to every address of
    /// `memory_type` and trigger on accesses of the given kind.
    pub fn any_address_matches(
        &self,
        memory_type: MemoryType,
        cpu_type: Option<CpuType>,
        kind: AccessKind,
    ) -> impl Iterator<Item = (usize, &Breakpoint)> {
        self.breakpoints.iter().enumerate().filter(move |(_, breakpoint)| {
            breakpoint.enabled
                && breakpoint.address_type == AddressType::AnyAddress
                && breakpoint.memory_type == memory_type
                && cpu_type.is_none_or(|cpu| cpu == breakpoint.cpu_type)
                && breakpoint.type_flags().contains(kind.flag())
        })
    }
}

impl FromIterator<Breakpoint> for BreakpointList {
    fn from_iter<I: IntoIterator<Item = Breakpoint>>(
        iter: I,
    ) -> BreakpointList {
        BreakpointList { breakpoints: iter.into_iter().collect() }
    }
}

//===========================================================================//


//===========================================================================//
