use crate::mem::{AddressInfo, CpuType, MemoryType};

//===========================================================================//

/// Converts addresses between a CPU's view of memory and the physical memory
/// types behind it.
pub trait AddressTranslator {
    /// Returns where the given absolute location appears on `cpu`'s bus, or
    /// an unmapped address in the CPU's memory type if it doesn't appear
    /// there at all.
    fn relative_address(
        &self,
        absolute: AddressInfo,
        cpu: CpuType,
    ) -> AddressInfo;

    /// Returns the physical location behind the given CPU bus address, or an
    /// unmapped address if nothing is mapped there.
    fn absolute_address(&self, relative: AddressInfo) -> AddressInfo;
}

//===========================================================================//

/// An address translator that treats every address as already being in the
/// right address space.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTranslator;

impl AddressTranslator for IdentityTranslator {
    fn relative_address(
        &self,
        absolute: AddressInfo,
        _cpu: CpuType,
    ) -> AddressInfo {
        absolute
    }

    fn absolute_address(&self, relative: AddressInfo) -> AddressInfo {
        relative
    }
}

//===========================================================================//

/// A window of a physical memory type that appears on a CPU's bus.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MappedRegion {
    /// The CPU whose bus the region appears on.
    pub cpu: CpuType,
    /// The physical memory type behind the region.
    pub memory_type: MemoryType,
    /// The first offset within `memory_type` that is mapped.
    pub absolute_start: u32,
    /// The bus address at which `absolute_start` appears.
    pub relative_start: u32,
    /// The number of bytes in the region.
    pub size: u32,
}

impl MappedRegion {
    fn absolute_to_relative(&self, address: u32) -> Option<u32> {
        let offset = address.checked_sub(self.absolute_start)?;
        if offset < self.size {
            self.relative_start.checked_add(offset)
        } else {
            None
        }
    }

    fn relative_to_absolute(&self, address: u32) -> Option<u32> {
        let offset = address.checked_sub(self.relative_start)?;
        if offset < self.size {
            self.absolute_start.checked_add(offset)
        } else {
            None
        }
    }
}

//===========================================================================//

/// An address translator backed by a static list of mapped regions.  When
/// regions overlap, the one added first wins.
#[derive(Clone, Debug, Default)]
pub struct MemoryMap {
    regions: Vec<MappedRegion>,
}

impl MemoryMap {
    /// Returns a memory map with nothing mapped.
    pub fn new() -> MemoryMap {
        MemoryMap { regions: Vec::new() }
    }

    /// Maps `size` bytes of `memory_type`, starting at `absolute_start`,
    /// onto `cpu`'s bus at `relative_start`.
    pub fn map(
        &mut self,
        cpu: CpuType,
        memory_type: MemoryType,
        absolute_start: u32,
        relative_start: u32,
        size: u32,
    ) {
        self.regions.push(MappedRegion {
            cpu,
            memory_type,
            absolute_start,
            relative_start,
            size,
        });
    }

    /// Returns the mapped regions, in the order they were added.
    pub fn regions(&self) -> &[MappedRegion] {
        &self.regions
    }
}

impl AddressTranslator for MemoryMap {
    fn relative_address(
        &self,
        absolute: AddressInfo,
        cpu: CpuType,
    ) -> AddressInfo {
        let cpu_memory = cpu.memory_type();
        if absolute.memory_type == cpu_memory {
            return absolute;
        }
        let Some(address) = absolute.mapped_address() else {
            return AddressInfo::unmapped(cpu_memory);
        };
        self.regions
            .iter()
            .filter(|region| {
                region.cpu == cpu && region.memory_type == absolute.memory_type
            })
            .find_map(|region| region.absolute_to_relative(address))
            .and_then(|relative| i32::try_from(relative).ok())
            .map(|relative| AddressInfo::new(relative, cpu_memory))
            .unwrap_or(AddressInfo::unmapped(cpu_memory))
    }

    fn absolute_address(&self, relative: AddressInfo) -> AddressInfo {
        if !relative.memory_type.is_relative_memory() {
            return relative;
        }
        let Some(address) = relative.mapped_address() else {
            return AddressInfo::unmapped(relative.memory_type);
        };
        self.regions
            .iter()
            .filter(|region| {
                region.cpu.memory_type() == relative.memory_type
            })
            .find_map(|region| {
                let absolute = region.relative_to_absolute(address)?;
                let absolute = i32::try_from(absolute).ok()?;
                Some(AddressInfo::new(absolute, region.memory_type))
            })
            .unwrap_or(AddressInfo::unmapped(relative.memory_type))
    }
}

//===========================================================================//


//===========================================================================//
