use super::MemoryType;

//===========================================================================//

/// An address within a specific memory type.  A negative address means that
/// the location does not exist (e.g. an absolute address that isn't
/// currently mapped into a CPU's view of memory).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AddressInfo {
    /// The offset within the memory type, or -1 if there is none.
    pub address: i32,
    /// The memory type that the address is within.
    pub memory_type: MemoryType,
}

impl AddressInfo {
    /// Constructs an address within the given memory type.
    pub fn new(address: i32, memory_type: MemoryType) -> AddressInfo {
        AddressInfo { address, memory_type }
    }

    /// Constructs a location that isn't mapped anywhere in the given memory
    /// type.
    pub fn unmapped(memory_type: MemoryType) -> AddressInfo {
        AddressInfo { address: -1, memory_type }
    }

    /// Returns the address as a `u32`, or `None` if this location is
    /// unmapped.
    pub fn mapped_address(&self) -> Option<u32> {
        u32::try_from(self.address).ok()
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::AddressInfo;
    use crate::mem::MemoryType;

    #[test]
    fn mapped_address() {
        let info = AddressInfo::new(0x1234, MemoryType::PrgRom);
        assert_eq!(info.mapped_address(), Some(0x1234));
        let info = AddressInfo::unmapped(MemoryType::PrgRom);
        assert_eq!(info.address, -1);
        assert_eq!(info.mapped_address(), None);
    }
}

//===========================================================================//
