use super::MemoryType;
use crate::bkpt::BreakpointError;
use std::fmt;

//===========================================================================//

/// Identifies one of the emulated processors that a breakpoint or memory
/// access can belong to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum CpuType {
    /// The SNES main CPU (a 65C816).
    Snes = 0,
    /// The SNES audio processor (an SPC700).
    Spc,
    /// An NEC DSP coprocessor on a SNES cartridge.
    NecDsp,
    /// An SA-1 coprocessor on a SNES cartridge.
    Sa1,
    /// A Super FX (GSU) coprocessor on a SNES cartridge.
    Gsu,
    /// A CX4 coprocessor on a SNES cartridge.
    Cx4,
    /// The Game Boy CPU (a Sharp SM83).
    Gameboy,
    /// The NES CPU (a 6502 derivative).
    Nes,
}

impl CpuType {
    /// Every CPU type, in tag order.
    pub const ALL: [CpuType; 8] = [
        CpuType::Snes,
        CpuType::Spc,
        CpuType::NecDsp,
        CpuType::Sa1,
        CpuType::Gsu,
        CpuType::Cx4,
        CpuType::Gameboy,
        CpuType::Nes,
    ];

    /// Returns the raw tag for this CPU type.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Returns the name used for this CPU type in breakpoint scripts.
    pub fn name(self) -> &'static str {
        match self {
            CpuType::Snes => "snes",
            CpuType::Spc => "spc",
            CpuType::NecDsp => "nec_dsp",
            CpuType::Sa1 => "sa1",
            CpuType::Gsu => "gsu",
            CpuType::Cx4 => "cx4",
            CpuType::Gameboy => "gameboy",
            CpuType::Nes => "nes",
        }
    }

    /// Looks up a CPU type by its script name.
    pub fn from_name(name: &str) -> Option<CpuType> {
        CpuType::ALL.into_iter().find(|cpu| cpu.name() == name)
    }

    /// Returns the memory type that represents this processor's own view of
    /// memory.
    pub fn memory_type(self) -> MemoryType {
        match self {
            CpuType::Snes => MemoryType::CpuMemory,
            CpuType::Spc => MemoryType::SpcMemory,
            CpuType::NecDsp => MemoryType::NecDspMemory,
            CpuType::Sa1 => MemoryType::Sa1Memory,
            CpuType::Gsu => MemoryType::GsuMemory,
            CpuType::Cx4 => MemoryType::Cx4Memory,
            CpuType::Gameboy => MemoryType::GameboyMemory,
            CpuType::Nes => MemoryType::NesMemory,
        }
    }
}

impl TryFrom<u8> for CpuType {
    type Error = BreakpointError;

    fn try_from(tag: u8) -> Result<CpuType, BreakpointError> {
        CpuType::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(BreakpointError::UnknownCpuType(tag))
    }
}

impl fmt::Display for CpuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//===========================================================================//


//===========================================================================//
