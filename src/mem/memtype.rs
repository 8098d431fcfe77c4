use crate::bkpt::BreakpointError;
use std::fmt;

//===========================================================================//

/// Identifies one of the address spaces known to the debugger.
///
/// Addresses are only comparable between two accesses that target the same
/// memory type.  The `u8` discriminant of each variant is the tag used for
/// that memory type in exported breakpoint records.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum MemoryType {
    /// The SNES main CPU's view of memory.
    CpuMemory = 0,
    /// The SNES SPC700's view of memory.
    SpcMemory,
    /// The SA-1 coprocessor's view of memory.
    Sa1Memory,
    /// The Super FX (GSU) coprocessor's view of memory.
    GsuMemory,
    /// The NEC DSP coprocessor's view of memory.
    NecDspMemory,
    /// The CX4 coprocessor's view of memory.
    Cx4Memory,
    /// The Game Boy CPU's view of memory.
    GameboyMemory,
    /// The NES CPU's view of memory.
    NesMemory,
    /// SNES cartridge program ROM.
    PrgRom,
    /// SNES work RAM.
    WorkRam,
    /// SNES cartridge save RAM.
    SaveRam,
    /// SNES video RAM.
    VideoRam,
    /// SNES sprite attribute memory (OAM).
    SpriteRam,
    /// SNES palette memory (CGRAM).
    CgRam,
    /// SPC700 RAM.
    SpcRam,
    /// SPC700 IPL ROM.
    SpcRom,
    /// NEC DSP program ROM.
    DspProgramRom,
    /// NEC DSP data ROM.
    DspDataRom,
    /// NEC DSP data RAM.
    DspDataRam,
    /// SA-1 internal RAM.
    Sa1InternalRam,
    /// Super FX work RAM.
    GsuWorkRam,
    /// CX4 data RAM.
    Cx4DataRam,
    /// BS-X PSRAM.
    BsxPsRam,
    /// BS-X memory pack.
    BsxMemoryPack,
    /// Game Boy cartridge program ROM.
    GbPrgRom,
    /// Game Boy work RAM.
    GbWorkRam,
    /// Game Boy cartridge RAM.
    GbCartRam,
    /// Game Boy high RAM.
    GbHighRam,
    /// Game Boy boot ROM.
    GbBootRom,
    /// Game Boy video RAM.
    GbVideoRam,
    /// Game Boy sprite attribute memory (OAM).
    GbSpriteRam,
    /// NES cartridge program ROM.
    NesPrgRom,
    /// NES internal (console) RAM.
    NesInternalRam,
    /// NES cartridge work RAM.
    NesWorkRam,
    /// NES cartridge save RAM.
    NesSaveRam,
    /// NES nametable RAM.
    NesNametableRam,
    /// NES sprite RAM (OAM).
    NesSpriteRam,
    /// NES secondary sprite RAM.
    NesSecondarySpriteRam,
    /// NES palette RAM.
    NesPaletteRam,
    /// NES cartridge CHR RAM.
    NesChrRam,
    /// NES cartridge CHR ROM.
    NesChrRom,
    /// Hardware registers of any console.
    Register,
}

impl MemoryType {
    /// Every memory type, in tag order.
    pub const ALL: [MemoryType; 42] = [
        MemoryType::CpuMemory,
        MemoryType::SpcMemory,
        MemoryType::Sa1Memory,
        MemoryType::GsuMemory,
        MemoryType::NecDspMemory,
        MemoryType::Cx4Memory,
        MemoryType::GameboyMemory,
        MemoryType::NesMemory,
        MemoryType::PrgRom,
        MemoryType::WorkRam,
        MemoryType::SaveRam,
        MemoryType::VideoRam,
        MemoryType::SpriteRam,
        MemoryType::CgRam,
        MemoryType::SpcRam,
        MemoryType::SpcRom,
        MemoryType::DspProgramRom,
        MemoryType::DspDataRom,
        MemoryType::DspDataRam,
        MemoryType::Sa1InternalRam,
        MemoryType::GsuWorkRam,
        MemoryType::Cx4DataRam,
        MemoryType::BsxPsRam,
        MemoryType::BsxMemoryPack,
        MemoryType::GbPrgRom,
        MemoryType::GbWorkRam,
        MemoryType::GbCartRam,
        MemoryType::GbHighRam,
        MemoryType::GbBootRom,
        MemoryType::GbVideoRam,
        MemoryType::GbSpriteRam,
        MemoryType::NesPrgRom,
        MemoryType::NesInternalRam,
        MemoryType::NesWorkRam,
        MemoryType::NesSaveRam,
        MemoryType::NesNametableRam,
        MemoryType::NesSpriteRam,
        MemoryType::NesSecondarySpriteRam,
        MemoryType::NesPaletteRam,
        MemoryType::NesChrRam,
        MemoryType::NesChrRom,
        MemoryType::Register,
    ];

    /// Returns the raw tag for this memory type.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Returns the name used for this memory type in breakpoint scripts.
    pub fn name(self) -> &'static str {
        match self {
            MemoryType::CpuMemory => "cpu_memory",
            MemoryType::SpcMemory => "spc_memory",
            MemoryType::Sa1Memory => "sa1_memory",
            MemoryType::GsuMemory => "gsu_memory",
            MemoryType::NecDspMemory => "nec_dsp_memory",
            MemoryType::Cx4Memory => "cx4_memory",
            MemoryType::GameboyMemory => "gameboy_memory",
            MemoryType::NesMemory => "nes_memory",
            MemoryType::PrgRom => "prg_rom",
            MemoryType::WorkRam => "work_ram",
            MemoryType::SaveRam => "save_ram",
            MemoryType::VideoRam => "video_ram",
            MemoryType::SpriteRam => "sprite_ram",
            MemoryType::CgRam => "cg_ram",
            MemoryType::SpcRam => "spc_ram",
            MemoryType::SpcRom => "spc_rom",
            MemoryType::DspProgramRom => "dsp_program_rom",
            MemoryType::DspDataRom => "dsp_data_rom",
            MemoryType::DspDataRam => "dsp_data_ram",
            MemoryType::Sa1InternalRam => "sa1_internal_ram",
            MemoryType::GsuWorkRam => "gsu_work_ram",
            MemoryType::Cx4DataRam => "cx4_data_ram",
            MemoryType::BsxPsRam => "bsx_ps_ram",
            MemoryType::BsxMemoryPack => "bsx_memory_pack",
            MemoryType::GbPrgRom => "gb_prg_rom",
            MemoryType::GbWorkRam => "gb_work_ram",
            MemoryType::GbCartRam => "gb_cart_ram",
            MemoryType::GbHighRam => "gb_high_ram",
            MemoryType::GbBootRom => "gb_boot_rom",
            MemoryType::GbVideoRam => "gb_video_ram",
            MemoryType::GbSpriteRam => "gb_sprite_ram",
            MemoryType::NesPrgRom => "nes_prg_rom",
            MemoryType::NesInternalRam => "nes_internal_ram",
            MemoryType::NesWorkRam => "nes_work_ram",
            MemoryType::NesSaveRam => "nes_save_ram",
            MemoryType::NesNametableRam => "nes_nametable_ram",
            MemoryType::NesSpriteRam => "nes_sprite_ram",
            MemoryType::NesSecondarySpriteRam => "nes_secondary_sprite_ram",
            MemoryType::NesPaletteRam => "nes_palette_ram",
            MemoryType::NesChrRam => "nes_chr_ram",
            MemoryType::NesChrRom => "nes_chr_rom",
            MemoryType::Register => "register",
        }
    }

    /// Looks up a memory type by its script name.
    pub fn from_name(name: &str) -> Option<MemoryType> {
        MemoryType::ALL.into_iter().find(|mem| mem.name() == name)
    }

    /// Returns the short abbreviation shown for this memory type in
    /// breakpoint lists.  Abbreviations are not unique across consoles.
    pub fn short_name(self) -> &'static str {
        match self {
            MemoryType::CpuMemory => "CPU",
            MemoryType::SpcMemory => "SPC",
            MemoryType::Sa1Memory => "SA1",
            MemoryType::GsuMemory => "GSU",
            MemoryType::NecDspMemory => "DSP",
            MemoryType::Cx4Memory => "CX4",
            MemoryType::GameboyMemory => "CPU",
            MemoryType::NesMemory => "CPU",

            MemoryType::PrgRom => "PRG",
            MemoryType::WorkRam => "WRAM",
            MemoryType::SaveRam => "SRAM",
            MemoryType::VideoRam => "VRAM",
            MemoryType::SpriteRam => "OAM",
            MemoryType::CgRam => "CG",

            MemoryType::SpcRam => "RAM",
            MemoryType::SpcRom => "ROM",

            MemoryType::DspProgramRom => "DSP",
            MemoryType::DspDataRom => "DROM",
            MemoryType::DspDataRam => "DRAM",
            MemoryType::Sa1InternalRam => "IRAM",
            MemoryType::GsuWorkRam => "GWRAM",
            MemoryType::Cx4DataRam => "CX4RAM",

            MemoryType::BsxPsRam => "PSRAM",
            MemoryType::BsxMemoryPack => "MPACK",

            MemoryType::GbPrgRom => "PRG",
            MemoryType::GbWorkRam => "WRAM",
            MemoryType::GbCartRam => "SRAM",
            MemoryType::GbHighRam => "HRAM",
            MemoryType::GbBootRom => "BOOT",
            MemoryType::GbVideoRam => "VRAM",
            MemoryType::GbSpriteRam => "OAM",

            MemoryType::NesPrgRom => "PRG",
            MemoryType::NesInternalRam => "RAM",
            MemoryType::NesWorkRam => "WRAM",
            MemoryType::NesSaveRam => "SRAM",
            MemoryType::NesNametableRam => "NTRAM",
            MemoryType::NesSpriteRam => "SPR",
            MemoryType::NesSecondarySpriteRam => "SPR2",
            MemoryType::NesPaletteRam => "PAL",
            MemoryType::NesChrRam => "CHR",
            MemoryType::NesChrRom => "CHR",

            MemoryType::Register => "REG",
        }
    }

    /// Returns the number of hex digits used when displaying an address in
    /// this memory type.
    pub fn hex_digits(self) -> usize {
        match self {
            MemoryType::SpcMemory | MemoryType::GameboyMemory => 4,
            _ => 6,
        }
    }

    /// Returns true if this memory type belongs to a picture processing
    /// unit rather than to a CPU.
    pub fn is_ppu_memory(self) -> bool {
        matches!(
            self,
            MemoryType::VideoRam
                | MemoryType::SpriteRam
                | MemoryType::CgRam
                | MemoryType::GbVideoRam
                | MemoryType::GbSpriteRam
                | MemoryType::NesNametableRam
                | MemoryType::NesSpriteRam
                | MemoryType::NesSecondarySpriteRam
                | MemoryType::NesPaletteRam
                | MemoryType::NesChrRam
                | MemoryType::NesChrRom
        )
    }

    /// Returns true if addresses in this memory type are expressed relative
    /// to a CPU core's view of memory, rather than as an offset into a
    /// physical ROM or RAM chip.
    pub fn is_relative_memory(self) -> bool {
        matches!(
            self,
            MemoryType::CpuMemory
                | MemoryType::SpcMemory
                | MemoryType::Sa1Memory
                | MemoryType::GsuMemory
                | MemoryType::NecDspMemory
                | MemoryType::Cx4Memory
                | MemoryType::GameboyMemory
                | MemoryType::NesMemory
        )
    }

    /// Returns true if a CPU can access this memory type directly, meaning
    /// that execute breakpoints and relative address translation apply to
    /// it.  This is true for everything except registers and PPU memory.
    pub fn is_cpu_addressable(self) -> bool {
        self != MemoryType::Register && !self.is_ppu_memory()
    }
}

impl TryFrom<u8> for MemoryType {
    type Error = BreakpointError;

    fn try_from(tag: u8) -> Result<MemoryType, BreakpointError> {
        MemoryType::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(BreakpointError::UnknownMemoryType(tag))
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::MemoryType;
    use crate::bkpt::BreakpointError;
    use std::collections::HashSet;

    #[test]
    fn tags_match_table_order() {
        for (index, mem) in MemoryType::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(mem.tag()), index);
            assert_eq!(MemoryType::try_from(mem.tag()).unwrap(), mem);
        }
    }

    #[test]
    fn unknown_tag() {
        assert!(matches!(
            MemoryType::try_from(42),
            Err(BreakpointError::UnknownMemoryType(42))
        ));
        assert!(matches!(
            MemoryType::try_from(0xff),
            Err(BreakpointError::UnknownMemoryType(0xff))
        ));
    }

    #[test]
    fn names_are_unique_and_round_trip() {
        let mut names = HashSet::new();
        for mem in MemoryType::ALL {
            assert!(names.insert(mem.name()), "duplicate name {mem}");
            assert_eq!(MemoryType::from_name(mem.name()), Some(mem));
        }
        assert_eq!(MemoryType::from_name("PrgRom"), None);
        assert_eq!(MemoryType::from_name(""), None);
    }

    #[test]
    fn short_names() {
        assert_eq!(MemoryType::PrgRom.short_name(), "PRG");
        assert_eq!(MemoryType::NesMemory.short_name(), "CPU");
        assert_eq!(MemoryType::NesPaletteRam.short_name(), "PAL");
        assert_eq!(MemoryType::Register.short_name(), "REG");
    }

    #[test]
    fn hex_digits() {
        assert_eq!(MemoryType::SpcMemory.hex_digits(), 4);
        assert_eq!(MemoryType::GameboyMemory.hex_digits(), 4);
        assert_eq!(MemoryType::NesMemory.hex_digits(), 6);
        assert_eq!(MemoryType::CpuMemory.hex_digits(), 6);
        assert_eq!(MemoryType::PrgRom.hex_digits(), 6);
    }

    #[test]
    fn cpu_addressable() {
        let excluded: Vec<MemoryType> = MemoryType::ALL
            .into_iter()
            .filter(|mem| !mem.is_cpu_addressable())
            .collect();
        for mem in &excluded {
            assert!(*mem == MemoryType::Register || mem.is_ppu_memory());
        }
        assert!(excluded.contains(&MemoryType::Register));
        assert!(excluded.contains(&MemoryType::VideoRam));
        assert!(excluded.contains(&MemoryType::GbSpriteRam));
        assert!(excluded.contains(&MemoryType::NesChrRom));
        assert!(MemoryType::PrgRom.is_cpu_addressable());
        assert!(MemoryType::SpcRam.is_cpu_addressable());
        assert!(MemoryType::NesMemory.is_cpu_addressable());
    }

    #[test]
    fn relative_memory_is_cpu_addressable() {
        for mem in MemoryType::ALL {
            if mem.is_relative_memory() {
                assert!(mem.is_cpu_addressable(), "{mem}");
            }
        }
        assert!(!MemoryType::PrgRom.is_relative_memory());
    }
}

//===========================================================================//
