use super::{BreakpointError, BreakpointTypeFlags};
use crate::mem::{CpuType, MemoryType};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

//===========================================================================//

/// The size of the condition buffer in an export record, including the NUL
/// terminator.
pub const CONDITION_CAPACITY: usize = 1000;

/// The maximum length, in bytes, of an exported condition expression.
pub const MAX_CONDITION_LEN: usize = CONDITION_CAPACITY - 1;

/// The size of an encoded export record, in bytes.
pub const RECORD_SIZE: usize = 20 + CONDITION_CAPACITY;

const _: () = assert!(std::mem::size_of::<ExportRecord>() == RECORD_SIZE);

//===========================================================================//

/// A breakpoint, laid out the way the native debugging engine expects to
/// receive it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct ExportRecord {
    /// The identifier that the engine reports back when this breakpoint is
    /// hit.
    pub id: i32,
    /// The CPU that the breakpoint applies to.
    pub cpu_type: CpuType,
    /// The memory type that the addresses are within.
    pub memory_type: MemoryType,
    /// Which kinds of access trigger the breakpoint.
    pub type_flags: BreakpointTypeFlags,
    /// Whether a hit should be recorded in the event viewer.
    pub mark_event: bool,
    /// Whether a hit should pause emulation.
    pub enabled: bool,
    /// The first address of the breakpoint, or -1 for any address.
    pub start_address: i32,
    /// The last address of the breakpoint, or -1 if the breakpoint only
    /// covers a single address.
    pub end_address: i32,
    /// The condition expression as NUL-padded UTF-8.
    pub condition: [u8; CONDITION_CAPACITY],
}

impl ExportRecord {
    /// Encodes a condition expression into a NUL-padded buffer.  Each line
    /// break is replaced with a single space.  Fails if the result would
    /// not leave room for a NUL terminator, or if the expression itself
    /// contains a NUL.
    pub fn encode_condition(
        condition: &str,
    ) -> Result<[u8; CONDITION_CAPACITY], BreakpointError> {
        let condition =
            condition.replace("\r\n", " ").replace(['\r', '\n'], " ");
        let bytes = condition.as_bytes();
        if bytes.len() > MAX_CONDITION_LEN {
            return Err(BreakpointError::ConditionTooLong {
                len: bytes.len(),
                max: MAX_CONDITION_LEN,
            });
        }
        if bytes.contains(&0) {
            return Err(BreakpointError::ConditionContainsNul);
        }
        let mut buffer = [0u8; CONDITION_CAPACITY];
        buffer[..bytes.len()].copy_from_slice(bytes);
        Ok(buffer)
    }

    /// Returns the condition bytes up to (but not including) the first NUL.
    pub fn condition_bytes(&self) -> &[u8] {
        let len = self
            .condition
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(CONDITION_CAPACITY);
        &self.condition[..len]
    }

    /// Returns the condition expression as a string.
    pub fn condition_str(&self) -> Result<&str, BreakpointError> {
        std::str::from_utf8(self.condition_bytes())
            .map_err(|_| BreakpointError::InvalidConditionEncoding)
    }

    /// Writes this record in its fixed little-endian layout.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.id)?;
        writer.write_u8(self.cpu_type.tag())?;
        writer.write_u8(self.memory_type.tag())?;
        writer.write_u8(self.type_flags.bits())?;
        writer.write_u8(u8::from(self.mark_event))?;
        writer.write_u8(u8::from(self.enabled))?;
        writer.write_all(&[0u8; 3])?;
        writer.write_i32::<LittleEndian>(self.start_address)?;
        writer.write_i32::<LittleEndian>(self.end_address)?;
        writer.write_all(&self.condition)?;
        Ok(())
    }

    /// Reads a record that was written by [`ExportRecord::write_to`].
    pub fn read_from<R: Read>(
        reader: &mut R,
    ) -> Result<ExportRecord, BreakpointError> {
        let id = reader.read_i32::<LittleEndian>()?;
        let cpu_type = CpuType::try_from(reader.read_u8()?)?;
        let memory_type = MemoryType::try_from(reader.read_u8()?)?;
        let type_flags = BreakpointTypeFlags::from_bits(reader.read_u8()?)?;
        let mark_event = read_bool(reader)?;
        let enabled = read_bool(reader)?;
        let mut padding = [0u8; 3];
        reader.read_exact(&mut padding)?;
        let start_address = reader.read_i32::<LittleEndian>()?;
        let end_address = reader.read_i32::<LittleEndian>()?;
        let mut condition = [0u8; CONDITION_CAPACITY];
        reader.read_exact(&mut condition)?;
        Ok(ExportRecord {
            id,
            cpu_type,
            memory_type,
            type_flags,
            mark_event,
            enabled,
            start_address,
            end_address,
            condition,
        })
    }
}

fn read_bool<R: Read>(reader: &mut R) -> Result<bool, BreakpointError> {
    match reader.read_u8()? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(BreakpointError::InvalidBool(other)),
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{
        CONDITION_CAPACITY, ExportRecord, MAX_CONDITION_LEN, RECORD_SIZE,
    };
    use crate::bkpt::{BreakpointError, BreakpointTypeFlags};
    use crate::mem::{CpuType, MemoryType};

    fn sample_record() -> ExportRecord {
        ExportRecord {
            id: 7,
            cpu_type: CpuType::Spc,
            memory_type: MemoryType::SpcRam,
            type_flags: BreakpointTypeFlags::READ
                | BreakpointTypeFlags::WRITE,
            mark_event: true,
            enabled: false,
            start_address: 0x00f0,
            end_address: 0x00ff,
            condition: ExportRecord::encode_condition("a == $10").unwrap(),
        }
    }

    #[test]
    fn encode_condition_pads_with_nul() {
        let buffer = ExportRecord::encode_condition("x > 3").unwrap();
        assert_eq!(&buffer[..5], b"x > 3");
        assert!(buffer[5..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn encode_condition_collapses_line_breaks() {
        let buffer =
            ExportRecord::encode_condition("a == 1\r\n&& x == 2\ny\rz")
                .unwrap();
        assert_eq!(&buffer[..20], b"a == 1 && x == 2 y z");
        assert_eq!(buffer[20], 0);
    }

    #[test]
    fn encode_condition_limit() {
        let exact = "a".repeat(MAX_CONDITION_LEN);
        let buffer = ExportRecord::encode_condition(&exact).unwrap();
        assert_eq!(&buffer[..MAX_CONDITION_LEN], exact.as_bytes());
        assert_eq!(buffer[CONDITION_CAPACITY - 1], 0);

        let too_long = "a".repeat(MAX_CONDITION_LEN + 1);
        assert!(matches!(
            ExportRecord::encode_condition(&too_long),
            Err(BreakpointError::ConditionTooLong { len: 1000, max: 999 })
        ));
    }

    #[test]
    fn encode_condition_counts_utf8_bytes() {
        // 500 two-byte characters is 1000 bytes.
        let condition = "é".repeat(500);
        assert!(matches!(
            ExportRecord::encode_condition(&condition),
            Err(BreakpointError::ConditionTooLong { len: 1000, .. })
        ));
    }

    #[test]
    fn encode_condition_rejects_nul() {
        assert!(matches!(
            ExportRecord::encode_condition("a\0b"),
            Err(BreakpointError::ConditionContainsNul)
        ));
    }

    #[test]
    fn condition_str() {
        let record = sample_record();
        assert_eq!(record.condition_bytes(), b"a == $10");
        assert_eq!(record.condition_str().unwrap(), "a == $10");

        let mut record = sample_record();
        record.condition[0] = 0xff;
        assert!(matches!(
            record.condition_str(),
            Err(BreakpointError::InvalidConditionEncoding)
        ));
    }

    #[test]
    fn binary_layout() {
        let mut bytes = Vec::new();
        sample_record().write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(&bytes[0..4], &[7, 0, 0, 0]);
        assert_eq!(bytes[4], CpuType::Spc.tag());
        assert_eq!(bytes[5], MemoryType::SpcRam.tag());
        assert_eq!(bytes[6], 6);
        assert_eq!(&bytes[7..12], &[1, 0, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[0xf0, 0, 0, 0]);
        assert_eq!(&bytes[16..20], &[0xff, 0, 0, 0]);
        assert_eq!(&bytes[20..28], b"a == $10");
    }

    #[test]
    fn unset_addresses_are_all_ones() {
        let mut record = sample_record();
        record.start_address = -1;
        record.end_address = -1;
        let mut bytes = Vec::new();
        record.write_to(&mut bytes).unwrap();
        assert_eq!(&bytes[12..20], &[0xff; 8]);
    }

    #[test]
    fn read_back() {
        let record = sample_record();
        let mut bytes = Vec::new();
        record.write_to(&mut bytes).unwrap();
        let decoded = ExportRecord::read_from(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn read_rejects_bad_fields() {
        let mut bytes = Vec::new();
        sample_record().write_to(&mut bytes).unwrap();

        let mut bad = bytes.clone();
        bad[4] = 99;
        assert!(matches!(
            ExportRecord::read_from(&mut bad.as_slice()),
            Err(BreakpointError::UnknownCpuType(99))
        ));

        let mut bad = bytes.clone();
        bad[5] = 200;
        assert!(matches!(
            ExportRecord::read_from(&mut bad.as_slice()),
            Err(BreakpointError::UnknownMemoryType(200))
        ));

        let mut bad = bytes.clone();
        bad[6] = 0x0f;
        assert!(matches!(
            ExportRecord::read_from(&mut bad.as_slice()),
            Err(BreakpointError::InvalidTypeFlags(0x0f))
        ));

        let mut bad = bytes.clone();
        bad[8] = 2;
        assert!(matches!(
            ExportRecord::read_from(&mut bad.as_slice()),
            Err(BreakpointError::InvalidBool(2))
        ));
    }

    #[test]
    fn read_truncated() {
        let mut bytes = Vec::new();
        sample_record().write_to(&mut bytes).unwrap();
        bytes.truncate(RECORD_SIZE - 1);
        assert!(matches!(
            ExportRecord::read_from(&mut bytes.as_slice()),
            Err(BreakpointError::Io(_))
        ));
    }
}

//===========================================================================//
