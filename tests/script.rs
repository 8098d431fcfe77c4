use brkpt::bkpt::{AccessKind, BreakpointList, ExportRecord, RECORD_SIZE};
use brkpt::mem::{CpuType, MemoryType};

//===========================================================================//

const SCRIPT: &str = "\
; Breakpoints for a SNES game with an SA-1 coprocessor.
break snes prg_rom x $8000          ; reset
break snes work_ram w $0100 - $01FF disabled
break sa1 sa1_memory rw $003000 mark if \"a == 1\"
break snes video_ram rx * \\
    mark
";

#[test]
fn script_to_snapshot() {
    let list = BreakpointList::parse_script(SCRIPT).unwrap();
    assert_eq!(list.len(), 4);

    let mut output = Vec::new();
    assert_eq!(list.write_records(&mut output).unwrap(), 3);
    assert_eq!(output.len(), 4 + 3 * RECORD_SIZE);

    let mut reader = &output[4..];
    let records: Vec<ExportRecord> = (0..3)
        .map(|_| ExportRecord::read_from(&mut reader).unwrap())
        .collect();
    assert!(reader.is_empty());

    let ids: Vec<i32> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![0, 2, 3]);

    assert_eq!(records[0].memory_type, MemoryType::PrgRom);
    assert_eq!(records[0].type_flags.bits(), 1);
    assert_eq!(records[0].start_address, 0x8000);

    assert_eq!(records[1].cpu_type, CpuType::Sa1);
    assert_eq!(records[1].type_flags.bits(), 6);
    assert!(records[1].mark_event);
    assert_eq!(records[1].condition_str().unwrap(), "a == 1");

    assert_eq!(records[2].memory_type, MemoryType::VideoRam);
    assert_eq!(records[2].type_flags.bits(), 2);
    assert_eq!((records[2].start_address, records[2].end_address), (-1, -1));
}

#[test]
fn script_matching() {
    let list = BreakpointList::parse_script(SCRIPT).unwrap();
    let hit = list.find_match(
        0x8000,
        MemoryType::PrgRom,
        Some(CpuType::Snes),
        AccessKind::Exec,
    );
    assert_eq!(hit.map(|(index, _)| index), Some(0));
    assert!(
        list.find_match(0x0150, MemoryType::WorkRam, None, AccessKind::Write)
            .is_none()
    );
    let hits: Vec<usize> = list
        .any_address_matches(MemoryType::VideoRam, None, AccessKind::Read)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(hits, vec![3]);
}

#[test]
fn script_round_trips_through_display() {
    let list = BreakpointList::parse_script(SCRIPT).unwrap();
    let text: String =
        list.iter().map(|breakpoint| format!("{breakpoint}\n")).collect();
    let reparsed = BreakpointList::parse_script(&text).unwrap();
    assert!(list.iter().eq(reparsed.iter()));
}

#[test]
fn script_errors_have_locations() {
    let source = "break snes prg_rom x $8000\nbreak snes rom x $8000\n";
    let errors = BreakpointList::parse_script(source).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].display(source).to_string(),
        "2:12: Unknown memory type: `rom`"
    );
}

//===========================================================================//
