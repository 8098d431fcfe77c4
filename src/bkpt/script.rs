use super::{AddressType, Breakpoint, BreakpointList, ExportRecord};
use crate::mem::{CpuType, MemoryType};
use crate::parse::{
    AddressAst, AddressAstNode, BreakStmtAst, BreakpointScriptAst,
    ConditionAst, IdentifierAst, ParseError, ParseResult, SrcSpan,
};
use std::collections::HashMap;

//===========================================================================//

impl BreakpointList {
    /// Parses and checks a breakpoint script, returning the breakpoints it
    /// defines in order.  All errors in the script are reported together.
    pub fn parse_script(source: &str) -> ParseResult<BreakpointList> {
        let ast = BreakpointScriptAst::parse_source(source)?;
        let mut checker = ScriptChecker::new();
        for stmt in ast.statements {
            checker.visit_break_stmt(stmt);
        }
        checker.finish()
    }
}

//===========================================================================//

type PrevAttrs = HashMap<String, SrcSpan>;

struct ScriptChecker {
    breakpoints: Vec<Breakpoint>,
    errors: Vec<ParseError>,
}

impl ScriptChecker {
    fn new() -> ScriptChecker {
        ScriptChecker { breakpoints: Vec::new(), errors: Vec::new() }
    }

    fn finish(self) -> ParseResult<BreakpointList> {
        if self.errors.is_empty() {
            Ok(self.breakpoints.into_iter().collect())
        } else {
            Err(self.errors)
        }
    }

    fn visit_break_stmt(&mut self, stmt: BreakStmtAst) {
        let cpu_type = self.cpu_type(&stmt.cpu);
        let memory_type = self.memory_type(&stmt.memory);
        let mut breakpoint = Breakpoint::new(
            cpu_type.unwrap_or(CpuType::Snes),
            memory_type.unwrap_or(MemoryType::CpuMemory),
        );
        self.visit_flags(&stmt.flags, &mut breakpoint);
        self.visit_address(stmt.address, &mut breakpoint);
        self.visit_attrs(&stmt.attrs, &mut breakpoint);
        if let Some(condition) = stmt.condition {
            self.visit_condition(condition, &mut breakpoint);
        }
        if cpu_type.is_none() || memory_type.is_none() {
            return;
        }
        if breakpoint.break_on_exec && !breakpoint.is_cpu_breakpoint() {
            log::warn!(
                "exec flag on {} breakpoint will be ignored: {breakpoint}",
                breakpoint.memory_type
            );
        }
        self.breakpoints.push(breakpoint);
    }

    fn cpu_type(&mut self, id: &IdentifierAst) -> Option<CpuType> {
        let cpu_type = CpuType::from_name(&id.name);
        if cpu_type.is_none() {
            let message = format!("Unknown CPU type: `{}`", id.name);
            let names: Vec<&str> =
                CpuType::ALL.iter().map(|cpu| cpu.name()).collect();
            let label = format!("expected one of: {}", names.join(", "));
            self.errors.push(
                ParseError::new(id.span, message).with_label(id.span, label),
            );
        }
        cpu_type
    }

    fn memory_type(&mut self, id: &IdentifierAst) -> Option<MemoryType> {
        let memory_type = MemoryType::from_name(&id.name);
        if memory_type.is_none() {
            let message = format!("Unknown memory type: `{}`", id.name);
            self.errors.push(ParseError::new(id.span, message));
        }
        memory_type
    }

    fn visit_flags(
        &mut self,
        id: &IdentifierAst,
        breakpoint: &mut Breakpoint,
    ) {
        if id.name == "none" {
            return;
        }
        for chr in id.name.chars() {
            let flag = match chr {
                'r' => &mut breakpoint.break_on_read,
                'w' => &mut breakpoint.break_on_write,
                'x' => &mut breakpoint.break_on_exec,
                _ => {
                    let message =
                        format!("Invalid breakpoint flags: `{}`", id.name);
                    let label = "flags are made of `r`, `w` and `x`, or are \
                                 `none`"
                        .to_string();
                    self.errors.push(
                        ParseError::new(id.span, message)
                            .with_label(id.span, label),
                    );
                    return;
                }
            };
            if *flag {
                let message = format!("Duplicate `{chr}` flag");
                self.errors.push(ParseError::new(id.span, message));
                return;
            }
            *flag = true;
        }
    }

    fn visit_address(
        &mut self,
        address: AddressAst,
        breakpoint: &mut Breakpoint,
    ) {
        match address.node {
            AddressAstNode::Any => {
                breakpoint.address_type = AddressType::AnyAddress;
            }
            AddressAstNode::Single(value) => {
                self.check_exportable(address.span, value);
                breakpoint.address_type = AddressType::SingleAddress;
                breakpoint.start_address = value;
                breakpoint.end_address = value;
            }
            AddressAstNode::Range(start, end) => {
                self.check_exportable(start.span, start.value);
                self.check_exportable(end.span, end.value);
                if start.value > end.value {
                    let message =
                        "Address range ends before it starts".to_string();
                    let label1 =
                        format!("range starts at ${:X}", start.value);
                    let label2 = format!("but ends at ${:X}", end.value);
                    self.errors.push(
                        ParseError::new(address.span, message)
                            .with_label(start.span, label1)
                            .with_label(end.span, label2),
                    );
                }
                breakpoint.address_type = AddressType::AddressRange;
                breakpoint.start_address = start.value;
                breakpoint.end_address = end.value;
            }
        }
    }

    fn check_exportable(&mut self, span: SrcSpan, address: u32) {
        if i32::try_from(address).is_err() {
            let message = format!("Address ${address:X} is out of range");
            let label = format!("addresses can be at most ${:X}", i32::MAX);
            self.errors
                .push(ParseError::new(span, message).with_label(span, label));
        }
    }

    fn visit_attrs(
        &mut self,
        attrs: &[IdentifierAst],
        breakpoint: &mut Breakpoint,
    ) {
        let mut prev_attrs = PrevAttrs::new();
        for attr in attrs {
            self.declare_attr(&mut prev_attrs, attr);
            match attr.name.as_str() {
                "enabled" => breakpoint.enabled = true,
                "disabled" => breakpoint.enabled = false,
                "mark" => breakpoint.mark_event = true,
                _ => {
                    let message = format!(
                        "Invalid breakpoint attribute: `{}`",
                        attr.name
                    );
                    self.errors.push(ParseError::new(attr.span, message));
                }
            }
        }
        if let (Some(&enabled), Some(&disabled)) =
            (prev_attrs.get("enabled"), prev_attrs.get("disabled"))
        {
            let message =
                "Breakpoint can't be both enabled and disabled".to_string();
            self.errors.push(
                ParseError::new(enabled.merged_with(disabled), message)
                    .with_label(enabled, "Enabled here".to_string())
                    .with_label(disabled, "Disabled here".to_string()),
            );
        }
    }

    fn declare_attr(
        &mut self,
        prev_attrs: &mut PrevAttrs,
        attr: &IdentifierAst,
    ) {
        if let Some(&prev_span) = prev_attrs.get(&attr.name) {
            let message = format!("Duplicate `{}` attribute", attr.name);
            let label1 = "Previously declared here".to_string();
            let label2 = "Duplicated here".to_string();
            self.errors.push(
                ParseError::new(attr.span, message)
                    .with_label(prev_span, label1)
                    .with_label(attr.span, label2),
            );
        } else {
            prev_attrs.insert(attr.name.clone(), attr.span);
        }
    }

    fn visit_condition(
        &mut self,
        condition: ConditionAst,
        breakpoint: &mut Breakpoint,
    ) {
        let Some(value) = condition.value else {
            let span = condition.keyword_span.end_span();
            let message =
                "Expected a condition string after `if`".to_string();
            let label = "e.g. `if \"a == $10\"`".to_string();
            self.errors.push(
                ParseError::new(span, message)
                    .with_label(condition.keyword_span, label),
            );
            return;
        };
        if let Err(error) = ExportRecord::encode_condition(&value.value) {
            let message = format!("Invalid condition: {error}");
            self.errors.push(ParseError::new(value.span, message));
        }
        breakpoint.condition = value.value;
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use crate::bkpt::{AddressType, Breakpoint, BreakpointList};
    use crate::mem::{CpuType, MemoryType};

    fn messages(source: &str) -> Vec<String> {
        BreakpointList::parse_script(source)
            .unwrap_err()
            .into_iter()
            .map(|error| error.message)
            .collect()
    }

    #[test]
    fn parse_breakpoints() {
        let source = "; SNES reset vector\n\
                      break snes prg_rom x $8000\n\
                      break spc spc_ram rw $00F0 - $00FF disabled mark\n\
                      break gameboy gameboy_memory none * if \"a\\tb\"\n";
        let list = BreakpointList::parse_script(source).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(
            list.get(0).unwrap(),
            &Breakpoint {
                start_address: 0x8000,
                end_address: 0x8000,
                break_on_exec: true,
                ..Breakpoint::new(CpuType::Snes, MemoryType::PrgRom)
            }
        );
        assert_eq!(
            list.get(1).unwrap(),
            &Breakpoint {
                address_type: AddressType::AddressRange,
                start_address: 0xf0,
                end_address: 0xff,
                break_on_read: true,
                break_on_write: true,
                enabled: false,
                mark_event: true,
                ..Breakpoint::new(CpuType::Spc, MemoryType::SpcRam)
            }
        );
        assert_eq!(
            list.get(2).unwrap(),
            &Breakpoint {
                address_type: AddressType::AnyAddress,
                condition: "a\tb".to_string(),
                ..Breakpoint::new(CpuType::Gameboy, MemoryType::GameboyMemory)
            }
        );
    }

    #[test]
    fn flag_order_does_not_matter() {
        let source = "break snes work_ram xwr $10";
        let list = BreakpointList::parse_script(source).unwrap();
        let breakpoint = list.get(0).unwrap();
        assert!(breakpoint.break_on_read);
        assert!(breakpoint.break_on_write);
        assert!(breakpoint.break_on_exec);
    }

    #[test]
    fn exec_on_non_cpu_memory_is_accepted() {
        let source = "break snes video_ram x $10";
        let list = BreakpointList::parse_script(source).unwrap();
        assert!(list.get(0).unwrap().break_on_exec);
        assert!(list.export_records().unwrap()[0].type_flags.is_empty());
    }

    #[test]
    fn unknown_names() {
        assert_eq!(
            messages("break z80 prg_rom x 0\nbreak snes flash x 0\n"),
            vec![
                "Unknown CPU type: `z80`".to_string(),
                "Unknown memory type: `flash`".to_string(),
            ]
        );
    }

    #[test]
    fn bad_flags() {
        assert_eq!(
            messages("break snes prg_rom rq 0\nbreak snes prg_rom rwr 0\n"),
            vec![
                "Invalid breakpoint flags: `rq`".to_string(),
                "Duplicate `r` flag".to_string(),
            ]
        );
    }

    #[test]
    fn backwards_range() {
        let errors =
            BreakpointList::parse_script("break snes prg_rom r $20 - $10")
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Address range ends before it starts");
        assert_eq!(errors[0].span.byte_range(), 21..30);
        assert_eq!(errors[0].labels.len(), 2);
        assert_eq!(errors[0].labels[1].message, "but ends at $10");
    }

    #[test]
    fn address_too_large() {
        assert_eq!(
            messages("break snes prg_rom r $80000000"),
            vec!["Address $80000000 is out of range".to_string()]
        );
        assert!(
            BreakpointList::parse_script("break snes prg_rom r $7FFFFFFF")
                .is_ok()
        );
    }

    #[test]
    fn bad_attributes() {
        assert_eq!(
            messages(
                "break snes prg_rom r 0 mark mark\n\
                 break snes prg_rom r 0 enabled disabled\n\
                 break snes prg_rom r 0 sometimes\n"
            ),
            vec![
                "Duplicate `mark` attribute".to_string(),
                "Breakpoint can't be both enabled and disabled".to_string(),
                "Invalid breakpoint attribute: `sometimes`".to_string(),
            ]
        );
    }

    #[test]
    fn if_needs_condition_string() {
        let errors = BreakpointList::parse_script("break snes prg_rom x 5 if")
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Expected a condition string after `if`"
        );
        assert_eq!(errors[0].span.byte_range(), 25..25);
        assert_eq!(errors[0].labels[0].span.byte_range(), 23..25);
        let errors =
            BreakpointList::parse_script("break snes prg_rom x 5 if 7\n")
                .unwrap_err();
        assert_eq!(errors[0].message, "unexpected int literal");
        assert_eq!(errors[0].span.byte_range(), 26..27);
    }

    #[test]
    fn condition_too_long() {
        let source =
            format!("break snes prg_rom r 0 if \"{}\"", "a".repeat(1000));
        assert_eq!(
            messages(&source),
            vec![
                "Invalid condition: condition too long: 1000 bytes (the \
                 limit is 999)"
                    .to_string()
            ]
        );
    }

    #[test]
    fn errors_are_collected_across_statements() {
        let source = "break nes nes_memory q 0\n\
                      break nes nes_memory r 9 - 1\n";
        let errors = BreakpointList::parse_script(source).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].span.line_and_column(source), (1, 22));
        assert_eq!(errors[1].span.line_and_column(source), (2, 24));
    }

    #[test]
    fn display_reparses() {
        let breakpoints = vec![
            Breakpoint {
                start_address: 0x80a0,
                end_address: 0x80a0,
                break_on_exec: true,
                mark_event: true,
                condition: "a == \"x\"\n".to_string(),
                ..Breakpoint::new(CpuType::Snes, MemoryType::PrgRom)
            },
            Breakpoint {
                address_type: AddressType::AddressRange,
                start_address: 0x1000,
                end_address: 0x1fff,
                break_on_write: true,
                enabled: false,
                ..Breakpoint::new(CpuType::Nes, MemoryType::NesMemory)
            },
            Breakpoint {
                address_type: AddressType::AnyAddress,
                break_on_read: true,
                ..Breakpoint::new(CpuType::Gsu, MemoryType::GsuWorkRam)
            },
        ];
        let source: String = breakpoints
            .iter()
            .map(|breakpoint| format!("{breakpoint}\n"))
            .collect();
        let list = BreakpointList::parse_script(&source).unwrap();
        let parsed: Vec<Breakpoint> = list.iter().cloned().collect();
        assert_eq!(parsed, breakpoints);
    }
}

//===========================================================================//
