use super::atom::{
    IdentifierAst, IntAst, PError, StrAst, end_of_statement, keyword,
    linebreak, parse_tokens, symbol, tokenize,
};
use super::lex::{Token, TokenValue};
use super::types::{ParseResult, SrcSpan};
use chumsky::{self, IterParser, Parser};

//===========================================================================//

/// The abstract syntax tree for a breakpoint script.
#[derive(Debug)]
pub struct BreakpointScriptAst {
    /// The `break` statements in the script, in order.
    pub statements: Vec<BreakStmtAst>,
}

impl BreakpointScriptAst {
    /// Parses a breakpoint script.
    pub fn parse_source(source: &str) -> ParseResult<BreakpointScriptAst> {
        let tokens = tokenize(source)?;
        parse_tokens(BreakpointScriptAst::parser(), &tokens)
    }

    fn parser<'a>()
    -> impl Parser<'a, &'a [Token], BreakpointScriptAst, PError<'a>> {
        linebreak()
            .repeated()
            .ignore_then(BreakStmtAst::parser().repeated().collect::<Vec<_>>())
            .then_ignore(chumsky::prelude::end())
            .map(|statements| BreakpointScriptAst { statements })
    }
}

//===========================================================================//

/// The abstract syntax tree for a single `break` statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BreakStmtAst {
    /// The location of the whole statement.
    pub span: SrcSpan,
    /// The name of the CPU that the breakpoint belongs to.
    pub cpu: IdentifierAst,
    /// The name of the memory type that the breakpoint watches.
    pub memory: IdentifierAst,
    /// The access flags (e.g. `rw` or `none`).
    pub flags: IdentifierAst,
    /// The address or addresses being watched.
    pub address: AddressAst,
    /// Trailing attributes such as `disabled` or `mark`.
    pub attrs: Vec<IdentifierAst>,
    /// The `if` clause, if one was given.
    pub condition: Option<ConditionAst>,
}

impl BreakStmtAst {
    fn parser<'a>()
    -> impl Parser<'a, &'a [Token], BreakStmtAst, PError<'a>> + Clone {
        let attribute = IdentifierAst::parser()
            .filter(|id: &IdentifierAst| id.name != "if")
            .labelled("attribute");
        chumsky::prelude::group((
            keyword("break"),
            IdentifierAst::parser(),
            IdentifierAst::parser(),
            IdentifierAst::parser(),
            AddressAst::parser(),
            attribute.repeated().collect::<Vec<_>>(),
            ConditionAst::parser().or_not(),
        ))
        .then_ignore(end_of_statement())
        .then_ignore(linebreak().repeated())
        .map(|(start, cpu, memory, flags, address, attrs, condition)| {
            let mut span = start.span.merged_with(address.span);
            if let Some(attr) = attrs.last() {
                span = span.merged_with(attr.span);
            }
            if let Some(condition) = &condition {
                span = span.merged_with(condition.span());
            }
            BreakStmtAst {
                span,
                cpu,
                memory,
                flags,
                address,
                attrs,
                condition,
            }
        })
    }
}

//===========================================================================//

/// The abstract syntax tree for an `if` clause.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionAst {
    /// The location of the `if` keyword.
    pub keyword_span: SrcSpan,
    /// The condition string, or `None` if the keyword wasn't followed by
    /// one.
    pub value: Option<StrAst>,
}

impl ConditionAst {
    /// Returns the location of the whole clause.
    pub fn span(&self) -> SrcSpan {
        match &self.value {
            Some(value) => self.keyword_span.merged_with(value.span),
            None => self.keyword_span,
        }
    }

    fn parser<'a>()
    -> impl Parser<'a, &'a [Token], ConditionAst, PError<'a>> + Clone {
        keyword("if").then(StrAst::parser().or_not()).map(|(keyword, value)| {
            ConditionAst { keyword_span: keyword.span, value }
        })
    }
}

//===========================================================================//

/// The abstract syntax tree for a breakpoint's address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AddressAst {
    /// The location in the script where the address appears.
    pub span: SrcSpan,
    /// The address itself.
    pub node: AddressAstNode,
}

/// The kinds of address that a `break` statement can name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressAstNode {
    /// `*`, for every address in the memory type.
    Any,
    /// A single address.
    Single(u32),
    /// An inclusive `start - end` range of addresses.
    Range(IntAst, IntAst),
}

impl AddressAst {
    fn parser<'a>()
    -> impl Parser<'a, &'a [Token], AddressAst, PError<'a>> + Clone {
        let any = symbol(TokenValue::Asterisk).map(|token| AddressAst {
            span: token.span,
            node: AddressAstNode::Any,
        });
        let numeric = IntAst::parser()
            .then(
                symbol(TokenValue::Hyphen)
                    .ignore_then(IntAst::parser())
                    .or_not(),
            )
            .map(|(start, end)| match end {
                None => AddressAst {
                    span: start.span,
                    node: AddressAstNode::Single(start.value),
                },
                Some(end) => AddressAst {
                    span: start.span.merged_with(end.span),
                    node: AddressAstNode::Range(start, end),
                },
            });
        any.or(numeric).labelled("address")
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{AddressAstNode, BreakpointScriptAst};

    #[test]
    fn parse_empty_script() {
        let ast = BreakpointScriptAst::parse_source("").unwrap();
        assert!(ast.statements.is_empty());
        let ast =
            BreakpointScriptAst::parse_source("\n; nothing here\n\n").unwrap();
        assert!(ast.statements.is_empty());
    }

    #[test]
    fn parse_statements() {
        let source = "break snes prg_rom x $8000\n\n\
                      break spc spc_ram rw $00f0 - $00ff disabled mark\n\
                      break gameboy gameboy_memory w * if \"a > 3\"";
        let ast = BreakpointScriptAst::parse_source(source).unwrap();
        assert_eq!(ast.statements.len(), 3);

        let stmt = &ast.statements[0];
        assert_eq!(stmt.cpu.name, "snes");
        assert_eq!(stmt.memory.name, "prg_rom");
        assert_eq!(stmt.flags.name, "x");
        assert_eq!(stmt.address.node, AddressAstNode::Single(0x8000));
        assert!(stmt.attrs.is_empty());
        assert!(stmt.condition.is_none());
        assert_eq!(stmt.span.byte_range(), 0..26);

        let stmt = &ast.statements[1];
        match stmt.address.node {
            AddressAstNode::Range(start, end) => {
                assert_eq!((start.value, end.value), (0xf0, 0xff));
            }
            node => panic!("unexpected address: {node:?}"),
        }
        let attrs: Vec<&str> =
            stmt.attrs.iter().map(|attr| attr.name.as_str()).collect();
        assert_eq!(attrs, vec!["disabled", "mark"]);

        let stmt = &ast.statements[2];
        assert_eq!(stmt.address.node, AddressAstNode::Any);
        let condition = stmt.condition.as_ref().unwrap();
        assert_eq!(condition.value.as_ref().unwrap().value, "a > 3");
        assert_eq!(condition.span().byte_range(), 110..120);
    }

    #[test]
    fn missing_address() {
        let errors =
            BreakpointScriptAst::parse_source("break snes prg_rom x\n")
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unexpected linebreak");
        assert_eq!(errors[0].span.byte_range(), 20..21);
    }

    #[test]
    fn if_without_condition_string() {
        let ast =
            BreakpointScriptAst::parse_source("break snes prg_rom x 5 if\n")
                .unwrap();
        let condition = ast.statements[0].condition.as_ref().unwrap();
        assert_eq!(condition.keyword_span.byte_range(), 23..25);
        assert!(condition.value.is_none());
        assert_eq!(ast.statements[0].span.byte_range(), 0..25);
    }

    #[test]
    fn condition_must_be_a_string() {
        let errors =
            BreakpointScriptAst::parse_source("break snes prg_rom x 5 if 7")
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unexpected int literal");
        assert_eq!(errors[0].span.byte_range(), 26..27);
    }

    #[test]
    fn statement_must_start_with_break() {
        let errors =
            BreakpointScriptAst::parse_source("watch snes prg_rom x 5\n")
                .unwrap_err();
        assert_eq!(errors[0].message, "unexpected identifier");
        assert_eq!(errors[0].span.byte_range(), 0..5);
    }

    #[test]
    fn lexer_errors_are_reported() {
        let errors =
            BreakpointScriptAst::parse_source("break snes prg_rom x @ #\n")
                .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}

//===========================================================================//
