//! Facilities for parsing breakpoint scripts.

mod atom;
mod lex;
mod script;
mod types;

pub use atom::{IdentifierAst, IntAst, StrAst};
pub use lex::{Token, TokenLexer, TokenValue};
pub use script::{
    AddressAst, AddressAstNode, BreakStmtAst, BreakpointScriptAst,
    ConditionAst,
};
pub use types::{
    ParseError, ParseErrorDisplay, ParseErrorLabel, ParseResult, SrcSpan,
};

//===========================================================================//
