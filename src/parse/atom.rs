use super::lex::{Token, TokenLexer, TokenValue};
use super::types::{ParseError, ParseResult, SrcSpan};
use chumsky::{self, Parser};

//===========================================================================//

/// The error type used for `chumsky::Parser`s in this crate.
pub(crate) type PError<'a> =
    chumsky::extra::Err<chumsky::error::Rich<'a, Token>>;

//===========================================================================//

/// An identifier (or keyword) in a breakpoint script.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentifierAst {
    /// The location in the script where the identifier appears.
    pub span: SrcSpan,
    /// The text of the identifier.
    pub name: String,
}

impl IdentifierAst {
    pub(crate) fn parser<'a>()
    -> impl Parser<'a, &'a [Token], IdentifierAst, PError<'a>> + Clone {
        chumsky::prelude::any()
            .try_map(|token: Token, span| {
                if let TokenValue::Identifier(name) = token.value {
                    Ok(IdentifierAst { name, span: token.span })
                } else {
                    Err(chumsky::error::Rich::custom(span, ""))
                }
            })
            .labelled("identifier")
    }
}

//===========================================================================//

/// An integer literal in a breakpoint script.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntAst {
    /// The location in the script where the literal appears.
    pub span: SrcSpan,
    /// The value of the literal.
    pub value: u32,
}

impl IntAst {
    pub(crate) fn parser<'a>()
    -> impl Parser<'a, &'a [Token], IntAst, PError<'a>> + Clone {
        chumsky::prelude::any()
            .try_map(|token: Token, span| {
                if let TokenValue::IntLiteral(value) = token.value {
                    Ok(IntAst { value, span: token.span })
                } else {
                    Err(chumsky::error::Rich::custom(span, ""))
                }
            })
            .labelled("int literal")
    }
}

//===========================================================================//

/// A string literal in a breakpoint script.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrAst {
    /// The location in the script where the literal appears.
    pub span: SrcSpan,
    /// The value of the literal, with escapes resolved.
    pub value: String,
}

impl StrAst {
    pub(crate) fn parser<'a>()
    -> impl Parser<'a, &'a [Token], StrAst, PError<'a>> + Clone {
        chumsky::prelude::any()
            .try_map(|token: Token, span| {
                if let TokenValue::StrLiteral(value) = token.value {
                    Ok(StrAst { value, span: token.span })
                } else {
                    Err(chumsky::error::Rich::custom(span, ""))
                }
            })
            .labelled("string literal")
    }
}

//===========================================================================//

pub(crate) fn keyword<'a>(
    word: &'static str,
) -> impl Parser<'a, &'a [Token], Token, PError<'a>> + Clone {
    chumsky::prelude::any()
        .filter(move |token: &Token| {
            matches!(&token.value, TokenValue::Identifier(id) if id == word)
        })
        .labelled(word)
}

pub(crate) fn symbol<'a>(
    value: TokenValue,
) -> impl Parser<'a, &'a [Token], Token, PError<'a>> + Clone {
    let name = value.name();
    chumsky::prelude::any()
        .filter(move |token: &Token| token.value == value)
        .labelled(name)
}

pub(crate) fn linebreak<'a>()
-> impl Parser<'a, &'a [Token], (), PError<'a>> + Clone {
    symbol(TokenValue::Linebreak).ignored()
}

/// Matches the end of a statement: either a linebreak or the end of the
/// script.
pub(crate) fn end_of_statement<'a>()
-> impl Parser<'a, &'a [Token], (), PError<'a>> + Clone {
    linebreak().or(chumsky::prelude::end())
}

//===========================================================================//

pub(crate) fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for result in TokenLexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }
    if errors.is_empty() { Ok(tokens) } else { Err(errors) }
}

/// Runs `parser` over the complete token stream, converting any syntax
/// errors into [`ParseError`]s that point at the offending token.
pub(crate) fn parse_tokens<'a, T>(
    parser: impl Parser<'a, &'a [Token], T, PError<'a>>,
    tokens: &'a [Token],
) -> ParseResult<T> {
    parser.parse(tokens).into_result().map_err(|errors| {
        errors
            .into_iter()
            .map(|error| {
                let index = error.span().start;
                let (span, found) = if let Some(token) = tokens.get(index) {
                    (token.span, token.value.name())
                } else {
                    let span = tokens
                        .last()
                        .map_or(SrcSpan::from_byte_range(0..0), |token| {
                            token.span.end_span()
                        });
                    (span, "end of script")
                };
                ParseError::new(span, format!("unexpected {found}"))
            })
            .collect()
    })
}

//===========================================================================//
