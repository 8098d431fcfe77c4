use super::types::{ParseError, SrcSpan};
use logos::{self, Logos};

//===========================================================================//

#[derive(Clone, Debug, Default, PartialEq)]
enum LexerError {
    #[default]
    InvalidToken,
    MalformedInt,
    IntOutOfRange,
    InvalidEscape(char),
}

impl LexerError {
    fn message(&self, slice: &str) -> String {
        match self {
            LexerError::InvalidToken if slice.starts_with('"') => {
                "unterminated string literal".to_string()
            }
            LexerError::InvalidToken if slice.starts_with('\\') => {
                "backslash must come at the end of a line".to_string()
            }
            LexerError::InvalidToken => {
                format!("unexpected character(s): {slice:?}")
            }
            LexerError::MalformedInt => {
                format!("malformed integer literal: {slice}")
            }
            LexerError::IntOutOfRange => {
                format!("integer literal out of range: {slice}")
            }
            LexerError::InvalidEscape(chr) => {
                format!("invalid escape sequence in string: \\{chr}")
            }
        }
    }
}

//===========================================================================//

fn radix_literal_callback(
    lexer: &mut logos::Lexer<TokenKind>,
    prefix_len: usize,
    radix: u32,
) -> Result<u32, LexerError> {
    let digits = &lexer.slice()[prefix_len..];
    if digits.is_empty() || !digits.chars().all(|chr| chr.is_digit(radix)) {
        return Err(LexerError::MalformedInt);
    }
    u32::from_str_radix(digits, radix).map_err(|_| LexerError::IntOutOfRange)
}

fn string_literal_callback(
    lexer: &mut logos::Lexer<TokenKind>,
) -> Result<String, LexerError> {
    let slice = lexer.slice();
    let body = &slice[1..slice.len() - 1];
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(chr) = chars.next() {
        if chr != '\\' {
            value.push(chr);
            continue;
        }
        match chars.next() {
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some(other) => return Err(LexerError::InvalidEscape(other)),
            None => return Err(LexerError::InvalidToken),
        }
    }
    Ok(value)
}

#[derive(Debug, Eq, Logos, PartialEq)]
#[logos(error = LexerError)]
#[logos(skip r"[ \t\r]+")] // whitespace
#[logos(skip r";[^\n]*")] // comments
#[logos(skip r"\\[ \t\r]*(;[^\n]*)?\n")] // line continuations
enum TokenKind {
    #[token("*")]
    Asterisk,
    #[token("-")]
    Hyphen,
    #[regex(r"[_A-Za-z][_A-Za-z0-9]*")]
    Identifier,
    #[regex(r"\$[0-9A-Za-z_]*", |lex| radix_literal_callback(lex, 1, 16))]
    #[regex(r"0[xX][0-9A-Za-z_]*", |lex| radix_literal_callback(lex, 2, 16))]
    #[regex(r"[0-9]+", |lex| radix_literal_callback(lex, 0, 10))]
    IntLiteral(u32),
    #[token("\n")]
    Linebreak,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, string_literal_callback)]
    StrLiteral(String),
}

impl TokenKind {
    fn into_token(self, lexer: &logos::Lexer<TokenKind>) -> Token {
        let value = match self {
            TokenKind::Asterisk => TokenValue::Asterisk,
            TokenKind::Hyphen => TokenValue::Hyphen,
            TokenKind::Identifier => {
                TokenValue::Identifier(lexer.slice().to_string())
            }
            TokenKind::IntLiteral(value) => TokenValue::IntLiteral(value),
            TokenKind::Linebreak => TokenValue::Linebreak,
            TokenKind::StrLiteral(value) => TokenValue::StrLiteral(value),
        };
        Token { span: SrcSpan::from_byte_range(lexer.span()), value }
    }
}

//===========================================================================//

/// The contents of a single lexical token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenValue {
    /// A "`*`" symbol.
    Asterisk,
    /// A "`-`" symbol.
    Hyphen,
    /// An identifier or keyword.
    Identifier(String),
    /// An integer literal.
    IntLiteral(u32),
    /// A linebreak (that wasn't suppressed by a trailing backslash).
    Linebreak,
    /// A string literal, with escape sequences already resolved.
    StrLiteral(String),
}

impl TokenValue {
    /// Returns the human-readable name for this kind of token.
    pub fn name(&self) -> &'static str {
        match self {
            TokenValue::Asterisk => "asterisk",
            TokenValue::Hyphen => "hyphen",
            TokenValue::Identifier(_) => "identifier",
            TokenValue::IntLiteral(_) => "int literal",
            TokenValue::Linebreak => "linebreak",
            TokenValue::StrLiteral(_) => "string literal",
        }
    }
}

//===========================================================================//

/// A single lexical token, including location information.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The location of the token in the script.
    pub span: SrcSpan,
    /// The contents of the token.
    pub value: TokenValue,
}

//===========================================================================//

/// A lexer for tokenizing a breakpoint script.
pub struct TokenLexer<'a> {
    lexer: logos::Lexer<'a, TokenKind>,
}

impl<'a> TokenLexer<'a> {
    /// Constructs a new lexer in its initial state.
    pub fn new(source: &'a str) -> TokenLexer<'a> {
        TokenLexer { lexer: TokenKind::lexer(source) }
    }
}

impl Iterator for TokenLexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Result<Token, ParseError>> {
        match self.lexer.next()? {
            Ok(kind) => Some(Ok(kind.into_token(&self.lexer))),
            Err(error) => {
                let span = SrcSpan::from_byte_range(self.lexer.span());
                let message = error.message(self.lexer.slice());
                Some(Err(ParseError::new(span, message)))
            }
        }
    }
}

//===========================================================================//


//===========================================================================//
