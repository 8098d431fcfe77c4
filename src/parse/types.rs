use std::fmt;
use std::ops::Range;

//===========================================================================//

/// A span of byte offsets within a breakpoint script.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SrcSpan {
    start: usize,
    end: usize,
}

impl SrcSpan {
    /// Constructs a span from the given the byte range.
    pub fn from_byte_range(range: Range<usize>) -> SrcSpan {
        assert!(range.start <= range.end);
        SrcSpan { start: range.start, end: range.end }
    }

    /// Returns the byte range represented by this span.
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Merges two spans, returning the smallest span that covers both.
    pub fn merged_with(&self, other: SrcSpan) -> SrcSpan {
        SrcSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub(crate) fn end_span(&self) -> SrcSpan {
        SrcSpan { start: self.end, end: self.end }
    }

    /// Returns the one-based line and column numbers of the start of this
    /// span within `source`.
    pub fn line_and_column(&self, source: &str) -> (usize, usize) {
        let before = &source[..self.start.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |index| index + 1);
        (line, before[line_start..].chars().count() + 1)
    }
}

//===========================================================================//

/// A specialized `Result` type for parsing operations.
pub type ParseResult<V> = Result<V, Vec<ParseError>>;

//===========================================================================//

/// An error encountered while parsing a breakpoint script.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// The primary location in the script where the error occurred.
    pub span: SrcSpan,
    /// The error message to report to the user.
    pub message: String,
    /// Any additional label annotations for this error.
    pub labels: Vec<ParseErrorLabel>,
}

impl ParseError {
    /// Constructs a parse error with the given span and message, and no
    /// labels.
    pub fn new(span: SrcSpan, message: String) -> ParseError {
        ParseError { span, message, labels: Vec::new() }
    }

    /// Adds an additional label to the error.
    pub fn with_label(mut self, span: SrcSpan, message: String) -> ParseError {
        self.labels.push(ParseErrorLabel { span, message });
        self
    }

    /// Returns an object that formats this error with line and column
    /// numbers taken from `source`.
    pub fn display<'a>(&'a self, source: &'a str) -> ParseErrorDisplay<'a> {
        ParseErrorDisplay { error: self, source }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.span.byte_range();
        write!(f, "{}..{}: {}", range.start, range.end, self.message)
    }
}

//===========================================================================//

/// An additional label annotation for a [`ParseError`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseErrorLabel {
    /// The location in the script to which the label applies.
    pub span: SrcSpan,
    /// The message to attach to the label.
    pub message: String,
}

//===========================================================================//

/// Helper for printing a [`ParseError`] against its source text.
pub struct ParseErrorDisplay<'a> {
    error: &'a ParseError,
    source: &'a str,
}

impl fmt::Display for ParseErrorDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.error.span.line_and_column(self.source);
        write!(f, "{line}:{column}: {}", self.error.message)?;
        for label in &self.error.labels {
            let (line, column) = label.span.line_and_column(self.source);
            write!(f, "\n  {line}:{column}: {}", label.message)?;
        }
        Ok(())
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{ParseError, SrcSpan};

    #[test]
    fn merge_spans() {
        let span1 = SrcSpan::from_byte_range(3..7);
        let span2 = SrcSpan::from_byte_range(5..12);
        assert_eq!(span1.merged_with(span2).byte_range(), 3..12);
        assert_eq!(span2.merged_with(span1).byte_range(), 3..12);
        assert_eq!(span1.end_span().byte_range(), 7..7);
    }

    #[test]
    fn line_and_column() {
        let source = "break\n  snes prg_rom\n";
        let span = SrcSpan::from_byte_range(0..5);
        assert_eq!(span.line_and_column(source), (1, 1));
        let span = SrcSpan::from_byte_range(8..12);
        assert_eq!(span.line_and_column(source), (2, 3));
        let span = SrcSpan::from_byte_range(21..21);
        assert_eq!(span.line_and_column(source), (3, 1));
    }

    #[test]
    fn display_error() {
        let source = "break\n  snes prg_rom\n";
        let span = SrcSpan::from_byte_range(8..12);
        let error = ParseError::new(span, "bad CPU".to_string())
            .with_label(SrcSpan::from_byte_range(0..5), "here".to_string());
        assert_eq!(error.to_string(), "8..12: bad CPU");
        assert_eq!(
            error.display(source).to_string(),
            "2:3: bad CPU\n  1:1: here"
        );
    }
}

//===========================================================================//
