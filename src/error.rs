use std::{fmt, sync::Arc};

use logos::Span;
use miette::{Diagnostic, SourceCode};
use thiserror::Error;

/// An error that may occur while parsing a protobuf source file.
///
/// Parsing stops at the first failure, so no partial syntax tree is ever produced. Lexical
/// failures may be reported together, in which case the first is the primary error and the
/// remainder are available as [related](Diagnostic::related) diagnostics.
#[derive(Error, Diagnostic)]
#[error("{}", kind)]
#[diagnostic(forward(kind))]
pub struct ParseError {
    kind: ParseErrorKind,
    #[related]
    related: Vec<ParseErrorKind>,
    #[source_code]
    source_code: Arc<dyn SourceCode + Send + Sync>,
    line_col: Option<(usize, usize)>,
}

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub(crate) enum ParseErrorKind {
    #[error("invalid token")]
    InvalidToken {
        #[label("found here")]
        span: Span,
    },
    #[error("integer is too large")]
    IntegerOutOfRange {
        #[label("integer defined here")]
        span: Span,
    },
    #[error("invalid string character")]
    InvalidStringCharacters {
        #[label("invalid characters")]
        span: Span,
    },
    #[error("unterminated string")]
    UnterminatedString {
        #[label("string starts here")]
        span: Span,
    },
    #[error("invalid string escape")]
    InvalidStringEscape {
        #[label("defined here")]
        span: Span,
    },
    #[error("string is not valid utf-8")]
    InvalidUtf8String {
        #[label("defined here")]
        span: Span,
    },
    #[error("unterminated block comment")]
    UnterminatedComment {
        #[label("comment starts here")]
        span: Span,
    },
    #[error("expected {}, but found '{found}'", fmt_expected(.expected))]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected {}, but reached end of file", fmt_expected(.expected))]
    UnexpectedEof {
        expected: Vec<String>,
        #[label("file ends here")]
        span: Span,
    },
    #[error("multiple package names specified")]
    DuplicatePackage {
        #[label("first defined here")]
        first: Span,
        #[label("defined again here")]
        second: Span,
    },
    #[error("file is too large")]
    #[diagnostic(help("the maximum file length is 2,147,483,647 bytes"))]
    FileTooLarge,
}

impl ParseErrorKind {
    fn span(&self) -> Option<Span> {
        match self {
            ParseErrorKind::InvalidToken { span }
            | ParseErrorKind::IntegerOutOfRange { span }
            | ParseErrorKind::InvalidStringCharacters { span }
            | ParseErrorKind::UnterminatedString { span }
            | ParseErrorKind::InvalidStringEscape { span }
            | ParseErrorKind::InvalidUtf8String { span }
            | ParseErrorKind::UnterminatedComment { span }
            | ParseErrorKind::UnexpectedToken { span, .. }
            | ParseErrorKind::UnexpectedEof { span, .. } => Some(span.clone()),
            ParseErrorKind::DuplicatePackage { second, .. } => Some(second.clone()),
            ParseErrorKind::FileTooLarge => None,
        }
    }

    fn is_lexical(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::InvalidToken { .. }
                | ParseErrorKind::IntegerOutOfRange { .. }
                | ParseErrorKind::InvalidStringCharacters { .. }
                | ParseErrorKind::UnterminatedString { .. }
                | ParseErrorKind::InvalidStringEscape { .. }
                | ParseErrorKind::InvalidUtf8String { .. }
                | ParseErrorKind::UnterminatedComment { .. }
        )
    }
}

impl ParseError {
    pub(crate) fn new(mut related: Vec<ParseErrorKind>, source: &str) -> Self {
        debug_assert!(!related.is_empty());
        let kind = related.remove(0);
        let line_col = kind.span().map(|span| line_col(source, span.start));
        ParseError {
            kind,
            related,
            source_code: Arc::new(source.to_owned()),
            line_col,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(mut self) -> Vec<ParseErrorKind> {
        self.related.insert(0, self.kind);
        self.related
    }

    /// Returns `true` if no token could be matched at some position in the input.
    pub fn is_lexical(&self) -> bool {
        self.kind.is_lexical()
    }

    /// Returns `true` if the input was tokenized successfully, but the tokens do not form a valid
    /// file.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::UnexpectedToken { .. }
                | ParseErrorKind::UnexpectedEof { .. }
                | ParseErrorKind::DuplicatePackage { .. }
        )
    }

    /// Gets the primary source code span associated with this error, if any.
    ///
    /// For syntax errors this is the furthest position any grammar alternative reached.
    pub fn span(&self) -> Option<Span> {
        self.kind.span()
    }

    /// Gets the 1-based line and column of the start of [`span()`](ParseError::span).
    pub fn line_col(&self) -> Option<(usize, usize)> {
        self.line_col
    }

    /// The set of tokens or constructs the parser would have accepted at the failure position.
    pub fn expected(&self) -> &[String] {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. }
            | ParseErrorKind::UnexpectedEof { expected, .. } => expected,
            _ => &[],
        }
    }

    /// Override the source code for this error.
    ///
    /// This may be used to include the file name in the error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use miette::NamedSource;
    /// # use proto_idl::{parse, ast::File, ParseError};
    /// #
    /// fn parse_with_name(file_name: String, source: String) -> Result<File, ParseError> {
    ///     parse(&source).map_err(|err| err.with_source_code(NamedSource::new(file_name, source)))
    /// }
    /// ```
    pub fn with_source_code<S>(self, source: S) -> Self
    where
        S: SourceCode + Send + Sync + 'static,
    {
        ParseError {
            kind: self.kind,
            related: self.related,
            source_code: Arc::new(source),
            line_col: self.line_col,
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((line, column)) = self.line_col() {
            write!(f, "{}:{}: ", line, column)?;
        }

        write!(f, "{}", self)
    }
}

/// Columns are counted in characters.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    (line, before[line_start..].chars().count() + 1)
}

fn fmt_expected(expected: &[String]) -> String {
    match expected {
        [] => "a valid declaration".to_owned(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
