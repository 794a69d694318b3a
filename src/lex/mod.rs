#[cfg(test)]
mod tests;

use std::fmt;

use logos::{Lexer, Logos, Span};

use crate::error::ParseErrorKind;

#[derive(Debug, Clone, Logos, PartialEq)]
#[logos(extras = TokenExtras)]
#[logos(skip r"[\t\n\v\f\r ]+")]
#[logos(subpattern exponent = r"[eE][+\-]?[0-9]+")]
pub(crate) enum Token<'a> {
    #[regex("[A-Za-z_][A-Za-z0-9_]*", word)]
    Word(Word<'a>),
    #[regex("-?[0-9]+", |lex| int(lex, 10, 0))]
    #[regex("-?0[xX][0-9A-Fa-f]+", |lex| int(lex, 16, 2))]
    IntLiteral(i64),
    #[regex(r#"-?[0-9]*\.[0-9]+(?&exponent)?"#, float)]
    FloatLiteral(f64),
    #[regex(r#"'|""#, string)]
    StringLiteral(String),
    #[token(".")]
    Dot,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("<")]
    LeftAngleBracket,
    #[token(">")]
    RightAngleBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[regex(r#"//[^\n]*"#, line_comment)]
    LineComment(LineComment<'a>),
    #[token(r#"/*"#, block_comment)]
    BlockComment(String),
}

/// An identifier-shaped token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Word<'a> {
    Ident(&'a str),
    Keyword(Keyword),
    Bool(bool),
    Null,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct LineComment<'a> {
    pub text: &'a str,
    /// Whether the comment follows another token on the same line.
    pub trailing: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Keyword {
    Syntax,
    Package,
    Import,
    Weak,
    Public,
    Option,
    Message,
    Enum,
    Service,
    Rpc,
    Returns,
    Stream,
    Repeated,
    Optional,
    Required,
    Reserved,
    Extensions,
    Extend,
    Map,
    Oneof,
    To,
    Max,
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Any,
}

impl Keyword {
    const ALL: [Keyword; 38] = [
        Keyword::Syntax,
        Keyword::Package,
        Keyword::Import,
        Keyword::Weak,
        Keyword::Public,
        Keyword::Option,
        Keyword::Message,
        Keyword::Enum,
        Keyword::Service,
        Keyword::Rpc,
        Keyword::Returns,
        Keyword::Stream,
        Keyword::Repeated,
        Keyword::Optional,
        Keyword::Required,
        Keyword::Reserved,
        Keyword::Extensions,
        Keyword::Extend,
        Keyword::Map,
        Keyword::Oneof,
        Keyword::To,
        Keyword::Max,
        Keyword::Double,
        Keyword::Float,
        Keyword::Int32,
        Keyword::Int64,
        Keyword::Uint32,
        Keyword::Uint64,
        Keyword::Sint32,
        Keyword::Sint64,
        Keyword::Fixed32,
        Keyword::Fixed64,
        Keyword::Sfixed32,
        Keyword::Sfixed64,
        Keyword::Bool,
        Keyword::String,
        Keyword::Bytes,
        Keyword::Any,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Syntax => "syntax",
            Keyword::Package => "package",
            Keyword::Import => "import",
            Keyword::Weak => "weak",
            Keyword::Public => "public",
            Keyword::Option => "option",
            Keyword::Message => "message",
            Keyword::Enum => "enum",
            Keyword::Service => "service",
            Keyword::Rpc => "rpc",
            Keyword::Returns => "returns",
            Keyword::Stream => "stream",
            Keyword::Repeated => "repeated",
            Keyword::Optional => "optional",
            Keyword::Required => "required",
            Keyword::Reserved => "reserved",
            Keyword::Extensions => "extensions",
            Keyword::Extend => "extend",
            Keyword::Map => "map",
            Keyword::Oneof => "oneof",
            Keyword::To => "to",
            Keyword::Max => "max",
            Keyword::Double => "double",
            Keyword::Float => "float",
            Keyword::Int32 => "int32",
            Keyword::Int64 => "int64",
            Keyword::Uint32 => "uint32",
            Keyword::Uint64 => "uint64",
            Keyword::Sint32 => "sint32",
            Keyword::Sint64 => "sint64",
            Keyword::Fixed32 => "fixed32",
            Keyword::Fixed64 => "fixed64",
            Keyword::Sfixed32 => "sfixed32",
            Keyword::Sfixed64 => "sfixed64",
            Keyword::Bool => "bool",
            Keyword::String => "string",
            Keyword::Bytes => "bytes",
            Keyword::Any => "any",
        }
    }

    pub fn from_text(text: &str) -> Option<Keyword> {
        Keyword::ALL
            .iter()
            .copied()
            .find(|keyword| keyword.as_str() == text)
    }

    /// A keyword is only recognized at the start of the input or after whitespace. `stream` may
    /// also directly follow `(`.
    fn is_allowed_after(self, prev: Option<char>) -> bool {
        match prev {
            None => true,
            Some(ch) if ch.is_whitespace() => true,
            Some('(') => self == Keyword::Stream,
            Some(_) => false,
        }
    }
}

impl<'a> Word<'a> {
    /// The text of the word as it appeared in the source.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Word::Ident(text) => text,
            Word::Keyword(keyword) => keyword.as_str(),
            Word::Bool(true) => "true",
            Word::Bool(false) => "false",
            Word::Null => "null",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{}", word.as_str()),
            Token::IntLiteral(value) => write!(f, "{}", value),
            Token::FloatLiteral(value) => {
                if value.fract() == 0.0 {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Token::StringLiteral(value) => write!(f, "{:?}", value),
            Token::Dot => write!(f, "."),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftAngleBracket => write!(f, "<"),
            Token::RightAngleBracket => write!(f, ">"),
            Token::Comma => write!(f, ","),
            Token::Equals => write!(f, "="),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::LineComment(comment) => write!(f, "//{}", comment.text),
            Token::BlockComment(text) => write!(f, "/*{}*/", text),
        }
    }
}

#[derive(Default)]
pub(crate) struct TokenExtras {
    pub errors: Vec<ParseErrorKind>,
}

/// Splits the source into tokens, discarding whitespace.
///
/// All lexical errors are collected before returning, so the caller can report every invalid
/// token in the file at once.
pub(crate) fn tokenize(source: &str) -> Result<Vec<(Token<'_>, Span)>, Vec<ParseErrorKind>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                match lexer.extras.errors.last_mut() {
                    Some(ParseErrorKind::InvalidToken { span: err_span })
                        if err_span.end == span.start =>
                    {
                        err_span.end = span.end;
                    }
                    _ => lexer
                        .extras
                        .errors
                        .push(ParseErrorKind::InvalidToken { span }),
                }
            }
        }
    }

    if lexer.extras.errors.is_empty() {
        Ok(tokens)
    } else {
        Err(lexer.extras.errors)
    }
}

fn word<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Word<'a> {
    let text = lex.slice();
    if text.eq_ignore_ascii_case("true") {
        return Word::Bool(true);
    } else if text.eq_ignore_ascii_case("false") {
        return Word::Bool(false);
    } else if text.eq_ignore_ascii_case("null") {
        return Word::Null;
    }

    let prev = lex.source()[..lex.span().start].chars().next_back();
    match Keyword::from_text(text) {
        Some(keyword) if keyword.is_allowed_after(prev) => Word::Keyword(keyword),
        _ => Word::Ident(text),
    }
}

fn int<'a>(lex: &mut Lexer<'a, Token<'a>>, radix: u32, prefix_len: usize) -> i64 {
    let (negative, digits) = match lex.slice().strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, lex.slice()),
    };
    debug_assert!(digits.len() > prefix_len);

    let value = u64::from_str_radix(&digits[prefix_len..], radix)
        .ok()
        .and_then(|magnitude| {
            let magnitude = i128::from(magnitude);
            i64::try_from(if negative { -magnitude } else { magnitude }).ok()
        });

    match value {
        Some(value) => value,
        None => {
            lex.extras
                .errors
                .push(ParseErrorKind::IntegerOutOfRange { span: lex.span() });
            Default::default()
        }
    }
}

fn float<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Result<f64, ()> {
    lex.slice().parse().map_err(drop)
}

fn string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> String {
    #[derive(Logos)]
    #[logos(subpattern hex = r"[0-9A-Fa-f]")]
    enum Component<'a> {
        #[regex(r#"[^\x00\n\\'"]+"#)]
        Unescaped(&'a str),
        #[regex(r#"['"]"#, terminator)]
        Terminator(u8),
        #[regex(r#"\\[xX](?&hex)(?&hex)?"#, hex_escape)]
        #[regex(r#"\\[0-7][0-7]?[0-7]?"#, oct_escape)]
        #[regex(r#"\\[abfnrtv?\\'"]"#, char_escape)]
        Byte(u8),
        #[regex(r#"\\u(?&hex)(?&hex)(?&hex)(?&hex)"#, unicode_escape)]
        #[regex(
            r#"\\U(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)"#,
            unicode_escape
        )]
        Char(char),
    }

    fn terminator<'a>(lex: &mut Lexer<'a, Component<'a>>) -> u8 {
        debug_assert_eq!(lex.slice().len(), 1);
        lex.slice().as_bytes()[0]
    }

    fn hex_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Result<u8, ()> {
        u8::from_str_radix(&lex.slice()[2..], 16).map_err(drop)
    }

    fn oct_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Result<u8, ()> {
        u32::from_str_radix(&lex.slice()[1..], 8)
            .map_err(drop)?
            .try_into()
            .map_err(drop)
    }

    fn char_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Option<u8> {
        match lex.slice().as_bytes()[1] {
            b'a' => Some(b'\x07'),
            b'b' => Some(b'\x08'),
            b'f' => Some(b'\x0c'),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(b'\x0b'),
            b'?' => Some(b'?'),
            b'\\' => Some(b'\\'),
            b'\'' => Some(b'\''),
            b'"' => Some(b'"'),
            _ => None,
        }
    }

    fn unicode_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Option<char> {
        let value = u32::from_str_radix(&lex.slice()[2..], 16).ok()?;
        char::from_u32(value)
    }

    let mut result = Vec::new();

    let mut char_lexer = Component::lexer(lex.remainder());
    let terminator = lex.slice().as_bytes()[0];

    loop {
        match char_lexer.next() {
            Some(Ok(Component::Unescaped(s))) => result.extend_from_slice(s.as_bytes()),
            Some(Ok(Component::Terminator(t))) if t == terminator => {
                break;
            }
            Some(Ok(Component::Terminator(ch) | Component::Byte(ch))) => result.push(ch),
            Some(Ok(Component::Char(ch))) => {
                let mut buf = [0; 4];
                result.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Some(Err(())) => {
                let start = lex.span().end + char_lexer.span().start;
                let end = lex.span().end + char_lexer.span().end;

                if char_lexer.slice().contains('\n') {
                    lex.extras.errors.push(ParseErrorKind::UnterminatedString {
                        span: lex.span().start..start,
                    });
                    break;
                }

                match lex.extras.errors.last_mut() {
                    Some(
                        ParseErrorKind::InvalidStringCharacters { span: err_span }
                        | ParseErrorKind::InvalidStringEscape { span: err_span },
                    ) if err_span.end == start => {
                        err_span.end = end;
                    }
                    _ if char_lexer.slice().starts_with('\\') => {
                        lex.extras
                            .errors
                            .push(ParseErrorKind::InvalidStringEscape { span: start..end });
                    }
                    _ => {
                        lex.extras
                            .errors
                            .push(ParseErrorKind::InvalidStringCharacters { span: start..end });
                    }
                }
            }
            None => {
                lex.extras.errors.push(ParseErrorKind::UnterminatedString {
                    span: lex.span().start..lex.source().len(),
                });
                break;
            }
        }
    }

    let start = lex.span().start;
    lex.bump(char_lexer.span().end);

    match String::from_utf8(result) {
        Ok(value) => value,
        Err(_) => {
            lex.extras.errors.push(ParseErrorKind::InvalidUtf8String {
                span: start..lex.span().end,
            });
            String::new()
        }
    }
}

fn line_comment<'a>(lex: &mut Lexer<'a, Token<'a>>) -> LineComment<'a> {
    let text = lex.slice().trim_start_matches('/').trim();

    let before = &lex.source()[..lex.span().start];
    let trailing = before
        .chars()
        .rev()
        .find(|ch| !matches!(ch, ' ' | '\t' | '\x0b' | '\x0c' | '\r'))
        .map_or(false, |ch| ch != '\n');

    LineComment { text, trailing }
}

fn block_comment<'a>(lex: &mut Lexer<'a, Token<'a>>) -> String {
    let (body, len) = match lex.remainder().find("*/") {
        Some(end) => (&lex.remainder()[..end], end + 2),
        None => {
            lex.extras.errors.push(ParseErrorKind::UnterminatedComment {
                span: lex.span().start..lex.source().len(),
            });
            (lex.remainder(), lex.remainder().len())
        }
    };

    let text = block_comment_text(body);
    lex.bump(len);
    text
}

/// Strips decorative asterisks from the body of a block comment: runs of `*` against either
/// delimiter, and a single `*` at the start of each continuation line.
fn block_comment_text(body: &str) -> String {
    let body = body.trim_start_matches('*').trim_end_matches('*');

    let lines: Vec<&str> = body
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let line = line.trim();
            if index == 0 {
                line
            } else {
                line.strip_prefix('*').map_or(line, str::trim_start)
            }
        })
        .collect();

    lines.join("\n").trim().to_owned()
}
