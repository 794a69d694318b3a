use super::*;

fn ident(text: &str) -> Token<'_> {
    Token::Word(Word::Ident(text))
}

fn keyword(keyword: Keyword) -> Token<'static> {
    Token::Word(Word::Keyword(keyword))
}

#[test]
fn simple_tokens() {
    let source = r#"hell0 42 -7 0x2A -0x10 5.5 .5 -0.42e+2 2.0e-4 true FALSE Null
        "hello \a\b\f\n\r\t\v\?\\\'\" \052 \x2a" 'hello 😀' _foo"#;
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next().unwrap(), Ok(ident("hell0")));
    assert_eq!(lexer.next().unwrap(), Ok(Token::IntLiteral(42)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::IntLiteral(-7)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::IntLiteral(42)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::IntLiteral(-16)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::FloatLiteral(5.5)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::FloatLiteral(0.5)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::FloatLiteral(-0.42e+2)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::FloatLiteral(2.0e-4)));
    assert_eq!(lexer.next().unwrap(), Ok(Token::Word(Word::Bool(true))));
    assert_eq!(lexer.next().unwrap(), Ok(Token::Word(Word::Bool(false))));
    assert_eq!(lexer.next().unwrap(), Ok(Token::Word(Word::Null)));
    assert_eq!(
        lexer.next().unwrap(),
        Ok(Token::StringLiteral(
            "hello \x07\x08\x0c\n\r\t\x0b?\\'\" * *".to_owned()
        ))
    );
    assert_eq!(
        lexer.next().unwrap(),
        Ok(Token::StringLiteral("hello 😀".to_owned()))
    );
    assert_eq!(lexer.next().unwrap(), Ok(ident("_foo")));
    assert_eq!(lexer.next(), None);

    assert_eq!(lexer.extras.errors, vec![]);
}

#[test]
fn punctuation() {
    let source = ": ; = ( ) { } [ ] < > , .";
    let tokens: Vec<_> = Token::lexer(source).collect();

    assert_eq!(
        tokens,
        vec![
            Ok(Token::Colon),
            Ok(Token::Semicolon),
            Ok(Token::Equals),
            Ok(Token::LeftParen),
            Ok(Token::RightParen),
            Ok(Token::LeftBrace),
            Ok(Token::RightBrace),
            Ok(Token::LeftBracket),
            Ok(Token::RightBracket),
            Ok(Token::LeftAngleBracket),
            Ok(Token::RightAngleBracket),
            Ok(Token::Comma),
            Ok(Token::Dot),
        ]
    );
}

#[test]
fn keywords() {
    let source = "message Foo { repeated string name = 1; }";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(keyword(Keyword::Message))));
    assert_eq!(lexer.next(), Some(Ok(ident("Foo"))));
    assert_eq!(lexer.next(), Some(Ok(Token::LeftBrace)));
    assert_eq!(lexer.next(), Some(Ok(keyword(Keyword::Repeated))));
    assert_eq!(lexer.next(), Some(Ok(keyword(Keyword::String))));
    assert_eq!(lexer.next(), Some(Ok(ident("name"))));
    assert_eq!(lexer.next(), Some(Ok(Token::Equals)));
    assert_eq!(lexer.next(), Some(Ok(Token::IntLiteral(1))));
    assert_eq!(lexer.next(), Some(Ok(Token::Semicolon)));
    assert_eq!(lexer.next(), Some(Ok(Token::RightBrace)));
    assert_eq!(lexer.next(), None);
}

#[test]
fn keyword_requires_preceding_whitespace() {
    let source = "foo.message messages ;option\tenum";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(ident("foo"))));
    assert_eq!(lexer.next(), Some(Ok(Token::Dot)));
    assert_eq!(lexer.next(), Some(Ok(ident("message"))));
    assert_eq!(lexer.next(), Some(Ok(ident("messages"))));
    assert_eq!(lexer.next(), Some(Ok(Token::Semicolon)));
    assert_eq!(lexer.next(), Some(Ok(ident("option"))));
    assert_eq!(lexer.next(), Some(Ok(keyword(Keyword::Enum))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn stream_keyword_after_paren() {
    let source = "(stream Req) (returns";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(Token::LeftParen)));
    assert_eq!(lexer.next(), Some(Ok(keyword(Keyword::Stream))));
    assert_eq!(lexer.next(), Some(Ok(ident("Req"))));
    assert_eq!(lexer.next(), Some(Ok(Token::RightParen)));
    assert_eq!(lexer.next(), Some(Ok(Token::LeftParen)));
    assert_eq!(lexer.next(), Some(Ok(ident("returns"))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn keyword_round_trip() {
    for &keyword in Keyword::ALL.iter() {
        assert_eq!(Keyword::from_text(keyword.as_str()), Some(keyword));
    }
    assert_eq!(Keyword::from_text("Message"), None);
}

#[test]
fn integer_overflow() {
    let source = "99999999999999999999999999999999999999 4";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(Token::IntLiteral(0))));
    assert_eq!(lexer.next(), Some(Ok(Token::IntLiteral(4))));
    assert_eq!(lexer.next(), None);

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::IntegerOutOfRange {
            span: 0..(source.len() - 2),
        }]
    );
}

#[test]
fn integer_bounds() {
    let source = "9223372036854775807 -9223372036854775808 9223372036854775808";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(Token::IntLiteral(i64::MAX))));
    assert_eq!(lexer.next(), Some(Ok(Token::IntLiteral(i64::MIN))));
    assert_eq!(lexer.next(), Some(Ok(Token::IntLiteral(0))));
    assert_eq!(lexer.next(), None);

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::IntegerOutOfRange { span: 41..60 }]
    );
}

#[test]
fn string_invalid_utf8() {
    let source = r#""\xff""#;
    let mut lexer = Token::lexer(source);

    assert_eq!(
        lexer.next(),
        Some(Ok(Token::StringLiteral(String::new())))
    );
    assert_eq!(lexer.next(), None);

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::InvalidUtf8String { span: 0..6 }]
    );
}

#[test]
fn string_unterminated() {
    let source = r#""a"#;
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(Token::StringLiteral("a".to_owned()))));
    assert_eq!(lexer.next(), None);

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::UnterminatedString { span: 0..2 }]
    );
}

#[test]
fn string_unterminated_at_newline() {
    let source = "\"ab\nfoo";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(Token::StringLiteral("ab".to_owned()))));
    assert_eq!(lexer.next(), Some(Ok(ident("foo"))));
    assert_eq!(lexer.next(), None);

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::UnterminatedString { span: 0..3 }]
    );
}

#[test]
fn string_mismatched_quotes() {
    let source = r#"'say "hi"' "it's""#;
    let mut lexer = Token::lexer(source);

    assert_eq!(
        lexer.next(),
        Some(Ok(Token::StringLiteral("say \"hi\"".to_owned())))
    );
    assert_eq!(
        lexer.next(),
        Some(Ok(Token::StringLiteral("it's".to_owned())))
    );
    assert_eq!(lexer.next(), None);

    assert_eq!(lexer.extras.errors, vec![]);
}

#[test]
fn merge_string_errors() {
    let source = "\"\\\x00\" foo";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(Token::StringLiteral(String::new()))));
    assert_eq!(lexer.next(), Some(Ok(ident("foo"))));
    assert_eq!(lexer.next(), None);

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::InvalidStringEscape { span: 1..3 }]
    );
}

#[test]
fn string_unicode_escape() {
    let source = r"'hello \U0001f600'";
    let mut lexer = Token::lexer(source);

    assert_eq!(
        lexer.next(),
        Some(Ok(Token::StringLiteral("hello 😀".to_owned())))
    );
    assert_eq!(lexer.next(), None);

    assert_eq!(lexer.extras.errors, vec![]);
}

#[test]
fn string_invalid_unicode_escape() {
    let mut lexer = Token::lexer(r"'\Uffffffff'");
    lexer.by_ref().for_each(drop);
    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::InvalidStringEscape { span: 1..11 }]
    );
}

#[test]
fn line_comment() {
    let source = "foo // bar \n quz";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(ident("foo"))));
    assert_eq!(
        lexer.next(),
        Some(Ok(Token::LineComment(LineComment {
            text: "bar",
            trailing: true,
        })))
    );
    assert_eq!(lexer.next(), Some(Ok(ident("quz"))));
    assert_eq!(lexer.next(), None);

    assert_eq!(lexer.extras.errors, vec![]);
}

#[test]
fn line_comment_leading() {
    let source = "foo;\n   /// doc\r\n//\n";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(ident("foo"))));
    assert_eq!(lexer.next(), Some(Ok(Token::Semicolon)));
    assert_eq!(
        lexer.next(),
        Some(Ok(Token::LineComment(LineComment {
            text: "doc",
            trailing: false,
        })))
    );
    assert_eq!(
        lexer.next(),
        Some(Ok(Token::LineComment(LineComment {
            text: "",
            trailing: false,
        })))
    );
    assert_eq!(lexer.next(), None);
}

#[test]
fn block_comment() {
    let source = "foo /* bar\n */ quz";
    let mut lexer = Token::lexer(source);

    assert_eq!(lexer.next(), Some(Ok(ident("foo"))));
    assert_eq!(lexer.next(), Some(Ok(Token::BlockComment("bar".to_owned()))));
    assert_eq!(lexer.next(), Some(Ok(ident("quz"))));
    assert_eq!(lexer.next(), None);

    assert_eq!(lexer.extras.errors, vec![]);
}

#[test]
fn block_comment_multiline() {
    let source = "/**\n * foo\n * bar\n   quz\n **/";
    let mut lexer = Token::lexer(source);

    assert_eq!(
        lexer.next(),
        Some(Ok(Token::BlockComment("foo\nbar\nquz".to_owned())))
    );
    assert_eq!(lexer.next(), None);

    assert_eq!(lexer.extras.errors, vec![]);
}

#[test]
fn block_comment_unterminated() {
    let source = "foo /* bar\n quz";
    let mut lexer = Token::lexer(source);

    for _ in &mut lexer {}

    assert_eq!(
        lexer.extras.errors,
        vec![ParseErrorKind::UnterminatedComment { span: 4..15 }]
    );
}

#[test]
fn tokenize_skips_whitespace() {
    let tokens = tokenize("a\n\t.b").unwrap();

    assert_eq!(
        tokens,
        vec![(ident("a"), 0..1), (Token::Dot, 3..4), (ident("b"), 4..5)]
    );
}

#[test]
fn tokenize_merges_invalid_tokens() {
    let errors = tokenize("foo @@# bar ^").unwrap_err();

    assert_eq!(
        errors,
        vec![
            ParseErrorKind::InvalidToken { span: 4..7 },
            ParseErrorKind::InvalidToken { span: 12..13 },
        ]
    );
}

#[test]
fn lone_minus_is_invalid() {
    let errors = tokenize("- 1").unwrap_err();

    assert_eq!(errors, vec![ParseErrorKind::InvalidToken { span: 0..1 }]);
}
