//! A recursive-descent parser with backtracking over ordered alternatives.
//!
//! Every production is a method returning `Result<T, ()>`. A failed production records what it
//! expected at the current position and returns `Err(())`, and the nearest enclosing
//! [`alternatives`](Parser::alternatives) call restores the position and tries its next
//! alternative. If the whole file cannot be matched, the error reports the furthest position
//! any alternative reached, together with everything that was expected there.

mod reduce;

use std::cmp::Ordering;

use logos::Span;

use self::reduce::Child;
use crate::{
    ast::{self, Comment, FieldModifier, FieldType, OptionValue, ReservedRange, ReservedRangeEnd},
    error::ParseErrorKind,
    lex::{self, Keyword, Token, Word},
};

pub(crate) fn parse(source: &str) -> Result<ast::File, Vec<ParseErrorKind>> {
    let tokens = lex::tokenize(source)?;
    let mut parser = Parser::new(source, tokens);
    parser.parse_file().map_err(|err| vec![err])
}

type Production<'a, T> = fn(&mut Parser<'a>) -> Result<T, ()>;

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(Token<'a>, Span)>,
    pos: usize,
    furthest: usize,
    expected: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<(Token<'a>, Span)>) -> Self {
        Parser {
            source,
            tokens,
            pos: 0,
            furthest: 0,
            expected: Vec::new(),
        }
    }

    fn parse_file(&mut self) -> Result<ast::File, ParseErrorKind> {
        let syntax = match self.parse_syntax() {
            Ok(syntax) => syntax,
            Err(()) => return Err(self.error()),
        };

        let children = self.repeat(&[
            Self::parse_import,
            Self::parse_package,
            Self::parse_option,
            Self::parse_message,
            Self::parse_enum,
            Self::parse_service,
            Self::parse_extend,
            Self::parse_comment,
            Self::parse_empty,
        ]);

        if self.pos < self.tokens.len() {
            return Err(self.error());
        }

        reduce::file(syntax, children)
    }

    fn parse_syntax(&mut self) -> Result<ast::Syntax, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Syntax)?;
        self.expect_eq(Token::Equals)?;
        let value = self.parse_string()?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(ast::Syntax { value, comments })
    }

    fn parse_import(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Import)?;

        let modifier = if self.bump_if_keyword(Keyword::Weak) {
            Some(ast::ImportModifier::Weak)
        } else if self.bump_if_keyword(Keyword::Public) {
            Some(ast::ImportModifier::Public)
        } else {
            None
        };

        let path = reduce::import_path(&self.parse_string()?);
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Import(ast::Import {
            path,
            modifier,
            comments,
        }))
    }

    fn parse_package(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        let start = self.expect_keyword(Keyword::Package)?;
        let name = self.parse_full_ident()?;
        let end = self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Package(
            ast::Package { name, comments },
            start.start..end.end,
        ))
    }

    fn parse_option(&mut self) -> Result<Child, ()> {
        let comments = self.parse_comments();
        self.expect_keyword(Keyword::Option)?;
        let name = self.parse_option_name()?;
        self.expect_eq(Token::Equals)?;
        let value = self.parse_option_value()?;
        self.expect_eq(Token::Semicolon)?;

        let mut option = reduce::option_decl(name, value, comments);
        option.comments.extend(self.parse_trailing_comment());
        Ok(Child::Option(option))
    }

    fn parse_option_name(&mut self) -> Result<String, ()> {
        let mut name = self.parse_option_name_part(true)?;
        while self.bump_if_eq(Token::Dot) {
            name.push('.');
            name.push_str(&self.parse_option_name_part(false)?);
        }
        Ok(name)
    }

    /// Parses one segment of an option name. Parentheses around an extension name are dropped,
    /// and a leading `.` inside them is kept only for the first segment.
    fn parse_option_name_part(&mut self, first: bool) -> Result<String, ()> {
        match self.peek() {
            Some(Token::LeftParen) => {
                self.bump();
                let name = self.parse_type_name()?;
                self.expect_eq(Token::RightParen)?;
                if first {
                    Ok(name)
                } else {
                    Ok(name.trim_start_matches('.').to_owned())
                }
            }
            Some(Token::Word(_)) => self.parse_name(),
            _ => self.unexpected_token("an identifier or '('"),
        }
    }

    fn parse_option_value(&mut self) -> Result<OptionValue, ()> {
        match self.peek() {
            Some(Token::LeftBrace) => Ok(OptionValue::Aggregate(self.parse_aggregate()?)),
            _ => self.parse_constant(),
        }
    }

    fn parse_constant(&mut self) -> Result<OptionValue, ()> {
        match self.peek() {
            Some(Token::StringLiteral(_)) => Ok(OptionValue::String(self.parse_string()?)),
            Some(Token::Word(Word::Ident(_) | Word::Keyword(_))) => {
                Ok(OptionValue::Ident(self.parse_full_ident()?))
            }
            Some(token @ (Token::IntLiteral(_) | Token::FloatLiteral(_) | Token::Word(_))) => {
                let value = reduce::literal(token);
                self.bump();
                Ok(value)
            }
            _ => self.unexpected_token("a constant"),
        }
    }

    fn parse_aggregate(&mut self) -> Result<ast::OptionAggregate, ()> {
        self.expect_eq(Token::LeftBrace)?;
        let comments = self.parse_trailing_comment().into_iter().collect();
        let children = self.repeat(&[Self::parse_aggregate_entry, Self::parse_comment]);
        self.expect_eq(Token::RightBrace)?;

        Ok(reduce::aggregate(comments, children))
    }

    fn parse_aggregate_entry(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        let name = self.parse_aggregate_key()?;

        let values = match self.peek() {
            Some(Token::LeftBrace) => vec![OptionValue::Aggregate(self.parse_aggregate()?)],
            _ => {
                self.expect_eq(Token::Colon)?;
                match self.peek() {
                    Some(Token::LeftBracket) => self.parse_aggregate_list()?,
                    _ => vec![self.parse_option_value()?],
                }
            }
        };

        if !self.bump_if_eq(Token::Comma) {
            self.bump_if_eq(Token::Semicolon);
        }
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Entry(reduce::aggregate_entry(name, values, comments)))
    }

    fn parse_aggregate_key(&mut self) -> Result<String, ()> {
        match self.peek() {
            Some(Token::LeftBracket) => {
                self.bump();
                let name = self.parse_type_name()?;
                self.expect_eq(Token::RightBracket)?;
                Ok(name)
            }
            Some(Token::Word(_)) => self.parse_name(),
            _ => self.unexpected_token("an identifier or '['"),
        }
    }

    fn parse_aggregate_list(&mut self) -> Result<Vec<OptionValue>, ()> {
        self.expect_eq(Token::LeftBracket)?;

        let mut values = Vec::new();
        if !self.bump_if_eq(Token::RightBracket) {
            values.push(self.parse_option_value()?);
            while self.bump_if_eq(Token::Comma) {
                values.push(self.parse_option_value()?);
            }
            self.expect_eq(Token::RightBracket)?;
        }

        Ok(values)
    }

    fn parse_field_options(&mut self) -> Result<ast::FieldOptions, ()> {
        if !self.bump_if_eq(Token::LeftBracket) {
            return Ok(ast::FieldOptions::default());
        }

        let mut options = vec![self.parse_field_option()?];
        while self.bump_if_eq(Token::Comma) {
            options.push(self.parse_field_option()?);
        }
        self.expect_eq(Token::RightBracket)?;

        Ok(reduce::field_options(options))
    }

    fn parse_field_option(&mut self) -> Result<ast::OptionNode, ()> {
        let name = self.parse_option_name()?;
        self.expect_eq(Token::Equals)?;
        let value = self.parse_option_value()?;

        Ok(ast::OptionNode {
            name,
            value,
            comments: Vec::new(),
        })
    }

    fn parse_message(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Message)?;
        let name = self.parse_name()?;
        let children = self.parse_body(
            &mut comments,
            &[
                Self::parse_option,
                Self::parse_enum,
                Self::parse_message,
                Self::parse_oneof,
                Self::parse_map,
                Self::parse_reserved,
                Self::parse_extensions,
                Self::parse_extend,
                Self::parse_field,
                Self::parse_comment,
                Self::parse_empty,
            ],
        )?;

        let mut message = reduce::message(name, comments, children);
        message.comments.extend(self.parse_trailing_comment());
        Ok(Child::Message(message))
    }

    fn parse_field(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();

        let modifier = if self.bump_if_keyword(Keyword::Optional) {
            Some(FieldModifier::Optional)
        } else if self.bump_if_keyword(Keyword::Required) {
            Some(FieldModifier::Required)
        } else if self.bump_if_keyword(Keyword::Repeated) {
            Some(FieldModifier::Repeated)
        } else {
            None
        };

        let ty = FieldType::from_name(&self.parse_type_name()?);
        let name = self.parse_name()?;
        self.expect_eq(Token::Equals)?;
        let number = self.parse_int()?;
        let options = self.parse_field_options()?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Field(ast::Field {
            modifier,
            ty,
            name,
            number,
            options,
            comments,
        }))
    }

    fn parse_map(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Map)?;
        self.expect_eq(Token::LeftAngleBracket)?;
        let key_ty = FieldType::from_name(&self.parse_type_name()?);
        self.expect_eq(Token::Comma)?;
        let value_ty = FieldType::from_name(&self.parse_type_name()?);
        self.expect_eq(Token::RightAngleBracket)?;
        let name = self.parse_name()?;
        self.expect_eq(Token::Equals)?;
        let number = self.parse_int()?;
        let options = self.parse_field_options()?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Map(ast::MapField {
            key_ty,
            value_ty,
            name,
            number,
            options,
            comments,
        }))
    }

    fn parse_oneof(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Oneof)?;
        let name = self.parse_name()?;
        let children = self.parse_body(
            &mut comments,
            &[
                Self::parse_option,
                Self::parse_oneof_field,
                Self::parse_comment,
                Self::parse_empty,
            ],
        )?;

        let mut oneof = reduce::oneof(name, comments, children);
        oneof.comments.extend(self.parse_trailing_comment());
        Ok(Child::Oneof(oneof))
    }

    fn parse_oneof_field(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        let ty = FieldType::from_name(&self.parse_type_name()?);
        let name = self.parse_name()?;
        self.expect_eq(Token::Equals)?;
        let number = self.parse_int()?;
        let options = self.parse_field_options()?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::OneofField(ast::OneofField {
            ty,
            name,
            number,
            options,
            comments,
        }))
    }

    fn parse_reserved(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Reserved)?;
        let ranges = self.alternatives(&[Self::parse_reserved_numbers, Self::parse_reserved_names])?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Reserved(ast::Reserved { ranges, comments }))
    }

    fn parse_reserved_numbers(&mut self) -> Result<ast::ReservedRanges, ()> {
        Ok(ast::ReservedRanges::Numbers(self.parse_ranges()?))
    }

    fn parse_reserved_names(&mut self) -> Result<ast::ReservedRanges, ()> {
        let mut names = vec![self.parse_string()?];
        while self.bump_if_eq(Token::Comma) {
            names.push(self.parse_string()?);
        }
        Ok(ast::ReservedRanges::Names(names))
    }

    fn parse_extensions(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Extensions)?;
        let ranges = self.parse_ranges()?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::Extensions(ast::Extensions { ranges, comments }))
    }

    fn parse_ranges(&mut self) -> Result<Vec<ReservedRange>, ()> {
        let mut ranges = vec![self.parse_range()?];
        while self.bump_if_eq(Token::Comma) {
            ranges.push(self.parse_range()?);
        }
        Ok(ranges)
    }

    fn parse_range(&mut self) -> Result<ReservedRange, ()> {
        let start = self.parse_int()?;
        if !self.bump_if_keyword(Keyword::To) {
            return Ok(ReservedRange::Number(start));
        }

        let end = if self.bump_if_keyword(Keyword::Max) {
            ReservedRangeEnd::Max
        } else {
            match self.peek() {
                Some(&Token::IntLiteral(end)) => {
                    self.bump();
                    ReservedRangeEnd::Number(end)
                }
                _ => return self.unexpected_token("an integer or 'max'"),
            }
        };

        Ok(ReservedRange::Range { start, end })
    }

    fn parse_extend(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Extend)?;
        let extendee = self.parse_type_name()?;
        let children = self.parse_body(
            &mut comments,
            &[Self::parse_field, Self::parse_comment, Self::parse_empty],
        )?;

        let mut extend = reduce::extend(extendee, comments, children);
        extend.comments.extend(self.parse_trailing_comment());
        Ok(Child::Extend(extend))
    }

    fn parse_enum(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Enum)?;
        let name = self.parse_name()?;
        let children = self.parse_body(
            &mut comments,
            &[
                Self::parse_option,
                Self::parse_reserved,
                Self::parse_enum_field,
                Self::parse_comment,
                Self::parse_empty,
            ],
        )?;

        let mut enum_ = reduce::enum_(name, comments, children);
        enum_.comments.extend(self.parse_trailing_comment());
        Ok(Child::Enum(enum_))
    }

    fn parse_enum_field(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        let name = self.parse_name()?;
        self.expect_eq(Token::Equals)?;
        let number = self.parse_int()?;
        let options = self.parse_field_options()?;
        self.expect_eq(Token::Semicolon)?;
        comments.extend(self.parse_trailing_comment());

        Ok(Child::EnumField(ast::EnumField {
            name,
            number,
            options,
            comments,
        }))
    }

    fn parse_service(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Service)?;
        let name = self.parse_name()?;
        let children = self.parse_body(
            &mut comments,
            &[
                Self::parse_option,
                Self::parse_rpc,
                Self::parse_comment,
                Self::parse_empty,
            ],
        )?;

        let mut service = reduce::service(name, comments, children);
        service.comments.extend(self.parse_trailing_comment());
        Ok(Child::Service(service))
    }

    fn parse_rpc(&mut self) -> Result<Child, ()> {
        let mut comments = self.parse_comments();
        self.expect_keyword(Keyword::Rpc)?;
        let name = self.parse_name()?;

        self.expect_eq(Token::LeftParen)?;
        let input_type = self.alternatives(&[Self::parse_stream_type, Self::parse_unary_type])?;
        self.expect_eq(Token::RightParen)?;

        self.expect_keyword(Keyword::Returns)?;

        self.expect_eq(Token::LeftParen)?;
        let output_type = self.alternatives(&[Self::parse_stream_type, Self::parse_unary_type])?;
        self.expect_eq(Token::RightParen)?;

        let children = match self.peek() {
            Some(Token::LeftBrace) => self.parse_body(
                &mut comments,
                &[Self::parse_option, Self::parse_comment, Self::parse_empty],
            )?,
            Some(Token::Semicolon) => {
                self.bump();
                Vec::new()
            }
            _ => return self.unexpected_token("'{' or ';'"),
        };

        let mut rpc = reduce::rpc(name, input_type, output_type, comments, children);
        rpc.comments.extend(self.parse_trailing_comment());
        Ok(Child::Rpc(rpc))
    }

    fn parse_stream_type(&mut self) -> Result<ast::RpcType, ()> {
        self.expect_keyword(Keyword::Stream)?;
        Ok(ast::RpcType {
            name: self.parse_type_name()?,
            is_stream: true,
        })
    }

    fn parse_unary_type(&mut self) -> Result<ast::RpcType, ()> {
        Ok(ast::RpcType {
            name: self.parse_type_name()?,
            is_stream: false,
        })
    }

    /// Parses a brace-delimited body. A trailing comment on the line of the opening brace is
    /// added to `comments`.
    fn parse_body(
        &mut self,
        comments: &mut Vec<Comment>,
        alternatives: &[Production<'a, Child>],
    ) -> Result<Vec<Child>, ()> {
        self.expect_eq(Token::LeftBrace)?;
        comments.extend(self.parse_trailing_comment());
        let children = self.repeat(alternatives);
        self.expect_eq(Token::RightBrace)?;
        Ok(children)
    }

    fn parse_empty(&mut self) -> Result<Child, ()> {
        self.expect_eq(Token::Semicolon)?;
        Ok(Child::Empty)
    }

    /// Parses a comment which is not attached to a declaration.
    fn parse_comment(&mut self) -> Result<Child, ()> {
        self.bump_comment().map(Child::Comment).ok_or(())
    }

    fn parse_comments(&mut self) -> Vec<Comment> {
        let mut comments = Vec::new();
        while let Some(comment) = self.bump_comment() {
            comments.push(comment);
        }
        comments
    }

    /// Parses a line comment on the same line as the preceding token.
    fn parse_trailing_comment(&mut self) -> Option<Comment> {
        match self.tokens.get(self.pos) {
            Some((Token::LineComment(comment), _)) if comment.trailing => {
                let comment = Comment::new(comment.text);
                self.pos += 1;
                Some(comment)
            }
            _ => None,
        }
    }

    fn bump_comment(&mut self) -> Option<Comment> {
        let comment = match self.tokens.get(self.pos) {
            Some((Token::LineComment(comment), _)) => Comment::new(comment.text),
            Some((Token::BlockComment(text), _)) => Comment::new(text.as_str()),
            _ => return None,
        };
        self.pos += 1;
        Some(comment)
    }

    fn parse_name(&mut self) -> Result<String, ()> {
        match self.peek() {
            Some(Token::Word(_)) => {
                let span = self.bump();
                Ok(self.source[span].to_owned())
            }
            _ => self.unexpected_token("an identifier"),
        }
    }

    fn parse_full_ident(&mut self) -> Result<String, ()> {
        let parts = self.parse_name_parts()?;
        Ok(reduce::qualified_name(false, &parts))
    }

    fn parse_type_name(&mut self) -> Result<String, ()> {
        let leading_dot = self.bump_if_eq(Token::Dot);
        let parts = self.parse_name_parts()?;
        Ok(reduce::qualified_name(leading_dot, &parts))
    }

    fn parse_name_parts(&mut self) -> Result<Vec<String>, ()> {
        let mut parts = vec![self.parse_name()?];
        while self.bump_if_eq(Token::Dot) {
            parts.push(self.parse_name()?);
        }
        Ok(parts)
    }

    fn parse_int(&mut self) -> Result<i64, ()> {
        match self.peek() {
            Some(&Token::IntLiteral(value)) => {
                self.bump();
                Ok(value)
            }
            _ => self.unexpected_token("an integer"),
        }
    }

    /// Parses a string literal. Adjacent literals are concatenated.
    fn parse_string(&mut self) -> Result<String, ()> {
        let mut value = match self.peek() {
            Some(Token::StringLiteral(value)) => value.clone(),
            _ => return self.unexpected_token("a string literal"),
        };
        self.bump();

        while let Some(Token::StringLiteral(next)) = self.peek() {
            value.push_str(next);
            self.bump();
        }

        Ok(value)
    }

    /// Tries each alternative in order from the current position, returning the first success.
    fn alternatives<T>(&mut self, alternatives: &[Production<'a, T>]) -> Result<T, ()> {
        for &alternative in alternatives {
            if let Ok(value) = self.attempt(alternative) {
                return Ok(value);
            }
        }
        Err(())
    }

    /// Matches the alternatives as many times as possible.
    fn repeat<T>(&mut self, alternatives: &[Production<'a, T>]) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let start = self.pos;
            match self.alternatives(alternatives) {
                Ok(item) if self.pos > start => items.push(item),
                _ => {
                    self.pos = start;
                    return items;
                }
            }
        }
    }

    fn attempt<T>(&mut self, production: Production<'a, T>) -> Result<T, ()> {
        let start = self.pos;
        let result = production(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// The index of the next token which is not a comment. Comments are only consumed by
    /// [`bump`](Parser::bump) or the comment productions, never by lookahead.
    fn lookahead(&self) -> usize {
        let mut index = self.pos;
        while let Some((Token::LineComment(_) | Token::BlockComment(_), _)) = self.tokens.get(index)
        {
            index += 1;
        }
        index
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.lookahead()).map(|(token, _)| token)
    }

    /// Consumes the next token, dropping any comments before it.
    fn bump(&mut self) -> Span {
        let index = self.lookahead();
        let span = self.tokens[index].1.clone();
        self.pos = index + 1;
        span
    }

    fn bump_if_eq(&mut self, token: Token<'a>) -> bool {
        if self.peek() == Some(&token) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_eq(&mut self, token: Token<'a>) -> Result<Span, ()> {
        if self.peek() == Some(&token) {
            Ok(self.bump())
        } else {
            self.unexpected_token(format!("'{}'", token))
        }
    }

    /// Keywords are also accepted when they were lexed as identifiers, for example directly
    /// after a `{` or `;`.
    fn peek_keyword(&self, keyword: Keyword) -> bool {
        match self.peek() {
            Some(Token::Word(Word::Keyword(found))) => *found == keyword,
            Some(Token::Word(Word::Ident(text))) => *text == keyword.as_str(),
            _ => false,
        }
    }

    fn bump_if_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_keyword(keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ()> {
        if self.peek_keyword(keyword) {
            Ok(self.bump())
        } else {
            self.unexpected_token(format!("'{}'", keyword))
        }
    }

    fn unexpected_token<T>(&mut self, expected: impl Into<String>) -> Result<T, ()> {
        let pos = self.lookahead();
        match pos.cmp(&self.furthest) {
            Ordering::Greater => {
                self.furthest = pos;
                self.expected = vec![expected.into()];
            }
            Ordering::Equal => {
                let expected = expected.into();
                if !self.expected.contains(&expected) {
                    self.expected.push(expected);
                }
            }
            Ordering::Less => {}
        }
        Err(())
    }

    fn error(&self) -> ParseErrorKind {
        let expected = self.expected.clone();
        match self.tokens.get(self.furthest) {
            Some((_, span)) => ParseErrorKind::UnexpectedToken {
                expected,
                found: self.source[span.clone()].to_owned(),
                span: span.clone(),
            },
            None => ParseErrorKind::UnexpectedEof {
                expected,
                span: self.source.len()..self.source.len(),
            },
        }
    }
}
