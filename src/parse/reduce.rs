//! Semantic actions which turn the children matched by a production into syntax tree nodes.
//!
//! Each function here is a pure transformation of its inputs. The parser only ever passes the
//! child variants a production can match, so any other variant is a bug in the parser rather
//! than in the input.

use logos::Span;

use crate::{
    ast::{
        Comment, Definition, Enum, EnumField, EnumItem, Extend, Extensions, Field, FieldOptions,
        File, Import, MapField, Message, MessageField, Oneof, OneofField, OptionAggregate,
        OptionDecl, OptionNode, OptionValue, Package, Reserved, Rpc, RpcType, Service, Syntax,
    },
    error::ParseErrorKind,
    lex::{Token, Word},
};

/// A single child matched within the body of a file or a definition.
#[derive(Debug, PartialEq)]
pub(crate) enum Child {
    Comment(Comment),
    Empty,
    Import(Import),
    Package(Package, Span),
    Option(OptionDecl),
    Message(Message),
    Enum(Enum),
    Service(Service),
    Extend(Extend),
    Field(Field),
    Map(MapField),
    Oneof(Oneof),
    Reserved(Reserved),
    Extensions(Extensions),
    EnumField(EnumField),
    OneofField(OneofField),
    Rpc(Rpc),
    Entry(Vec<OptionNode>),
}

/// Moves comments into `comments`, discarding empty statements, and returns the remaining
/// structural children in order.
fn split_comments(children: Vec<Child>, comments: &mut Vec<Comment>) -> Vec<Child> {
    children
        .into_iter()
        .filter_map(|child| match child {
            Child::Comment(comment) => {
                comments.push(comment);
                None
            }
            Child::Empty => None,
            child => Some(child),
        })
        .collect()
}

pub(crate) fn file(syntax: Syntax, children: Vec<Child>) -> Result<File, ParseErrorKind> {
    let mut comments = Vec::new();
    let mut package: Option<(Package, Span)> = None;
    let mut imports = Vec::new();
    let mut options = Vec::new();
    let mut definitions = Vec::new();
    let mut extends = Vec::new();

    for child in split_comments(children, &mut comments) {
        match child {
            Child::Package(next, span) => match &package {
                Some((_, first)) => {
                    return Err(ParseErrorKind::DuplicatePackage {
                        first: first.clone(),
                        second: span,
                    })
                }
                None => package = Some((next, span)),
            },
            Child::Import(import) => imports.push(import),
            Child::Option(option) => options.push(option),
            Child::Message(message) => definitions.push(Definition::Message(message)),
            Child::Enum(enum_) => definitions.push(Definition::Enum(enum_)),
            Child::Service(service) => definitions.push(Definition::Service(service)),
            Child::Extend(extend) => extends.push(extend),
            child => unreachable!("unexpected child at file scope: {:?}", child),
        }
    }

    Ok(File {
        syntax,
        package: package.map(|(package, _)| package),
        imports,
        options,
        definitions,
        extends,
        comments,
    })
}

pub(crate) fn message(name: String, mut comments: Vec<Comment>, children: Vec<Child>) -> Message {
    let mut fields = Vec::new();
    let mut enums = Vec::new();
    let mut messages = Vec::new();
    let mut options = Vec::new();
    let mut extends = Vec::new();

    for child in split_comments(children, &mut comments) {
        match child {
            Child::Field(field) => fields.push(MessageField::Field(field)),
            Child::Map(map) => fields.push(MessageField::Map(map)),
            Child::Oneof(oneof) => fields.push(MessageField::Oneof(oneof)),
            Child::Reserved(reserved) => fields.push(MessageField::Reserved(reserved)),
            Child::Extensions(extensions) => fields.push(MessageField::Extensions(extensions)),
            Child::Enum(enum_) => enums.push(enum_),
            Child::Message(message) => messages.push(message),
            Child::Option(option) => options.push(option),
            Child::Extend(extend) => extends.push(extend),
            child => unreachable!("unexpected child in message: {:?}", child),
        }
    }

    Message {
        name,
        fields,
        enums,
        messages,
        options,
        extends,
        comments,
    }
}

pub(crate) fn enum_(name: String, mut comments: Vec<Comment>, children: Vec<Child>) -> Enum {
    let fields = split_comments(children, &mut comments)
        .into_iter()
        .map(|child| match child {
            Child::Option(option) => EnumItem::Option(option),
            Child::EnumField(field) => EnumItem::Field(field),
            Child::Reserved(reserved) => EnumItem::Reserved(reserved),
            child => unreachable!("unexpected child in enum: {:?}", child),
        })
        .collect();

    Enum {
        name,
        fields,
        comments,
    }
}

pub(crate) fn oneof(name: String, mut comments: Vec<Comment>, children: Vec<Child>) -> Oneof {
    let mut fields = Vec::new();
    let mut options = Vec::new();

    for child in split_comments(children, &mut comments) {
        match child {
            Child::OneofField(field) => fields.push(field),
            Child::Option(option) => options.push(option),
            child => unreachable!("unexpected child in oneof: {:?}", child),
        }
    }

    Oneof {
        name,
        fields,
        options,
        comments,
    }
}

pub(crate) fn extend(extendee: String, mut comments: Vec<Comment>, children: Vec<Child>) -> Extend {
    let fields = split_comments(children, &mut comments)
        .into_iter()
        .map(|child| match child {
            Child::Field(field) => field,
            child => unreachable!("unexpected child in extend: {:?}", child),
        })
        .collect();

    Extend {
        extendee,
        fields,
        comments,
    }
}

pub(crate) fn service(name: String, mut comments: Vec<Comment>, children: Vec<Child>) -> Service {
    let mut methods = Vec::new();
    let mut options = Vec::new();

    for child in split_comments(children, &mut comments) {
        match child {
            Child::Rpc(rpc) => methods.push(rpc),
            Child::Option(option) => options.push(option),
            child => unreachable!("unexpected child in service: {:?}", child),
        }
    }

    Service {
        name,
        methods,
        options,
        comments,
    }
}

pub(crate) fn rpc(
    name: String,
    input_type: RpcType,
    output_type: RpcType,
    mut comments: Vec<Comment>,
    children: Vec<Child>,
) -> Rpc {
    let options = split_comments(children, &mut comments)
        .into_iter()
        .map(|child| match child {
            Child::Option(option) => option,
            child => unreachable!("unexpected child in rpc: {:?}", child),
        })
        .collect();

    Rpc {
        name,
        input_type,
        output_type,
        options,
        comments,
    }
}

/// Builds an `option` statement. The entries of a brace-delimited value become the options of
/// the declaration, while a scalar value becomes a single entry named after the declaration.
pub(crate) fn option_decl(name: String, value: OptionValue, mut comments: Vec<Comment>) -> OptionDecl {
    match value {
        OptionValue::Aggregate(aggregate) => {
            comments.extend(aggregate.comments);
            OptionDecl {
                name,
                options: aggregate.options,
                comments,
            }
        }
        value => OptionDecl {
            options: vec![OptionNode {
                name: name.clone(),
                value,
                comments: Vec::new(),
            }],
            name,
            comments,
        },
    }
}

pub(crate) fn aggregate(mut comments: Vec<Comment>, children: Vec<Child>) -> OptionAggregate {
    let options = split_comments(children, &mut comments)
        .into_iter()
        .flat_map(|child| match child {
            Child::Entry(entries) => entries,
            child => unreachable!("unexpected child in option value: {:?}", child),
        })
        .collect();

    OptionAggregate { options, comments }
}

/// Builds the entries for one key of a brace-delimited value. A list value produces one entry
/// per element, and the comments go to the first of them.
pub(crate) fn aggregate_entry(
    name: String,
    values: Vec<OptionValue>,
    comments: Vec<Comment>,
) -> Vec<OptionNode> {
    let mut comments = Some(comments);
    values
        .into_iter()
        .map(|value| OptionNode {
            name: name.clone(),
            value,
            comments: comments.take().unwrap_or_default(),
        })
        .collect()
}

pub(crate) fn field_options(options: Vec<OptionNode>) -> FieldOptions {
    options.into_iter().collect()
}

/// Converts a literal token into a constant value.
pub(crate) fn literal(token: &Token<'_>) -> OptionValue {
    match token {
        Token::IntLiteral(value) => OptionValue::Int(*value),
        Token::FloatLiteral(value) => OptionValue::Float(*value),
        Token::StringLiteral(value) => OptionValue::String(value.clone()),
        Token::Word(Word::Bool(value)) => OptionValue::Bool(*value),
        Token::Word(Word::Null) => OptionValue::Null,
        Token::Word(word) => OptionValue::Ident(word.as_str().to_owned()),
        token => unreachable!("token is not a literal: {:?}", token),
    }
}

/// Joins the segments of a dotted name.
pub(crate) fn qualified_name(leading_dot: bool, parts: &[String]) -> String {
    let mut name = String::new();
    if leading_dot {
        name.push('.');
    }
    name.push_str(&parts.join("."));
    name
}

/// Collapses each run of backslashes in an import path into a single backslash.
pub(crate) fn import_path(value: &str) -> String {
    let mut path = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\\' && path.ends_with('\\') {
            continue;
        }
        path.push(ch);
    }
    path
}
