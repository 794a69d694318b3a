//! Parsing of protobuf interface definition files into a typed syntax tree.
//!
//! See the documentation for [`parse()`] for details.
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/proto-idl/0.1.0/")]

pub mod ast;
mod error;
mod lex;
mod parse;

pub use crate::error::ParseError;

use crate::error::ParseErrorKind;

const MAX_FILE_LEN: usize = i32::MAX as usize;

/// Parses a single proto2 or proto3 source file into a syntax tree.
///
/// This function only looks at the syntax of the file. Type names are kept as written and
/// imports are not resolved. Comments are kept alongside the declarations they precede, and a
/// comment on the same line after a declaration is attached to that declaration.
///
/// No partial tree is returned: any lexical or syntax error fails the whole parse.
///
/// # Examples
///
/// ```
/// # use proto_idl::{parse, ast::{Comment, FieldType, MessageField}};
/// #
/// let source = r#"
///     syntax = "proto3";
///     package example;
///
///     // A person.
///     message Person {
///         string name = 1;
///         int32 id = 2; // unique
///     }
/// "#;
/// let file = parse(source).unwrap();
/// assert_eq!(file.syntax.value, "proto3");
/// assert_eq!(file.package.as_ref().unwrap().name, "example");
///
/// let person = file.messages().next().unwrap();
/// assert_eq!(person.name, "Person");
/// assert_eq!(person.comments, vec![Comment::new("A person.")]);
///
/// match &person.fields[1] {
///     MessageField::Field(field) => {
///         assert_eq!(field.ty, FieldType::Int32);
///         assert_eq!(field.name, "id");
///         assert_eq!(field.number, 2);
///         assert_eq!(field.comments, vec![Comment::new("unique")]);
///     }
///     _ => unreachable!(),
/// }
/// ```
pub fn parse(source: &str) -> Result<ast::File, ParseError> {
    if source.len() > MAX_FILE_LEN {
        return Err(ParseError::new(vec![ParseErrorKind::FileTooLarge], source));
    }

    parse::parse(source).map_err(|errors| ParseError::new(errors, source))
}
