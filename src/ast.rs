//! The typed syntax tree produced by [`parse()`](crate::parse).
//!
//! Every node owns its children outright. Declarations are kept in source order within each
//! bucket, and every node that can be preceded by comments carries them in a `comments` list.

use std::{fmt, slice};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed `.proto` file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct File {
    pub syntax: Syntax,
    pub package: Option<Package>,
    pub imports: Vec<Import>,
    pub options: Vec<OptionDecl>,
    pub definitions: Vec<Definition>,
    pub extends: Vec<Extend>,
    /// Comments which are not attached to any declaration, such as those at the end of the file.
    pub comments: Vec<Comment>,
}

/// The `syntax = "...";` statement that must begin every file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Syntax {
    pub value: String,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Package {
    pub name: String,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Import {
    pub path: String,
    pub modifier: Option<ImportModifier>,
    pub comments: Vec<Comment>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImportModifier {
    Weak,
    Public,
}

/// An `option name = value;` statement.
///
/// A scalar value produces a single [`OptionNode`] with the same name as the declaration. A
/// brace-delimited value produces one node per entry, so repeated keys appear as repeated nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionDecl {
    /// The dotted option name. Parentheses around an extension name are not included.
    pub name: String,
    pub options: Vec<OptionNode>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionNode {
    pub name: String,
    pub value: OptionValue,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Null,
    /// A bare, possibly dotted, identifier such as an enum value name.
    Ident(String),
    Aggregate(OptionAggregate),
}

/// A brace-delimited option value, such as `{ min_len: 3, max_len: 50 }`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionAggregate {
    pub options: Vec<OptionNode>,
    /// Comments inside the braces which do not precede or trail an entry.
    pub comments: Vec<Comment>,
}

/// The bracketed options of a field or enum value, keyed by option name in insertion order.
///
/// If the same name is given twice, the later value replaces the earlier one in place.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldOptions {
    options: Vec<OptionNode>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Definition {
    Message(Message),
    Enum(Enum),
    Service(Service),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    pub name: String,
    pub fields: Vec<MessageField>,
    pub enums: Vec<Enum>,
    pub messages: Vec<Message>,
    pub options: Vec<OptionDecl>,
    pub extends: Vec<Extend>,
    pub comments: Vec<Comment>,
}

/// A field-like declaration in a message body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageField {
    Field(Field),
    Map(MapField),
    Oneof(Oneof),
    Reserved(Reserved),
    Extensions(Extensions),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    pub modifier: Option<FieldModifier>,
    pub ty: FieldType,
    pub name: String,
    pub number: i64,
    pub options: FieldOptions,
    pub comments: Vec<Comment>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldModifier {
    Optional,
    Required,
    Repeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldType {
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
    /// A message or enum type reference, including a leading `.` if it was fully qualified.
    Named(String),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapField {
    pub key_ty: FieldType,
    pub value_ty: FieldType,
    pub name: String,
    pub number: i64,
    pub options: FieldOptions,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Oneof {
    pub name: String,
    pub fields: Vec<OneofField>,
    pub options: Vec<OptionDecl>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OneofField {
    pub ty: FieldType,
    pub name: String,
    pub number: i64,
    pub options: FieldOptions,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enum {
    pub name: String,
    pub fields: Vec<EnumItem>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnumItem {
    Option(OptionDecl),
    Field(EnumField),
    Reserved(Reserved),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumField {
    pub name: String,
    pub number: i64,
    pub options: FieldOptions,
    pub comments: Vec<Comment>,
}

/// A `reserved` statement. A single statement reserves either numbers or names, never both.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reserved {
    pub ranges: ReservedRanges,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReservedRanges {
    Numbers(Vec<ReservedRange>),
    Names(Vec<String>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReservedRange {
    Number(i64),
    Range { start: i64, end: ReservedRangeEnd },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReservedRangeEnd {
    Number(i64),
    Max,
}

/// An `extensions` statement in a proto2 message. Only its syntax is checked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extensions {
    pub ranges: Vec<ReservedRange>,
    pub comments: Vec<Comment>,
}

/// An `extend Foo { ... }` block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extend {
    pub extendee: String,
    pub fields: Vec<Field>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Service {
    pub name: String,
    pub methods: Vec<Rpc>,
    pub options: Vec<OptionDecl>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rpc {
    pub name: String,
    pub input_type: RpcType,
    pub output_type: RpcType,
    pub options: Vec<OptionDecl>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RpcType {
    pub name: String,
    pub is_stream: bool,
}

/// The text of a comment, without its delimiters and surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comment {
    pub text: String,
}

impl File {
    /// Iterates over the top-level message definitions.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Message(message) => Some(message),
            _ => None,
        })
    }

    /// Iterates over the top-level enum definitions.
    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Enum(enum_) => Some(enum_),
            _ => None,
        })
    }

    /// Iterates over the service definitions.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Service(service) => Some(service),
            _ => None,
        })
    }
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Message(message) => &message.name,
            Definition::Enum(enum_) => &enum_.name,
            Definition::Service(service) => &service.name,
        }
    }
}

impl MessageField {
    /// The name of the declaration, if it has one. `reserved` and `extensions` statements do not.
    pub fn name(&self) -> Option<&str> {
        match self {
            MessageField::Field(field) => Some(&field.name),
            MessageField::Map(map) => Some(&map.name),
            MessageField::Oneof(oneof) => Some(&oneof.name),
            MessageField::Reserved(_) | MessageField::Extensions(_) => None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        match self {
            MessageField::Field(field) => &field.comments,
            MessageField::Map(map) => &map.comments,
            MessageField::Oneof(oneof) => &oneof.comments,
            MessageField::Reserved(reserved) => &reserved.comments,
            MessageField::Extensions(extensions) => &extensions.comments,
        }
    }
}

impl FieldType {
    /// Resolves a type name as written in a field declaration.
    ///
    /// Only an unqualified name can refer to a scalar type, so `.string` or `foo.string` are
    /// always named types.
    pub fn from_name(name: &str) -> FieldType {
        match name {
            "double" => FieldType::Double,
            "float" => FieldType::Float,
            "int32" => FieldType::Int32,
            "int64" => FieldType::Int64,
            "uint32" => FieldType::Uint32,
            "uint64" => FieldType::Uint64,
            "sint32" => FieldType::Sint32,
            "sint64" => FieldType::Sint64,
            "fixed32" => FieldType::Fixed32,
            "fixed64" => FieldType::Fixed64,
            "sfixed32" => FieldType::Sfixed32,
            "sfixed64" => FieldType::Sfixed64,
            "bool" => FieldType::Bool,
            "string" => FieldType::String,
            "bytes" => FieldType::Bytes,
            "any" => FieldType::Any,
            _ => FieldType::Named(name.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Uint32 => "uint32",
            FieldType::Uint64 => "uint64",
            FieldType::Sint32 => "sint32",
            FieldType::Sint64 => "sint64",
            FieldType::Fixed32 => "fixed32",
            FieldType::Fixed64 => "fixed64",
            FieldType::Sfixed32 => "sfixed32",
            FieldType::Sfixed64 => "sfixed64",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Bytes => "bytes",
            FieldType::Any => "any",
            FieldType::Named(name) => name,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldType::Any | FieldType::Named(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OptionValue {
    /// Returns the text of a string or identifier value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) | OptionValue::Ident(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&OptionAggregate> {
        match self {
            OptionValue::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }
}

impl OptionAggregate {
    /// Gets the first entry with the given key.
    pub fn get(&self, name: &str) -> Option<&OptionNode> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Gets every entry with the given key, in source order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OptionNode> + 'a {
        self.options.iter().filter(move |option| option.name == name)
    }
}

impl FieldOptions {
    pub fn get(&self, name: &str) -> Option<&OptionNode> {
        self.options.iter().find(|option| option.name == name)
    }

    pub fn iter(&self) -> slice::Iter<'_, OptionNode> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn insert(&mut self, option: OptionNode) {
        match self.options.iter_mut().find(|existing| existing.name == option.name) {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
    }
}

impl FromIterator<OptionNode> for FieldOptions {
    fn from_iter<T: IntoIterator<Item = OptionNode>>(iter: T) -> Self {
        let mut options = FieldOptions::default();
        for option in iter {
            options.insert(option);
        }
        options
    }
}

impl<'a> IntoIterator for &'a FieldOptions {
    type Item = &'a OptionNode;
    type IntoIter = slice::Iter<'a, OptionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
