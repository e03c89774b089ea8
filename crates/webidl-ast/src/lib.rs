//! Typed WebIDL definitions.
//!
//! This crate models the output of a WebIDL parser as closed Rust enums:
//! root definitions, their members, and the type descriptors used in every
//! type position. Definitions are loaded from the JSON AST produced by the
//! parser (see [`parse_definitions`]) and are read-only afterwards.
//!
//! Shapes that the model does not cover are kept as `Unsupported` values
//! holding the raw JSON, so consumers can report them without losing data.

mod error;
mod json;

use indexmap::IndexMap;
use serde_json::Value;

pub use error::LoadError;
pub use json::{definitions_from_value, parse_definitions, read_definitions};

/// An IDL type descriptor: `DOMString?`, `sequence<long>`, `(A or B)`.
#[derive(Debug, Clone, PartialEq)]
pub enum IdlType {
    /// A plain type name, e.g. `unsigned long` or `Node`.
    Named { name: String, nullable: bool },
    /// A generic type, e.g. `sequence<T>` or `record<K, V>`.
    Generic {
        name: String,
        args: Vec<IdlType>,
        nullable: bool,
    },
    /// A union type. The `nullable` flag is recorded as parsed but carries no
    /// meaning for conversion.
    Union { members: Vec<IdlType>, nullable: bool },
    /// A descriptor whose shape is none of the above.
    Unsupported(Value),
}

impl IdlType {
    /// Shorthand for a non-nullable named type.
    pub fn named(name: impl Into<String>) -> Self {
        IdlType::Named {
            name: name.into(),
            nullable: false,
        }
    }

    /// Shorthand for a nullable named type.
    pub fn nullable(name: impl Into<String>) -> Self {
        IdlType::Named {
            name: name.into(),
            nullable: true,
        }
    }

    /// Shorthand for a non-nullable generic type.
    pub fn generic(name: impl Into<String>, args: Vec<IdlType>) -> Self {
        IdlType::Generic {
            name: name.into(),
            args,
            nullable: false,
        }
    }

    /// Shorthand for a non-nullable union.
    pub fn union(members: Vec<IdlType>) -> Self {
        IdlType::Union {
            members,
            nullable: false,
        }
    }

    /// Returns true if this is the named type `name` (nullability ignored).
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, IdlType::Named { name: n, .. } if n == name)
    }
}

/// An operation or callback argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: IdlType,
    pub optional: bool,
    /// `T... name`
    pub variadic: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: IdlType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            variadic: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Special marker on an operation or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    Getter,
    Setter,
    Deleter,
    Static,
    Stringifier,
    Inherit,
}

impl Special {
    /// Parse the parser's `special` string. Empty means no marker.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "getter" => Some(Special::Getter),
            "setter" => Some(Special::Setter),
            "deleter" => Some(Special::Deleter),
            "static" => Some(Special::Static),
            "stringifier" => Some(Special::Stringifier),
            "inherit" => Some(Special::Inherit),
            _ => None,
        }
    }
}

/// `readonly attribute DOMString name;`
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub ty: IdlType,
    pub readonly: bool,
    pub special: Option<Special>,
}

/// `static Foo bar(long a, optional DOMString b);`
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Empty for anonymous special operations (`getter Node (unsigned long i)`).
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: IdlType,
    pub special: Option<Special>,
}

impl Operation {
    pub fn is_static(&self) -> bool {
        self.special == Some(Special::Static)
    }

    /// An indexed property getter: a `getter` whose only argument is an
    /// `unsigned long`.
    pub fn is_indexed_getter(&self) -> bool {
        self.special == Some(Special::Getter)
            && self.arguments.len() == 1
            && self.arguments[0].ty.is_named("unsigned long")
    }
}

/// `constructor(long a);`
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub arguments: Vec<Argument>,
}

/// A dictionary field: `required DOMString name;`
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: IdlType,
    pub required: bool,
}

/// `const unsigned short ELEMENT_NODE = 1;`
#[derive(Debug, Clone, PartialEq)]
pub struct Const {
    pub name: String,
    pub ty: IdlType,
}

/// `iterable<V>`, `iterable<K, V>` or `async iterable<...>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterable {
    /// One (value) or two (key, value) descriptors.
    pub types: Vec<IdlType>,
    pub is_async: bool,
}

/// `readonly setlike<T>`
#[derive(Debug, Clone, PartialEq)]
pub struct Setlike {
    pub element: IdlType,
    pub readonly: bool,
}

/// `readonly maplike<K, V>`
#[derive(Debug, Clone, PartialEq)]
pub struct Maplike {
    pub key: IdlType,
    pub value: IdlType,
    pub readonly: bool,
}

/// A member of an interface, mixin, dictionary or namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Attribute(Attribute),
    Operation(Operation),
    Constructor(Constructor),
    Field(Field),
    Const(Const),
    Iterable(Iterable),
    Setlike(Setlike),
    Maplike(Maplike),
    /// A member kind the model does not cover.
    Unsupported { kind: String, raw: Value },
}

/// Extended attributes in source order, `[Exposed=(Window,Worker)]` becomes
/// `Exposed -> ["Window", "Worker"]`. Attributes without a value map to an
/// empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedAttributes(IndexMap<String, Vec<String>>);

impl ExtendedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.insert(name, values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Whether `[Exposed=...]` names the given global. `Exposed=*` matches all.
    pub fn is_exposed_on(&self, global: &str) -> bool {
        self.get("Exposed")
            .map(|values| values.iter().any(|v| v == global || v == "*"))
            .unwrap_or(false)
    }
}

/// The body shared by interfaces, mixins, dictionaries and namespaces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Definition {
    pub name: String,
    /// Superinterface or parent dictionary.
    pub inheritance: Option<String>,
    pub members: Vec<Member>,
    pub ext_attrs: ExtendedAttributes,
}

impl Definition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn inherits(mut self, parent: impl Into<String>) -> Self {
        self.inheritance = Some(parent.into());
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn ext_attrs(mut self, ext_attrs: ExtendedAttributes) -> Self {
        self.ext_attrs = ext_attrs;
        self
    }
}

/// `A includes B;`
#[derive(Debug, Clone, PartialEq)]
pub struct Includes {
    pub target: String,
    pub includes: String,
}

/// `enum Color { "red", "green" };`
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
}

/// `callback Handler = void (Event e);`
#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub name: String,
    pub return_type: IdlType,
    pub arguments: Vec<Argument>,
}

/// `typedef unsigned long long Size;`
#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub ty: IdlType,
}

/// A top-level IDL definition.
#[derive(Debug, Clone, PartialEq)]
pub enum RootType {
    Interface(Definition),
    InterfaceMixin(Definition),
    CallbackInterface(Definition),
    Dictionary(Definition),
    Namespace(Definition),
    Includes(Includes),
    Enum(Enum),
    Callback(Callback),
    Typedef(Typedef),
    /// A definition kind the model does not cover.
    Unsupported { kind: String, raw: Value },
}

impl RootType {
    /// The declared name, if the definition has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            RootType::Interface(d)
            | RootType::InterfaceMixin(d)
            | RootType::CallbackInterface(d)
            | RootType::Dictionary(d)
            | RootType::Namespace(d) => Some(&d.name),
            RootType::Includes(i) => Some(&i.target),
            RootType::Enum(e) => Some(&e.name),
            RootType::Callback(c) => Some(&c.name),
            RootType::Typedef(t) => Some(&t.name),
            RootType::Unsupported { .. } => None,
        }
    }
}
