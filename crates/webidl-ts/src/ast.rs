//! AST for generated TypeScript declarations.
//!
//! The converter only builds these nodes; rendering them to text is the job
//! of [`crate::printer`].

use std::fmt;

/// A top-level (or namespace-level) declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Interface(InterfaceDecl),
    Class(ClassDecl),
    TypeAlias(TypeAlias),
    Variable(VariableDecl),
    Function(FunctionDecl),
    Namespace(NamespaceDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Interface(d) => &d.name,
            Declaration::Class(d) => &d.name,
            Declaration::TypeAlias(d) => &d.name,
            Declaration::Variable(d) => &d.name,
            Declaration::Function(d) => &d.name,
            Declaration::Namespace(d) => &d.name,
        }
    }

    /// Short label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Interface(_) => "interface",
            Declaration::Class(_) => "class",
            Declaration::TypeAlias(_) => "type alias",
            Declaration::Variable(_) => "variable",
            Declaration::Function(_) => "function",
            Declaration::Namespace(_) => "namespace",
        }
    }
}

/// `interface Name extends A, B { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub extends: Vec<TsType>,
    pub members: Vec<Member>,
}

/// `declare class Name extends A { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    /// Every base type, in order. A class can only extend one, so the
    /// printer emits the first entry as `extends` and the rest (synthetic
    /// `Set`/`Map` bases) as `implements`. TypeScript checks `implements`
    /// against the class members, so a class whose only extra base is
    /// `ReadonlySet<T>` declares no set members and fails that check.
    pub extends: Vec<TsType>,
    pub members: Vec<Member>,
}

/// `type Name = Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: TsType,
}

/// `declare var name: Type;` or `const name: Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub ty: TsType,
    pub is_const: bool,
}

/// `declare function name(params): ReturnType;`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TsType,
}

/// `declare namespace Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: String,
    pub body: Vec<Declaration>,
}

/// A member name: plain identifier or computed key such as `[Symbol.iterator]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    Identifier(String),
    Computed(String),
}

impl PropertyName {
    pub fn ident(name: impl Into<String>) -> Self {
        PropertyName::Identifier(name.into())
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyName::Identifier(name) => write!(f, "{}", name),
            PropertyName::Computed(expr) => write!(f, "[{}]", expr),
        }
    }
}

/// A function or method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
    /// `...name: T[]`
    pub rest: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A member of an interface or class.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(Property),
    Method(Method),
    /// `new (params): Type;` in an interface.
    ConstructSignature(ConstructSignature),
    /// `constructor(params);` in a class.
    Constructor(Constructor),
    IndexSignature(IndexSignature),
}

impl Member {
    /// The member name, when it has one.
    pub fn name(&self) -> Option<&PropertyName> {
        match self {
            Member::Property(p) => Some(&p.name),
            Member::Method(m) => Some(&m.name),
            _ => None,
        }
    }
}

/// `static readonly name?: Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: PropertyName,
    pub ty: TsType,
    pub optional: bool,
    pub readonly: bool,
    pub is_static: bool,
}

/// `static name(params): ReturnType;`
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: PropertyName,
    pub params: Vec<Param>,
    pub return_type: TsType,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructSignature {
    pub params: Vec<Param>,
    pub return_type: TsType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub params: Vec<Param>,
}

/// `readonly [key: KeyType]: ValueType;`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub key_name: String,
    pub key_type: TsType,
    pub value_type: TsType,
    pub readonly: bool,
}

/// A TypeScript keyword type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Number,
    String,
    Void,
    Null,
    Any,
    Unknown,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Number => write!(f, "number"),
            Keyword::String => write!(f, "string"),
            Keyword::Void => write!(f, "void"),
            Keyword::Null => write!(f, "null"),
            Keyword::Any => write!(f, "any"),
            Keyword::Unknown => write!(f, "unknown"),
        }
    }
}

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    Keyword(Keyword),
    /// `Name` or `Name<Args>`
    Reference { name: String, type_args: Vec<TsType> },
    /// `A | B | C`
    Union(Vec<TsType>),
    /// `"red"`
    StringLiteral(String),
    /// `[K, V]`
    Tuple(Vec<TsType>),
    /// `(a: T) => R`
    Function(Box<FunctionType>),
    /// `typeof name`
    TypeQuery(String),
}

impl TsType {
    pub fn number() -> Self {
        TsType::Keyword(Keyword::Number)
    }

    pub fn string() -> Self {
        TsType::Keyword(Keyword::String)
    }

    pub fn void() -> Self {
        TsType::Keyword(Keyword::Void)
    }

    pub fn null() -> Self {
        TsType::Keyword(Keyword::Null)
    }

    pub fn any() -> Self {
        TsType::Keyword(Keyword::Any)
    }

    pub fn unknown() -> Self {
        TsType::Keyword(Keyword::Unknown)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TsType::Reference {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_args: Vec<TsType>) -> Self {
        TsType::Reference {
            name: name.into(),
            type_args,
        }
    }

    /// `Array<T>`
    pub fn array(element: TsType) -> Self {
        TsType::generic("Array", vec![element])
    }

    /// `T | null`
    pub fn or_null(self) -> Self {
        TsType::Union(vec![self, TsType::null()])
    }
}

/// The signature carried by [`TsType::Function`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Param>,
    pub return_type: TsType,
}
