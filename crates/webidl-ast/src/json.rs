//! Loading definitions from the parser's JSON AST.
//!
//! The input is the array of definitions emitted by `webidl2`-style parsers:
//! every node is an object tagged by a `type` string, type positions hold an
//! `idlType` descriptor object, and extended attributes are listed under
//! `extAttrs`.
//!
//! Unknown tags are not errors. They are kept as `Unsupported` values so the
//! converter can report them. Known tags with missing fields are rejected with
//! [`LoadError::Malformed`].

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::*;

/// Parse a JSON string holding an array of definitions.
pub fn parse_definitions(src: &str) -> Result<Vec<RootType>, LoadError> {
    let value: Value = serde_json::from_str(src)?;
    definitions_from_value(value)
}

/// Read and parse a JSON file holding an array of definitions.
pub fn read_definitions(path: &Path) -> Result<Vec<RootType>, LoadError> {
    let src = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definitions(&src)
}

/// Convert an already parsed JSON value into definitions.
pub fn definitions_from_value(value: Value) -> Result<Vec<RootType>, LoadError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(LoadError::NotAnArray(json_kind(&other))),
    };

    let mut roots = Vec::with_capacity(items.len());
    for item in items {
        if let Some(root) = root_type(item)? {
            roots.push(root);
        }
    }
    Ok(roots)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn tag(value: &Value) -> String {
    value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn decode<T: DeserializeOwned>(kind: &str, value: &Value) -> Result<T, LoadError> {
    serde_json::from_value(value.clone()).map_err(|source| LoadError::Malformed {
        kind: kind.to_string(),
        source,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefinition {
    name: String,
    #[serde(default)]
    inheritance: Option<String>,
    #[serde(default)]
    members: Vec<Value>,
    #[serde(default)]
    ext_attrs: Vec<RawExtAttr>,
}

#[derive(Deserialize)]
struct RawExtAttr {
    name: String,
    #[serde(default)]
    rhs: Option<RawRhs>,
}

#[derive(Deserialize)]
struct RawRhs {
    #[serde(default)]
    value: Value,
}

#[derive(Deserialize)]
struct RawIncludes {
    target: String,
    includes: String,
}

#[derive(Deserialize)]
struct RawEnum {
    name: String,
    values: Vec<RawEnumValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnumValue {
    Plain(String),
    Tagged { value: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCallback {
    name: String,
    idl_type: Value,
    #[serde(default)]
    arguments: Vec<RawArgument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypedef {
    name: String,
    idl_type: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArgument {
    name: String,
    idl_type: Value,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    variadic: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttribute {
    name: String,
    idl_type: Value,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    special: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperation {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    idl_type: Value,
    #[serde(default)]
    arguments: Vec<RawArgument>,
    #[serde(default)]
    special: Option<String>,
}

#[derive(Deserialize)]
struct RawConstructor {
    #[serde(default)]
    arguments: Vec<RawArgument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    idl_type: Value,
    #[serde(default)]
    required: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConst {
    name: String,
    idl_type: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollection {
    idl_type: Vec<Value>,
    #[serde(default)]
    readonly: bool,
    #[serde(default, rename = "async")]
    is_async: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeDescriptor {
    #[serde(default)]
    generic: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    union: bool,
    idl_type: Value,
}

fn root_type(value: Value) -> Result<Option<RootType>, LoadError> {
    let kind = tag(&value);
    let root = match kind.as_str() {
        // End-of-input marker emitted by the parser.
        "eof" => return Ok(None),
        "interface" => RootType::Interface(definition(&kind, &value)?),
        "interface mixin" => RootType::InterfaceMixin(definition(&kind, &value)?),
        "callback interface" => RootType::CallbackInterface(definition(&kind, &value)?),
        "dictionary" => RootType::Dictionary(definition(&kind, &value)?),
        "namespace" => RootType::Namespace(definition(&kind, &value)?),
        "includes" => {
            let raw: RawIncludes = decode(&kind, &value)?;
            RootType::Includes(Includes {
                target: raw.target,
                includes: raw.includes,
            })
        }
        "enum" => {
            let raw: RawEnum = decode(&kind, &value)?;
            RootType::Enum(Enum {
                name: raw.name,
                values: raw
                    .values
                    .into_iter()
                    .map(|v| match v {
                        RawEnumValue::Plain(s) | RawEnumValue::Tagged { value: s } => s,
                    })
                    .collect(),
            })
        }
        "callback" => {
            let raw: RawCallback = decode(&kind, &value)?;
            RootType::Callback(Callback {
                name: raw.name,
                return_type: idl_type(&raw.idl_type),
                arguments: arguments(raw.arguments),
            })
        }
        "typedef" => {
            let raw: RawTypedef = decode(&kind, &value)?;
            RootType::Typedef(Typedef {
                name: raw.name,
                ty: idl_type(&raw.idl_type),
            })
        }
        _ => RootType::Unsupported { kind, raw: value },
    };
    Ok(Some(root))
}

fn definition(kind: &str, value: &Value) -> Result<Definition, LoadError> {
    let raw: RawDefinition = decode(kind, value)?;
    let members = raw
        .members
        .into_iter()
        .map(member)
        .collect::<Result<Vec<_>, _>>()?;

    let mut ext_attrs = ExtendedAttributes::new();
    for attr in raw.ext_attrs {
        let values = attr.rhs.map(|rhs| rhs_values(&rhs.value)).unwrap_or_default();
        ext_attrs.insert(attr.name, values);
    }

    Ok(Definition {
        name: raw.name,
        inheritance: raw.inheritance,
        members,
        ext_attrs,
    })
}

/// Flatten an extended attribute right-hand side. Parsers report identifier
/// lists either as plain strings or as `{ "value": ... }` tokens.
fn rhs_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => item.get("value").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn member(value: Value) -> Result<Member, LoadError> {
    let kind = tag(&value);
    let member = match kind.as_str() {
        "attribute" => {
            let raw: RawAttribute = decode(&kind, &value)?;
            Member::Attribute(Attribute {
                name: raw.name,
                ty: idl_type(&raw.idl_type),
                readonly: raw.readonly,
                special: raw.special.as_deref().and_then(Special::from_keyword),
            })
        }
        "operation" => {
            let raw: RawOperation = decode(&kind, &value)?;
            let special = raw.special.as_deref().and_then(Special::from_keyword);
            let return_type = if raw.idl_type.is_null() {
                // `stringifier;` carries no return type.
                match special {
                    Some(Special::Stringifier) => IdlType::named("DOMString"),
                    _ => IdlType::named("void"),
                }
            } else {
                idl_type(&raw.idl_type)
            };
            Member::Operation(Operation {
                name: raw.name.unwrap_or_default(),
                arguments: arguments(raw.arguments),
                return_type,
                special,
            })
        }
        "constructor" => {
            let raw: RawConstructor = decode(&kind, &value)?;
            Member::Constructor(Constructor {
                arguments: arguments(raw.arguments),
            })
        }
        "field" => {
            let raw: RawField = decode(&kind, &value)?;
            Member::Field(Field {
                name: raw.name,
                ty: idl_type(&raw.idl_type),
                required: raw.required,
            })
        }
        "const" => {
            let raw: RawConst = decode(&kind, &value)?;
            Member::Const(Const {
                name: raw.name,
                ty: idl_type(&raw.idl_type),
            })
        }
        "iterable" => {
            let raw: RawCollection = decode(&kind, &value)?;
            if !(1..=2).contains(&raw.idl_type.len()) {
                return Ok(Member::Unsupported { kind, raw: value });
            }
            Member::Iterable(Iterable {
                types: raw.idl_type.iter().map(idl_type).collect(),
                is_async: raw.is_async,
            })
        }
        "setlike" => {
            let raw: RawCollection = decode(&kind, &value)?;
            match raw.idl_type.as_slice() {
                [element] => Member::Setlike(Setlike {
                    element: idl_type(element),
                    readonly: raw.readonly,
                }),
                _ => Member::Unsupported { kind, raw: value },
            }
        }
        "maplike" => {
            let raw: RawCollection = decode(&kind, &value)?;
            match raw.idl_type.as_slice() {
                [key, val] => Member::Maplike(Maplike {
                    key: idl_type(key),
                    value: idl_type(val),
                    readonly: raw.readonly,
                }),
                _ => Member::Unsupported { kind, raw: value },
            }
        }
        _ => Member::Unsupported { kind, raw: value },
    };
    Ok(member)
}

fn arguments(raw: Vec<RawArgument>) -> Vec<Argument> {
    raw.into_iter()
        .map(|a| Argument {
            ty: idl_type(&a.idl_type),
            name: a.name,
            optional: a.optional,
            variadic: a.variadic,
        })
        .collect()
}

/// Convert a type descriptor. Shapes that are neither named, generic nor
/// union are kept as [`IdlType::Unsupported`].
fn idl_type(value: &Value) -> IdlType {
    let raw: RawTypeDescriptor = match serde_json::from_value(value.clone()) {
        Ok(raw) => raw,
        Err(_) => return IdlType::Unsupported(value.clone()),
    };

    match (&raw.idl_type, raw.union, raw.generic.is_empty()) {
        (Value::Array(items), true, _) => IdlType::Union {
            members: items.iter().map(idl_type).collect(),
            nullable: raw.nullable,
        },
        (Value::Array(items), false, false) => IdlType::Generic {
            name: raw.generic,
            args: items.iter().map(idl_type).collect(),
            nullable: raw.nullable,
        },
        (Value::String(name), false, true) => IdlType::Named {
            name: name.clone(),
            nullable: raw.nullable,
        },
        _ => IdlType::Unsupported(value.clone()),
    }
}
