//! Conversion of interface, dictionary, mixin and namespace members.
//!
//! Each IDL member becomes zero or more TypeScript members. `setlike` and
//! `maplike` produce no members at all; they add an inherited `Set`/`Map`
//! type to the owning declaration instead.

use webidl_ast as idl;
use webidl_ast::{Definition, Special};

use crate::ast::{
    ConstructSignature, Constructor, FunctionType, IndexSignature, Member, Method, Param,
    Property, PropertyName, TsType,
};
use crate::diagnostics::DiagnosticKind;
use crate::program::Converter;
use crate::OutputMode;

/// Members and synthetic base types collected from one definition.
#[derive(Debug, Default)]
pub(crate) struct ConvertedMembers {
    pub members: Vec<Member>,
    /// `Set<T>`, `ReadonlyMap<K, V>`, ... contributed by setlike/maplike.
    pub inherits: Vec<TsType>,
}

impl Converter {
    pub(crate) fn convert_members(&mut self, def: &Definition) -> ConvertedMembers {
        let mut out = ConvertedMembers::default();
        for member in &def.members {
            self.convert_member(member, def, &mut out);
        }
        out
    }

    fn convert_member(&mut self, member: &idl::Member, def: &Definition, out: &mut ConvertedMembers) {
        match member {
            idl::Member::Attribute(attr) => self.convert_attribute(attr, out),
            // Legacy operation-style constructors share the interface's name.
            idl::Member::Operation(op) if op.name == def.name => {
                self.convert_constructor(&op.arguments, &def.name, out)
            }
            idl::Member::Operation(op) => self.convert_operation(op, def, out),
            idl::Member::Constructor(ctor) => {
                self.convert_constructor(&ctor.arguments, &def.name, out)
            }
            idl::Member::Field(field) => {
                let ty = self.convert_type(&field.ty);
                out.members.push(Member::Property(Property {
                    name: PropertyName::ident(&field.name),
                    ty,
                    optional: !field.required,
                    readonly: false,
                    is_static: false,
                }));
            }
            idl::Member::Const(constant) => {
                let ty = self.convert_type(&constant.ty);
                out.members.push(Member::Property(Property {
                    name: PropertyName::ident(&constant.name),
                    ty,
                    optional: false,
                    readonly: true,
                    is_static: false,
                }));
            }
            idl::Member::Iterable(iterable) => self.convert_iterable(iterable, def, out),
            idl::Member::Setlike(setlike) => {
                let element = self.convert_type(&setlike.element);
                let base = if setlike.readonly { "ReadonlySet" } else { "Set" };
                out.inherits.push(TsType::generic(base, vec![element]));
            }
            idl::Member::Maplike(maplike) => {
                let key = self.convert_type(&maplike.key);
                let value = self.convert_type(&maplike.value);
                let base = if maplike.readonly { "ReadonlyMap" } else { "Map" };
                out.inherits.push(TsType::generic(base, vec![key, value]));
            }
            idl::Member::Unsupported { kind, raw } => {
                tracing::debug!(kind = %kind, owner = %def.name, "skipping unsupported member");
                self.diagnostics.report(
                    DiagnosticKind::UnsupportedMember,
                    Some(&def.name),
                    raw,
                );
            }
        }
    }

    fn convert_attribute(&mut self, attr: &idl::Attribute, out: &mut ConvertedMembers) {
        let ty = self.convert_type(&attr.ty);
        let is_static = attr.special == Some(Special::Static);

        // Runtime bindings expose every attribute through accessor methods,
        // readonly or not.
        if self.mode == OutputMode::Runtime {
            out.members.push(Member::Method(Method {
                name: PropertyName::Identifier(format!("get_{}", attr.name)),
                params: Vec::new(),
                return_type: ty.clone(),
                is_static,
            }));
            out.members.push(Member::Method(Method {
                name: PropertyName::Identifier(format!("set_{}", attr.name)),
                params: vec![Param::new("value", ty.clone())],
                return_type: TsType::void(),
                is_static,
            }));
        }

        out.members.push(Member::Property(Property {
            name: PropertyName::ident(&attr.name),
            ty,
            optional: false,
            readonly: attr.readonly,
            is_static,
        }));
    }

    fn convert_operation(&mut self, op: &idl::Operation, def: &Definition, out: &mut ConvertedMembers) {
        if op.name.is_empty() {
            self.convert_anonymous_operation(op, def, out);
            return;
        }

        let params = self.convert_arguments(&op.arguments);
        let return_type = self.convert_type(&op.return_type);
        out.members.push(Member::Method(Method {
            name: PropertyName::ident(&op.name),
            params,
            return_type,
            is_static: op.is_static(),
        }));
    }

    /// Anonymous special operations have no method name to emit.
    fn convert_anonymous_operation(
        &mut self,
        op: &idl::Operation,
        def: &Definition,
        out: &mut ConvertedMembers,
    ) {
        match (op.special, op.arguments.as_slice()) {
            (Some(Special::Getter), [key]) => {
                let has_setter = def.members.iter().any(|m| {
                    matches!(m, idl::Member::Operation(o)
                        if o.name.is_empty() && o.special == Some(Special::Setter))
                });
                let key_type = self.convert_type(&key.ty);
                let value_type = self.convert_type(&op.return_type);
                out.members.push(Member::IndexSignature(IndexSignature {
                    key_name: parameter_name(&key.name),
                    key_type,
                    value_type,
                    readonly: !has_setter,
                }));
            }
            (Some(Special::Stringifier), []) => {
                out.members.push(Member::Method(Method {
                    name: PropertyName::ident("toString"),
                    params: Vec::new(),
                    return_type: TsType::string(),
                    is_static: false,
                }));
            }
            _ => {
                tracing::debug!(owner = %def.name, special = ?op.special, "anonymous operation emits no member");
            }
        }
    }

    fn convert_constructor(&mut self, arguments: &[idl::Argument], owner: &str, out: &mut ConvertedMembers) {
        let params = self.convert_arguments(arguments);
        let member = match self.mode {
            OutputMode::Ambient => Member::ConstructSignature(ConstructSignature {
                params,
                return_type: TsType::reference(owner),
            }),
            OutputMode::Runtime => Member::Constructor(Constructor { params }),
        };
        out.members.push(member);
    }

    fn convert_iterable(&mut self, iterable: &idl::Iterable, def: &Definition, out: &mut ConvertedMembers) {
        let (key, value, is_pair) = match iterable.types.as_slice() {
            [key, value] => (self.convert_type(key), self.convert_type(value), true),
            [value] => {
                // A value iterator takes its key type from the indexed getter.
                let getter = def.members.iter().find_map(|m| match m {
                    idl::Member::Operation(op) if op.is_indexed_getter() => Some(op),
                    _ => None,
                });
                let Some(getter) = getter else {
                    tracing::debug!(owner = %def.name, "value iterable without indexed getter");
                    return;
                };
                let key = self.convert_type(&getter.arguments[0].ty);
                (key, self.convert_type(value), false)
            }
            _ => {
                tracing::debug!(owner = %def.name, arity = iterable.types.len(), "iterable with unexpected arity");
                return;
            }
        };

        let iterator = if iterable.is_async {
            "AsyncIterableIterator"
        } else {
            "IterableIterator"
        };
        let symbol = if iterable.is_async {
            "Symbol.asyncIterator"
        } else {
            "Symbol.iterator"
        };
        let entry = TsType::Tuple(vec![key.clone(), value.clone()]);
        let element = if is_pair { entry.clone() } else { value.clone() };
        let parent = if is_pair {
            TsType::reference(&def.name)
        } else {
            TsType::array(value.clone())
        };

        let iterator_method = |name: PropertyName, item: TsType| {
            Member::Method(Method {
                name,
                params: Vec::new(),
                return_type: TsType::generic(iterator, vec![item]),
                is_static: false,
            })
        };

        out.members.push(iterator_method(PropertyName::Computed(symbol.to_string()), element));
        out.members.push(iterator_method(PropertyName::ident("entries"), entry));
        out.members.push(iterator_method(PropertyName::ident("keys"), key.clone()));
        out.members.push(iterator_method(PropertyName::ident("values"), value.clone()));

        let callback = TsType::Function(Box::new(FunctionType {
            params: vec![
                Param::new("value", value),
                Param::new("key", key),
                Param::new("parent", parent),
            ],
            return_type: TsType::void(),
        }));
        out.members.push(Member::Method(Method {
            name: PropertyName::ident("forEach"),
            params: vec![
                Param::new("callbackfn", callback),
                Param::new("thisArg", TsType::any()).optional(),
            ],
            return_type: TsType::void(),
            is_static: false,
        }));
    }

    pub(crate) fn convert_arguments(&mut self, arguments: &[idl::Argument]) -> Vec<Param> {
        arguments
            .iter()
            .map(|arg| {
                let ty = self.convert_type(&arg.ty);
                Param {
                    name: parameter_name(&arg.name),
                    ty: if arg.variadic { TsType::array(ty) } else { ty },
                    optional: arg.optional && !arg.variadic,
                    rest: arg.variadic,
                }
            })
            .collect()
    }
}

/// Words that cannot name a parameter in strict-mode TypeScript.
fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "enum"
            | "export"
            | "extends"
            | "false"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "implements"
            | "import"
            | "in"
            | "instanceof"
            | "interface"
            | "let"
            | "new"
            | "null"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "static"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
    )
}

/// Escape a parameter name by appending an underscore if it is reserved.
fn parameter_name(name: &str) -> String {
    if is_reserved_word(name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}
