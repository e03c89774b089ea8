//! Conversion of root definitions into declarations.

use webidl_ast::{Callback, Definition, Enum, Includes, Typedef};

use crate::ast::{
    ClassDecl, Declaration, FunctionType, InterfaceDecl, TsType, TypeAlias, VariableDecl,
};
use crate::program::Converter;
use crate::OutputMode;

impl Converter {
    /// Interfaces, mixins, dictionaries and namespaces.
    ///
    /// Returns the primary declaration and, for `[Exposed=Window]`
    /// definitions, a global variable of the same name.
    pub(crate) fn convert_definition(&mut self, def: &Definition) -> Vec<Declaration> {
        let converted = self.convert_members(def);

        let mut extends: Vec<TsType> = def
            .inheritance
            .iter()
            .map(|parent| TsType::reference(parent.as_str()))
            .collect();
        extends.extend(converted.inherits);
        let members = converted.members;

        // A lone base type with nothing of our own collapses to an alias.
        let primary = if extends.len() == 1 && members.is_empty() {
            Declaration::TypeAlias(TypeAlias {
                name: def.name.clone(),
                ty: extends.remove(0),
            })
        } else {
            match self.mode {
                OutputMode::Ambient => Declaration::Interface(InterfaceDecl {
                    name: def.name.clone(),
                    extends,
                    members,
                }),
                OutputMode::Runtime => Declaration::Class(ClassDecl {
                    name: def.name.clone(),
                    extends,
                    members,
                }),
            }
        };

        let mut declarations = vec![primary];
        if def.ext_attrs.is_exposed_on("Window") {
            declarations.push(Declaration::Variable(VariableDecl {
                name: def.name.clone(),
                ty: TsType::reference(def.name.as_str()),
                is_const: false,
            }));
        }
        declarations
    }

    /// `A includes B;` merges `B` into `A` through an empty interface.
    pub(crate) fn convert_includes(&mut self, includes: &Includes) -> Declaration {
        Declaration::Interface(InterfaceDecl {
            name: includes.target.clone(),
            extends: vec![TsType::reference(includes.includes.as_str())],
            members: Vec::new(),
        })
    }

    pub(crate) fn convert_enum(&mut self, e: &Enum) -> Declaration {
        Declaration::TypeAlias(TypeAlias {
            name: e.name.clone(),
            ty: TsType::Union(
                e.values
                    .iter()
                    .map(|value| TsType::StringLiteral(value.clone()))
                    .collect(),
            ),
        })
    }

    pub(crate) fn convert_callback(&mut self, callback: &Callback) -> Declaration {
        let params = self.convert_arguments(&callback.arguments);
        let return_type = self.convert_type(&callback.return_type);
        Declaration::TypeAlias(TypeAlias {
            name: callback.name.clone(),
            ty: TsType::Function(Box::new(FunctionType {
                params,
                return_type,
            })),
        })
    }

    pub(crate) fn convert_typedef(&mut self, typedef: &Typedef) -> Declaration {
        Declaration::TypeAlias(TypeAlias {
            name: typedef.name.clone(),
            ty: self.convert_type(&typedef.ty),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Member, Param};
    use crate::ConvertOptions;
    use webidl_ast::{self as idl, Argument, ExtendedAttributes, IdlType};

    fn converter(emscripten: bool) -> Converter {
        Converter::new(&ConvertOptions { emscripten })
    }

    fn attribute(name: &str) -> idl::Member {
        idl::Member::Attribute(idl::Attribute {
            name: name.to_string(),
            ty: IdlType::named("long"),
            readonly: false,
            special: None,
        })
    }

    #[test]
    fn test_interface_ambient_and_runtime() {
        let def = Definition::new("HTMLElement")
            .inherits("Element")
            .member(attribute("tabIndex"));

        let ambient = converter(false).convert_definition(&def);
        assert_eq!(ambient.len(), 1);
        match &ambient[0] {
            Declaration::Interface(decl) => {
                assert_eq!(decl.name, "HTMLElement");
                assert_eq!(decl.extends, vec![TsType::reference("Element")]);
                assert_eq!(decl.members.len(), 1);
            }
            other => panic!("expected interface, got {:?}", other),
        }

        let runtime = converter(true).convert_definition(&def);
        match &runtime[0] {
            Declaration::Class(decl) => {
                assert_eq!(decl.extends, vec![TsType::reference("Element")]);
                // get_, set_ and the property itself
                assert_eq!(decl.members.len(), 3);
            }
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_setlike_extends_after_inheritance() {
        let def = Definition::new("FontFaceSet")
            .inherits("EventTarget")
            .member(idl::Member::Setlike(idl::Setlike {
                element: IdlType::named("FontFace"),
                readonly: false,
            }))
            .member(attribute("status"));

        let decls = converter(false).convert_definition(&def);
        let Declaration::Interface(decl) = &decls[0] else {
            panic!("expected interface");
        };
        assert_eq!(
            decl.extends,
            vec![
                TsType::reference("EventTarget"),
                TsType::generic("Set", vec![TsType::reference("FontFace")]),
            ]
        );
    }

    #[test]
    fn test_single_base_without_members_collapses_to_alias() {
        let def = Definition::new("HighlightRegistry").member(idl::Member::Maplike(idl::Maplike {
            key: IdlType::named("DOMString"),
            value: IdlType::named("Highlight"),
            readonly: false,
        }));

        for emscripten in [false, true] {
            let decls = converter(emscripten).convert_definition(&def);
            assert_eq!(
                decls,
                vec![Declaration::TypeAlias(TypeAlias {
                    name: "HighlightRegistry".to_string(),
                    ty: TsType::generic(
                        "Map",
                        vec![TsType::string(), TsType::reference("Highlight")]
                    ),
                })]
            );
        }

        let plain = Definition::new("Alias").inherits("Base");
        assert_eq!(
            converter(false).convert_definition(&plain),
            vec![Declaration::TypeAlias(TypeAlias {
                name: "Alias".to_string(),
                ty: TsType::reference("Base"),
            })]
        );
    }

    #[test]
    fn test_empty_definition_stays_an_interface() {
        let decls = converter(false).convert_definition(&Definition::new("Empty"));
        assert_eq!(
            decls,
            vec![Declaration::Interface(InterfaceDecl {
                name: "Empty".to_string(),
                extends: vec![],
                members: vec![],
            })]
        );
    }

    #[test]
    fn test_window_exposed_adds_global() {
        let def = Definition::new("Document")
            .ext_attrs(ExtendedAttributes::new().with("Exposed", &["Window"]))
            .member(attribute("x"));
        let decls = converter(false).convert_definition(&def);

        assert_eq!(decls.len(), 2);
        assert_eq!(
            decls[1],
            Declaration::Variable(VariableDecl {
                name: "Document".to_string(),
                ty: TsType::reference("Document"),
                is_const: false,
            })
        );

        let worker_only = Definition::new("WorkerNavigator")
            .ext_attrs(ExtendedAttributes::new().with("Exposed", &["Worker"]))
            .member(attribute("x"));
        assert_eq!(converter(false).convert_definition(&worker_only).len(), 1);
    }

    #[test]
    fn test_includes() {
        let decl = converter(true).convert_includes(&Includes {
            target: "Document".to_string(),
            includes: "ParentNode".to_string(),
        });
        assert_eq!(
            decl,
            Declaration::Interface(InterfaceDecl {
                name: "Document".to_string(),
                extends: vec![TsType::reference("ParentNode")],
                members: vec![],
            })
        );
    }

    #[test]
    fn test_enum_preserves_order() {
        let decl = converter(false).convert_enum(&Enum {
            name: "Color".to_string(),
            values: vec!["red".to_string(), "green".to_string(), "blue".to_string()],
        });
        assert_eq!(
            decl,
            Declaration::TypeAlias(TypeAlias {
                name: "Color".to_string(),
                ty: TsType::Union(vec![
                    TsType::StringLiteral("red".to_string()),
                    TsType::StringLiteral("green".to_string()),
                    TsType::StringLiteral("blue".to_string()),
                ]),
            })
        );
    }

    #[test]
    fn test_callback() {
        let decl = converter(false).convert_callback(&Callback {
            name: "EventHandlerNonNull".to_string(),
            return_type: IdlType::named("any"),
            arguments: vec![Argument::new("event", IdlType::named("Event"))],
        });
        assert_eq!(
            decl,
            Declaration::TypeAlias(TypeAlias {
                name: "EventHandlerNonNull".to_string(),
                ty: TsType::Function(Box::new(FunctionType {
                    params: vec![Param::new("event", TsType::reference("Event"))],
                    return_type: TsType::reference("any"),
                })),
            })
        );
    }

    #[test]
    fn test_typedef() {
        let decl = converter(false).convert_typedef(&Typedef {
            name: "Foo".to_string(),
            ty: IdlType::named("unsigned long long"),
        });
        assert_eq!(
            decl,
            Declaration::TypeAlias(TypeAlias {
                name: "Foo".to_string(),
                ty: TsType::number(),
            })
        );
    }

    #[test]
    fn test_dictionary_runtime_is_class() {
        let def = Definition::new("Options").member(idl::Member::Field(idl::Field {
            name: "once".to_string(),
            ty: IdlType::named("boolean"),
            required: false,
        }));
        let decls = converter(true).convert_definition(&def);
        match &decls[0] {
            Declaration::Class(decl) => {
                assert!(matches!(&decl.members[0], Member::Property(p) if p.optional));
            }
            other => panic!("expected class, got {:?}", other),
        }
    }
}
