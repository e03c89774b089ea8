//! Module wrapper for emscripten's WebIDL binder output.
//!
//! The binder exposes every bound class on the compiled module object, next
//! to a handful of runtime helpers. [`wrap_module`] places the converted
//! class skeletons in a namespace of that name and declares the module
//! factory as a function returning the namespace.

use crate::ast::{Declaration, FunctionDecl, NamespaceDecl, Param, TsType, VariableDecl};

pub const DEFAULT_MODULE_NAME: &str = "Module";

const HEAP_VIEWS: &[(&str, &str)] = &[
    ("HEAP8", "Int8Array"),
    ("HEAP16", "Int16Array"),
    ("HEAP32", "Int32Array"),
    ("HEAPU8", "Uint8Array"),
    ("HEAPU16", "Uint16Array"),
    ("HEAPU32", "Uint32Array"),
    ("HEAPF32", "Float32Array"),
    ("HEAPF64", "Float64Array"),
];

/// Wrap converted declarations in `declare namespace <name>` and append the
/// `declare function <name>(): Promise<typeof <name>>` factory.
pub fn wrap_module(name: &str, declarations: Vec<Declaration>) -> Vec<Declaration> {
    let mut body = declarations;
    body.extend(runtime_helpers());

    vec![
        Declaration::Namespace(NamespaceDecl {
            name: name.to_string(),
            body,
        }),
        Declaration::Function(FunctionDecl {
            name: name.to_string(),
            params: Vec::new(),
            return_type: TsType::generic("Promise", vec![TsType::TypeQuery(name.to_string())]),
        }),
    ]
}

fn function(name: &str, params: Vec<Param>, return_type: TsType) -> Declaration {
    Declaration::Function(FunctionDecl {
        name: name.to_string(),
        params,
        return_type,
    })
}

fn runtime_helpers() -> Vec<Declaration> {
    let mut helpers = vec![
        function("destroy", vec![Param::new("obj", TsType::any())], TsType::void()),
        function(
            "getPointer",
            vec![Param::new("obj", TsType::any())],
            TsType::number(),
        ),
        function(
            "compare",
            vec![Param::new("a", TsType::any()), Param::new("b", TsType::any())],
            TsType::reference("boolean"),
        ),
        function(
            "_malloc",
            vec![Param::new("size", TsType::number())],
            TsType::number(),
        ),
        function("_free", vec![Param::new("ptr", TsType::number())], TsType::void()),
    ];

    helpers.extend(HEAP_VIEWS.iter().map(|(name, array)| {
        Declaration::Variable(VariableDecl {
            name: name.to_string(),
            ty: TsType::reference(*array),
            is_const: true,
        })
    }));
    helpers
}
