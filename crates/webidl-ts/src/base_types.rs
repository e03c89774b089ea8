//! Mapping of IDL built-in type names to TypeScript type names.

/// Look up the TypeScript name for an IDL built-in type or generic.
///
/// Returns `None` for names that are not built-ins; callers treat those as
/// references to user-defined types and keep the name as-is.
pub fn lookup(name: &str) -> Option<&'static str> {
    let mapped = match name {
        // Buffer source types keep their names.
        "ArrayBuffer" => "ArrayBuffer",
        "SharedArrayBuffer" => "SharedArrayBuffer",
        "ArrayBufferView" => "ArrayBufferView",
        "BufferSource" => "BufferSource",
        "DataView" => "DataView",
        "Int8Array" => "Int8Array",
        "Int16Array" => "Int16Array",
        "Int32Array" => "Int32Array",
        "Uint8Array" => "Uint8Array",
        "Uint16Array" => "Uint16Array",
        "Uint32Array" => "Uint32Array",
        "Uint8ClampedArray" => "Uint8ClampedArray",
        "BigInt64Array" => "BigInt64Array",
        "BigUint64Array" => "BigUint64Array",
        "Float32Array" => "Float32Array",
        "Float64Array" => "Float64Array",

        // Integer types.
        "byte" | "octet" | "short" | "unsigned short" | "long" | "unsigned long"
        | "long long" | "unsigned long long" => "number",

        // Floating point types.
        "float" | "unrestricted float" | "double" | "unrestricted double" => "number",

        // String types.
        "ByteString" | "DOMString" | "USVString" => "string",

        "any" => "any",
        "boolean" => "boolean",
        "Date" => "Date",
        "Function" => "Function",
        "Promise" => "Promise",
        "void" => "void",
        "undefined" => "void",
        "object" => "object",
        "symbol" => "symbol",
        "bigint" => "bigint",

        // Generic heads.
        "sequence" => "Array",
        "ObservableArray" => "Array",
        "record" => "Record",
        "FrozenArray" => "ReadonlyArray",

        _ => return None,
    };
    Some(mapped)
}

/// Resolve a name through the table, falling back to the name itself.
pub fn resolve(name: &str) -> &str {
    lookup(name).unwrap_or(name)
}

/// How a resolved type name is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Numeric,
    Textual,
    Void,
    Reference,
}

/// Classify a name that has already been resolved through [`lookup`].
pub fn classify(resolved: &str) -> TypeClass {
    match resolved {
        "number" => TypeClass::Numeric,
        "string" => TypeClass::Textual,
        "void" => TypeClass::Void,
        _ => TypeClass::Reference,
    }
}
