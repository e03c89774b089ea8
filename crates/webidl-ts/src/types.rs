//! Conversion of IDL type descriptors to TypeScript type expressions.

use webidl_ast::IdlType;

use crate::ast::TsType;
use crate::base_types::{classify, resolve, TypeClass};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Convert one IDL type descriptor.
///
/// Unsupported descriptor shapes are reported to `diagnostics` and become
/// `unknown`.
pub fn convert_type(ty: &IdlType, diagnostics: &mut Diagnostics) -> TsType {
    convert_type_in(ty, None, diagnostics)
}

pub(crate) fn convert_type_in(
    ty: &IdlType,
    owner: Option<&str>,
    diagnostics: &mut Diagnostics,
) -> TsType {
    match ty {
        IdlType::Named { name, nullable } => {
            let resolved = resolve(name);
            let class = classify(resolved);
            let node = match class {
                TypeClass::Numeric => TsType::number(),
                TypeClass::Textual => TsType::string(),
                TypeClass::Void => TsType::void(),
                TypeClass::Reference => TsType::reference(resolved),
            };
            wrap_nullable(node, class, *nullable)
        }
        IdlType::Generic {
            name,
            args,
            nullable,
        } => {
            let head = resolve(name);
            let args = args
                .iter()
                .map(|arg| convert_type_in(arg, owner, diagnostics))
                .collect();
            wrap_nullable(TsType::generic(head, args), classify(head), *nullable)
        }
        // Nullability of the union node itself is not carried over; only its
        // members can be nullable.
        IdlType::Union { members, .. } => TsType::Union(
            members
                .iter()
                .map(|member| convert_type_in(member, owner, diagnostics))
                .collect(),
        ),
        IdlType::Unsupported(raw) => {
            diagnostics.report(DiagnosticKind::UnsupportedType, owner, raw);
            TsType::unknown()
        }
    }
}

/// `void` is never wrapped.
fn wrap_nullable(node: TsType, class: TypeClass, nullable: bool) -> TsType {
    if nullable && class != TypeClass::Void {
        node.or_null()
    } else {
        node
    }
}
