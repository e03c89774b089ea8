//! Whole-program conversion: one pass over the root definitions.

use webidl_ast::RootType;

use crate::ast::{Declaration, TsType};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::{types, ConvertOptions, OutputMode};

/// Declarations produced for one root definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedItem {
    /// Name of the source definition.
    pub source: String,
    /// The primary declaration, followed by auxiliary ones (window globals).
    pub declarations: Vec<Declaration>,
}

/// Result of converting a sequence of root definitions.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// One entry per convertible definition, in input order.
    pub items: Vec<ConvertedItem>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// All declarations, flattened in order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().flat_map(|item| item.declarations.iter())
    }

    pub fn into_declarations(self) -> Vec<Declaration> {
        self.items
            .into_iter()
            .flat_map(|item| item.declarations)
            .collect()
    }
}

/// Convert root definitions in order.
///
/// Unsupported definitions are reported and omitted; they never stop the
/// remaining definitions from being converted.
pub fn convert(roots: &[RootType], options: &ConvertOptions) -> Conversion {
    let mut converter = Converter::new(options);
    let items = roots
        .iter()
        .filter_map(|root| converter.convert_root(root))
        .collect();

    Conversion {
        items,
        diagnostics: converter.diagnostics.into_vec(),
    }
}

pub(crate) struct Converter {
    pub(crate) mode: OutputMode,
    pub(crate) diagnostics: Diagnostics,
    /// Definition currently being converted, attached to diagnostics.
    owner: Option<String>,
}

impl Converter {
    pub(crate) fn new(options: &ConvertOptions) -> Self {
        Self {
            mode: options.mode(),
            diagnostics: Diagnostics::new(),
            owner: None,
        }
    }

    pub(crate) fn convert_type(&mut self, ty: &webidl_ast::IdlType) -> TsType {
        types::convert_type_in(ty, self.owner.as_deref(), &mut self.diagnostics)
    }

    fn convert_root(&mut self, root: &RootType) -> Option<ConvertedItem> {
        self.owner = root.name().map(str::to_string);

        let declarations = match root {
            RootType::Interface(def)
            | RootType::InterfaceMixin(def)
            | RootType::CallbackInterface(def)
            | RootType::Dictionary(def)
            | RootType::Namespace(def) => self.convert_definition(def),
            RootType::Includes(includes) => vec![self.convert_includes(includes)],
            RootType::Enum(e) => vec![self.convert_enum(e)],
            RootType::Callback(callback) => vec![self.convert_callback(callback)],
            RootType::Typedef(typedef) => vec![self.convert_typedef(typedef)],
            RootType::Unsupported { kind, raw } => {
                tracing::debug!(kind = %kind, "skipping unsupported definition");
                self.diagnostics
                    .report(DiagnosticKind::UnsupportedDefinition, None, raw);
                return None;
            }
        };

        let source = self.owner.take().unwrap_or_default();
        tracing::debug!(name = %source, count = declarations.len(), "converted definition");
        Some(ConvertedItem {
            source,
            declarations,
        })
    }
}
