//! Diagnostics collected during conversion.
//!
//! Unsupported constructs never abort a conversion. Each one is recorded here
//! with a short classification and a dump of the offending input, and the
//! converter carries on with a degraded result.

use std::fmt;

use serde_json::Value;

/// What kind of construct could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A root definition tag the converter does not handle.
    UnsupportedDefinition,
    /// A member tag the converter does not handle.
    UnsupportedMember,
    /// A type descriptor shape the converter does not handle.
    UnsupportedType,
}

impl DiagnosticKind {
    /// The classification message shown to users.
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedDefinition | DiagnosticKind::UnsupportedType => {
                "Unsupported IDL type"
            }
            DiagnosticKind::UnsupportedMember => "Unsupported IDL member",
        }
    }
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Name of the definition being converted, when known.
    pub owner: Option<String>,
    /// Pretty-printed JSON of the offending input.
    pub dump: String,
}

impl Diagnostic {
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{} in `{}`", self.message(), owner),
            None => write!(f, "{}", self.message()),
        }
    }
}

/// Collector passed through a conversion.
#[derive(Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unsupported construct.
    pub fn report(&mut self, kind: DiagnosticKind, owner: Option<&str>, raw: &Value) {
        let dump = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
        tracing::warn!(owner = owner.unwrap_or("<root>"), "{}", kind.message());
        self.diagnostics.push(Diagnostic {
            kind,
            owner: owner.map(str::to_string),
            dump,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
