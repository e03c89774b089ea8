//! WebIDL to TypeScript declaration conversion.
//!
//! The entry point is [`convert`], which maps a sequence of parsed IDL
//! definitions to TypeScript declaration nodes. Two output shapes exist:
//!
//! - ambient declarations (the default): interfaces, type aliases and
//!   `declare var` globals with no runtime representation;
//! - runtime classes (`emscripten: true`): class skeletons with
//!   `get_`/`set_` accessor pairs and concrete constructors, as expected by
//!   emscripten's WebIDL binder.
//!
//! Unsupported constructs are reported through [`Diagnostic`] records and
//! never abort the conversion.
//!
//! ```ignore
//! use webidl_ts::{convert, printer, ConvertOptions};
//!
//! let roots = webidl_ast::parse_definitions(json)?;
//! let conversion = convert(&roots, &ConvertOptions::default());
//! let text = printer::print(&conversion.into_declarations(), &Default::default());
//! ```

mod ast;
mod base_types;
mod declarations;
mod diagnostics;
pub mod emscripten;
mod members;
pub mod printer;
mod program;
mod types;

use serde::Deserialize;

pub use ast::*;
pub use base_types::{classify, lookup as lookup_base_type, TypeClass};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use program::{convert, Conversion, ConvertedItem};
pub use types::convert_type;

/// Options recognized by the converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Emit runtime class skeletons instead of ambient declarations.
    pub emscripten: bool,
}

impl ConvertOptions {
    pub fn mode(&self) -> OutputMode {
        if self.emscripten {
            OutputMode::Runtime
        } else {
            OutputMode::Ambient
        }
    }
}

/// The shape of the generated declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pure type declarations.
    Ambient,
    /// Class skeletons with accessor methods and constructors.
    Runtime,
}
