//! # Lsifgen - LSIF index generator
//!
//! Converts the symbol-definition/use structure of source files into an
//! LSIF-style code-intelligence graph consumed by editors and code browsers
//! for go-to-definition, find-references and hover.
//!
//! Lsifgen provides:
//! - A per-file exporter producing a referentially consistent graph fragment
//! - A symbol-provider trait seam with a tree-sitter Python implementation
//! - An emitter trait seam with a JSON-lines dump sink
//! - Project-level wiring and a CLI over both

pub mod position;
pub mod provider;
pub mod python;
pub mod hover;
pub mod emitter;
pub mod dump;
pub mod exporter;


// Re-exports for convenient access
pub use position::{Position, Span};
pub use provider::{Assignment, Definition, SymbolProvider};
pub use python::{PythonProvider, LANGUAGE_PY};
pub use hover::HoverContents;
pub use emitter::{Emitter, Id, ItemProperty};
pub use dump::JsonEmitter;
pub use exporter::{FileExporter, export_project};

/// Result type alias for Lsifgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Lsifgen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Emit error: {0}")]
    Emit(#[from] serde_json::Error),
}
