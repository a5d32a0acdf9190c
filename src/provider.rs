//! Symbol-provider framework
//!
//! Defines the traits the exporter consumes: a provider parses one file and
//! yields symbol occurrences, each occurrence knowing whether it is a true
//! definition and which use-sites resolve to it. The exporter never touches
//! a parser directly, so providers for other resolution engines can be
//! plugged in behind these traits.

use crate::Result;
use crate::position::Span;
use std::path::Path;

/// A single use-site of a symbol.
///
/// A `line` of `None` means the resolver could not pin the use to a source
/// position; the exporter skips such uses without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Line of the use (0-indexed), if resolvable
    pub line: Option<u32>,
    /// Character offset of the use within its line (0-indexed)
    pub character: u32,
}

impl Assignment {
    /// Create a use-site with a resolved position
    pub fn at(line: u32, character: u32) -> Self {
        Self {
            line: Some(line),
            character,
        }
    }

    /// Create a use-site with no resolvable position
    pub fn unresolved() -> Self {
        Self {
            line: None,
            character: 0,
        }
    }
}

/// One symbol occurrence in a file.
///
/// Providers may return occurrences that are not declarations (an imported
/// name, for example); `is_definition` distinguishes them, and the exporter
/// only seeds result-sets for true definitions.
pub trait Definition {
    /// The source span of the defining occurrence
    fn span(&self) -> Span;

    /// Whether this occurrence declares the symbol (rather than merely
    /// naming it)
    fn is_definition(&self) -> bool;

    /// The use-sites that resolve to this symbol.
    ///
    /// The sequence is finite; the exporter traverses it exactly once.
    fn goto_assignments(&self) -> Box<dyn Iterator<Item = Assignment> + '_>;
}

/// Trait for symbol providers
///
/// A provider is responsible for:
/// 1. Parsing a file's source text
/// 2. Collecting symbol occurrences in source order
/// 3. Resolving use-sites back to their definitions
pub trait SymbolProvider {
    /// The occurrence type this provider yields
    type Def: Definition;

    /// Parse `source` and return its symbol occurrences in source order.
    ///
    /// `filename` is informational (diagnostics); the content is `source`.
    fn definitions(&self, source: &str, filename: &Path) -> Result<Vec<Self::Def>>;
}
