//! Graph-emission interface
//!
//! The exporter builds the index graph through this trait: one method per
//! node and edge kind. Node calls allocate and return a fresh identifier;
//! edge calls reference identifiers returned earlier. The trait owns nothing
//! about the wire format - the JSON-lines sink lives in [`crate::dump`].

use crate::Result;
use crate::hover::HoverContents;
use crate::position::Span;
use serde::Serialize;
use std::fmt;

/// Identifier of a node in the index graph.
///
/// Allocated by the emitter, monotonically increasing, unique within one
/// dump. Serializes as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Id(pub u64);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grouping tag on an `item` edge from a reference result: whether the
/// listed ranges are the defining occurrences or the use-sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemProperty {
    Definitions,
    References,
}

/// Stateful sink for index-graph nodes and edges.
///
/// Implementations allocate a fresh unique [`Id`] per node call and record
/// the node or edge in order. Failures are fatal to the current export; the
/// target format is append-only and nothing is rolled back.
pub trait Emitter {
    /// Record the project node all documents hang under
    fn emit_project(&mut self, language: &str) -> Result<Id>;

    /// Record a document node keyed by URI, language tag and base64-encoded
    /// raw source bytes
    fn emit_document(&mut self, uri: &str, language: &str, contents: &str) -> Result<Id>;

    /// Record a range node at the given coordinates
    fn emit_range(&mut self, span: Span) -> Result<Id>;

    /// Record a result-set node aggregating one symbol's occurrences
    fn emit_result_set(&mut self) -> Result<Id>;

    /// Record a hover-result node wrapping the payload in the sink's
    /// envelope format
    fn emit_hover_result(&mut self, contents: &HoverContents) -> Result<Id>;

    /// Record a definition-result node
    fn emit_definition_result(&mut self) -> Result<Id>;

    /// Record a reference-result node
    fn emit_reference_result(&mut self) -> Result<Id>;

    /// Record a `next` edge: range → result-set
    fn emit_next(&mut self, out_v: Id, in_v: Id) -> Result<()>;

    /// Record a `hover` edge: result-set → hover result
    fn emit_hover(&mut self, out_v: Id, in_v: Id) -> Result<()>;

    /// Record a `definition` edge: result-set → definition result
    fn emit_definition(&mut self, out_v: Id, in_v: Id) -> Result<()>;

    /// Record a `references` edge: result-set → reference result
    fn emit_references(&mut self, out_v: Id, in_v: Id) -> Result<()>;

    /// Record an `item` edge listing the ranges belonging to a result,
    /// scoped to a document, optionally tagged with a grouping property
    fn emit_item(
        &mut self,
        out_v: Id,
        in_vs: &[Id],
        document: Id,
        property: Option<ItemProperty>,
    ) -> Result<()>;

    /// Record a `contains` edge: parent node → child nodes
    fn emit_contains(&mut self, out_v: Id, in_vs: &[Id]) -> Result<()>;
}
