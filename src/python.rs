//! Python symbol provider
//!
//! Extracts symbol occurrences from Python source using tree-sitter.
//! Definitions are the names of functions, classes and module-level
//! assignment targets; names introduced by imports are reported as
//! non-definition occurrences. Uses are resolved by identifier text at
//! module granularity.

use crate::position::{Position, Span};
use crate::provider::{Assignment, Definition, SymbolProvider};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

/// Language tag used for documents and hover payloads
pub const LANGUAGE_PY: &str = "py";

/// One Python symbol occurrence with its resolved use-sites.
#[derive(Debug, Clone)]
pub struct PyOccurrence {
    span: Span,
    is_definition: bool,
    uses: Vec<Assignment>,
}

impl Definition for PyOccurrence {
    fn span(&self) -> Span {
        self.span
    }

    fn is_definition(&self) -> bool {
        self.is_definition
    }

    fn goto_assignments(&self) -> Box<dyn Iterator<Item = Assignment> + '_> {
        Box::new(self.uses.iter().copied())
    }
}

/// Python symbol provider
pub struct PythonProvider {
    language: Language,
}

impl PythonProvider {
    /// Create a new provider with the Python grammar loaded
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for PythonProvider {
    type Def = PyOccurrence;

    fn definitions(&self, source: &str, filename: &Path) -> Result<Vec<PyOccurrence>> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::Parse(format!("loading python grammar: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse(format!("failed to parse {}", filename.display())))?;

        let mut collector = Collector::new(source);
        collector.collect_occurrences(tree.root_node(), true);
        collector.collect_uses(tree.root_node());
        Ok(collector.occurrences)
    }
}

/// Accumulates occurrences over two walks: one for defining/import names,
/// one for the identifiers that use them.
struct Collector<'s> {
    source: &'s str,
    occurrences: Vec<PyOccurrence>,
    /// Definition index by name; first definition of a name wins
    by_name: HashMap<String, usize>,
    /// Byte offsets of defining name nodes, excluded from use matching
    name_node_starts: HashSet<usize>,
}

impl<'s> Collector<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            occurrences: Vec::new(),
            by_name: HashMap::new(),
            name_node_starts: HashSet::new(),
        }
    }

    fn node_text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn node_span(node: Node) -> Span {
        let start = node.start_position();
        let end = node.end_position();
        Span::new(
            Position::new(start.row as u32, start.column as u32),
            Position::new(end.row as u32, end.column as u32),
        )
    }

    fn add_occurrence(&mut self, name_node: Node, is_definition: bool) {
        let name = self.node_text(name_node).to_string();
        if name.is_empty() {
            return;
        }

        let index = self.occurrences.len();
        self.occurrences.push(PyOccurrence {
            span: Self::node_span(name_node),
            is_definition,
            uses: Vec::new(),
        });
        self.name_node_starts.insert(name_node.start_byte());
        if is_definition {
            self.by_name.entry(name).or_insert(index);
        }
    }

    /// First walk: defining occurrences in source order.
    ///
    /// `module_level` is true only for statements directly under the module
    /// node; assignment targets inside function or class bodies are locals
    /// and are not indexed.
    fn collect_occurrences(&mut self, node: Node, module_level: bool) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "function_definition" | "class_definition" => {
                    if let Some(name_node) = child.child_by_field_name("name") {
                        self.add_occurrence(name_node, true);
                    }
                    // Nested definitions are still indexed, their
                    // assignment targets are not.
                    self.collect_occurrences(child, false);
                }
                "assignment" if module_level => {
                    if let Some(left) = child.child_by_field_name("left") {
                        if left.kind() == "identifier" {
                            self.add_occurrence(left, true);
                        }
                    }
                }
                "import_statement" | "import_from_statement" => {
                    self.collect_import_names(child);
                }
                _ => {
                    self.collect_occurrences(child, module_level);
                }
            }
        }
    }

    /// Names bound by an import: occurrences, but not definitions.
    fn collect_import_names(&mut self, import_node: Node) {
        let mut cursor = import_node.walk();
        let names: Vec<Node> = import_node
            .children_by_field_name("name", &mut cursor)
            .collect();
        for name in names {
            match name.kind() {
                "dotted_name" => {
                    let mut inner = name.walk();
                    if let Some(last) = name.named_children(&mut inner).last() {
                        self.add_occurrence(last, false);
                    }
                }
                "aliased_import" => {
                    if let Some(alias) = name.child_by_field_name("alias") {
                        self.add_occurrence(alias, false);
                    }
                }
                "identifier" => self.add_occurrence(name, false),
                _ => {}
            }
        }
    }

    /// Second walk: every identifier matching a definition name becomes a
    /// use-site of that definition, except the defining name itself.
    fn collect_uses(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "identifier" {
                if self.name_node_starts.contains(&child.start_byte()) {
                    continue;
                }
                let text = self.node_text(child);
                if let Some(&index) = self.by_name.get(text) {
                    let pos = child.start_position();
                    self.occurrences[index]
                        .uses
                        .push(Assignment::at(pos.row as u32, pos.column as u32));
                }
            } else {
                self.collect_uses(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<PyOccurrence> {
        PythonProvider::new()
            .definitions(source, Path::new("test.py"))
            .unwrap()
    }

    #[test]
    fn test_function_definition_with_use() {
        let occurrences = parse("def f(): pass\n\nf()\n");
        assert_eq!(occurrences.len(), 1);

        let def = &occurrences[0];
        assert!(def.is_definition());
        assert_eq!(def.span(), Span::from_coords(0, 4, 0, 5));

        let uses: Vec<Assignment> = def.goto_assignments().collect();
        assert_eq!(uses, vec![Assignment::at(2, 0)]);
    }

    #[test]
    fn test_class_and_module_assignment() {
        let occurrences = parse("class C:\n    pass\n\nx = 1\ny = C()\nprint(x)\n");
        assert_eq!(occurrences.len(), 3);

        // class C, used once on line 4
        assert_eq!(occurrences[0].span(), Span::from_coords(0, 6, 0, 7));
        assert_eq!(occurrences[0].goto_assignments().count(), 1);

        // x = 1, used in print(x)
        let x_uses: Vec<Assignment> = occurrences[1].goto_assignments().collect();
        assert_eq!(x_uses, vec![Assignment::at(5, 6)]);

        // y = C(), never used
        assert_eq!(occurrences[2].goto_assignments().count(), 0);
    }

    #[test]
    fn test_imports_are_not_definitions() {
        let occurrences = parse("import os\nfrom sys import argv\n");
        assert_eq!(occurrences.len(), 2);
        assert!(occurrences.iter().all(|o| !o.is_definition()));
    }

    #[test]
    fn test_local_assignments_are_skipped() {
        let occurrences = parse("def f():\n    local = 1\n    return local\n");
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].span(), Span::from_coords(0, 4, 0, 5));
    }

    #[test]
    fn test_definition_with_no_uses() {
        let occurrences = parse("def unused(): pass\n");
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].goto_assignments().count(), 0);
    }
}
