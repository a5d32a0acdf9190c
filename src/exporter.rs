//! Per-file export - turns one file's definitions and uses into a
//! referentially consistent index-graph fragment
//!
//! The export runs in two sequential passes. The definition pass gives
//! every true definition its range, result-set and hover nodes and records
//! a [`DefinitionMeta`] per definition. The use pass then walks each
//! recorded definition's use-sites and ties them back to the result-set
//! seeded for it, so no use can reference a result-set that does not exist
//! yet. Containment edges are emitted last, once every range id is known.

use crate::emitter::{Emitter, Id, ItemProperty};
use crate::hover::{HoverContents, definition_summary};
use crate::provider::{Definition, SymbolProvider};
use crate::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-definition bookkeeping carried from the definition pass into the
/// use pass. Created once per definition, never mutated.
#[derive(Debug, Clone)]
struct DefinitionMeta {
    /// Id of the definition's own range node
    range_id: Id,
    /// Id of the result-set aggregating all of the symbol's occurrences
    result_set_id: Id,
    /// Hover payload, reused verbatim for every use of the definition
    contents: HoverContents,
}

/// Exports one file's symbol structure into the enclosing project graph.
pub struct FileExporter<'e, E> {
    emitter: &'e mut E,
    project_id: Id,
    language: String,
}

impl<'e, E: Emitter> FileExporter<'e, E> {
    /// Create an exporter attached to a project node
    pub fn new(emitter: &'e mut E, project_id: Id, language: impl Into<String>) -> Self {
        Self {
            emitter,
            project_id,
            language: language.into(),
        }
    }

    /// Read `filename` and export its index-graph fragment.
    ///
    /// Fails fast on an unreadable file; nothing is emitted in that case.
    pub fn export<P: SymbolProvider>(&mut self, provider: &P, filename: &Path) -> Result<()> {
        println!("File: {}", filename.display());

        let source = std::fs::read_to_string(filename)?;
        self.export_source(provider, filename, &source)
    }

    /// Export `source` as the contents of `filename`.
    pub fn export_source<P: SymbolProvider>(
        &mut self,
        provider: &P,
        filename: &Path,
        source: &str,
    ) -> Result<()> {
        let source_lines: Vec<&str> = source.split('\n').collect();
        let definitions = provider.definitions(source, filename)?;

        let uri = format!("file://{}", std::path::absolute(filename)?.display());
        let document_id = self.emitter.emit_document(
            &uri,
            &self.language,
            &BASE64.encode(source.as_bytes()),
        )?;

        // Definition pass: seed every true definition before any use of
        // any definition is examined.
        let mut metas: Vec<(&P::Def, DefinitionMeta)> = Vec::new();
        for definition in &definitions {
            if !definition.is_definition() {
                continue;
            }
            let meta = self.export_definition(definition, &source_lines)?;
            metas.push((definition, meta));
        }

        // Use pass, in the order definitions were seeded.
        let mut use_range_ids: Vec<Id> = Vec::new();
        for (definition, meta) in &metas {
            let range_ids = self.export_assignments(*definition, meta, document_id)?;
            use_range_ids.extend(range_ids);
        }

        // Definition ranges first, use ranges after, both in emission order.
        let mut all_range_ids: Vec<Id> = metas.iter().map(|(_, meta)| meta.range_id).collect();
        all_range_ids.extend(use_range_ids);

        self.emitter.emit_contains(self.project_id, &[document_id])?;
        self.emitter.emit_contains(document_id, &all_range_ids)?;
        Ok(())
    }

    /// Emit a definition's own subgraph: result-set, range and hover,
    /// linked by `next` and `hover` edges.
    fn export_definition<D: Definition>(
        &mut self,
        definition: &D,
        source_lines: &[&str],
    ) -> Result<DefinitionMeta> {
        let span = definition.span();
        let contents = HoverContents::new(
            self.language.clone(),
            definition_summary(source_lines, span),
        );

        let result_set_id = self.emitter.emit_result_set()?;
        let range_id = self.emitter.emit_range(span)?;
        let hover_id = self.emitter.emit_hover_result(&contents)?;

        self.emitter.emit_next(range_id, result_set_id)?;
        self.emitter.emit_hover(result_set_id, hover_id)?;

        Ok(DefinitionMeta {
            range_id,
            result_set_id,
            contents,
        })
    }

    /// Walk a definition's use-sites, emit a use subgraph per resolvable
    /// use, then close the definition with its reference result. Returns
    /// the use range ids in emission order.
    fn export_assignments<D: Definition>(
        &mut self,
        definition: &D,
        meta: &DefinitionMeta,
        document_id: Id,
    ) -> Result<Vec<Id>> {
        let mut range_ids = Vec::new();
        for assignment in definition.goto_assignments() {
            if assignment.line.is_none() {
                debug!("skipping use without a resolvable position");
                continue;
            }
            range_ids.push(self.export_use(definition, meta, document_id)?);
        }

        self.export_reference_result(meta, &range_ids, document_id)?;
        Ok(range_ids)
    }

    /// Emit one use's subgraph: a range, a definition result pointing back
    /// at the defining range, and a hover identical to the definition's.
    ///
    /// The use range carries the defining occurrence's span; the use's own
    /// position only gates the skip in [`Self::export_assignments`].
    fn export_use<D: Definition>(
        &mut self,
        definition: &D,
        meta: &DefinitionMeta,
        document_id: Id,
    ) -> Result<Id> {
        let range_id = self.emitter.emit_range(definition.span())?;
        let result_id = self.emitter.emit_definition_result()?;
        let hover_id = self.emitter.emit_hover_result(&meta.contents)?;

        self.emitter.emit_next(range_id, meta.result_set_id)?;
        self.emitter.emit_definition(meta.result_set_id, result_id)?;
        self.emitter
            .emit_item(result_id, &[meta.range_id], document_id, None)?;
        self.emitter.emit_hover(meta.result_set_id, hover_id)?;

        Ok(range_id)
    }

    /// Emit the reference result closing a definition. The defining range
    /// is always listed under `definitions`; a `references` item is only
    /// emitted when at least one use resolved.
    fn export_reference_result(
        &mut self,
        meta: &DefinitionMeta,
        use_range_ids: &[Id],
        document_id: Id,
    ) -> Result<()> {
        let result_id = self.emitter.emit_reference_result()?;
        self.emitter.emit_references(meta.result_set_id, result_id)?;
        self.emitter.emit_item(
            result_id,
            &[meta.range_id],
            document_id,
            Some(ItemProperty::Definitions),
        )?;

        if !use_range_ids.is_empty() {
            self.emitter.emit_item(
                result_id,
                use_range_ids,
                document_id,
                Some(ItemProperty::References),
            )?;
        }
        Ok(())
    }
}

/// Export a whole project: one project node, then one file fragment per
/// path against the shared emitter. The first failing file aborts the run.
pub fn export_project<E: Emitter, P: SymbolProvider>(
    emitter: &mut E,
    provider: &P,
    language: &str,
    files: &[PathBuf],
) -> Result<Id> {
    let project_id = emitter.emit_project(language)?;
    for file in files {
        FileExporter::new(emitter, project_id, language).export(provider, file)?;
    }
    Ok(project_id)
}
