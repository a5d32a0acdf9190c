//! JSON-lines dump sink
//!
//! Writes the index graph in the LSIF dump format: one JSON object per
//! line, each carrying a dump-unique numeric id, a `type` of `vertex` or
//! `edge`, and a `label` naming the node or edge kind. Identifiers are
//! allocated here, monotonically from 1, for vertices and edges alike.

use crate::emitter::{Emitter, Id, ItemProperty};
use crate::hover::HoverContents;
use crate::position::Span;
use crate::Result;
use serde_json::json;
use std::io::Write;

/// [`Emitter`] implementation that serializes every node and edge as one
/// line of JSON into the wrapped writer.
pub struct JsonEmitter<W: Write> {
    writer: W,
    next_id: u64,
}

impl<W: Write> JsonEmitter<W> {
    /// Create an emitter writing into `writer`. Ids start at 1.
    pub fn new(writer: W) -> Self {
        Self { writer, next_id: 1 }
    }

    /// Consume the emitter and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn alloc(&mut self) -> Id {
        let id = Id(self.next_id);
        self.next_id += 1;
        id
    }

    fn write_record(&mut self, record: serde_json::Value) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn write_vertex(&mut self, label: &str, mut fields: serde_json::Value) -> Result<Id> {
        let id = self.alloc();
        let obj = fields.as_object_mut().expect("vertex fields must be an object");
        obj.insert("id".into(), json!(id));
        obj.insert("type".into(), json!("vertex"));
        obj.insert("label".into(), json!(label));
        self.write_record(fields)?;
        Ok(id)
    }

    fn write_edge(&mut self, label: &str, mut fields: serde_json::Value) -> Result<()> {
        let id = self.alloc();
        let obj = fields.as_object_mut().expect("edge fields must be an object");
        obj.insert("id".into(), json!(id));
        obj.insert("type".into(), json!("edge"));
        obj.insert("label".into(), json!(label));
        self.write_record(fields)
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn emit_project(&mut self, language: &str) -> Result<Id> {
        self.write_vertex("project", json!({ "kind": language }))
    }

    fn emit_document(&mut self, uri: &str, language: &str, contents: &str) -> Result<Id> {
        self.write_vertex(
            "document",
            json!({
                "uri": uri,
                "languageId": language,
                "contents": contents,
            }),
        )
    }

    fn emit_range(&mut self, span: Span) -> Result<Id> {
        self.write_vertex(
            "range",
            json!({
                "start": span.start,
                "end": span.end,
            }),
        )
    }

    fn emit_result_set(&mut self) -> Result<Id> {
        self.write_vertex("resultSet", json!({}))
    }

    fn emit_hover_result(&mut self, contents: &HoverContents) -> Result<Id> {
        // The consumer-facing envelope: a one-element contents array.
        self.write_vertex(
            "hoverResult",
            json!({
                "result": { "contents": [contents] },
            }),
        )
    }

    fn emit_definition_result(&mut self) -> Result<Id> {
        self.write_vertex("definitionResult", json!({}))
    }

    fn emit_reference_result(&mut self) -> Result<Id> {
        self.write_vertex("referenceResult", json!({}))
    }

    fn emit_next(&mut self, out_v: Id, in_v: Id) -> Result<()> {
        self.write_edge("next", json!({ "outV": out_v, "inV": in_v }))
    }

    fn emit_hover(&mut self, out_v: Id, in_v: Id) -> Result<()> {
        self.write_edge("textDocument/hover", json!({ "outV": out_v, "inV": in_v }))
    }

    fn emit_definition(&mut self, out_v: Id, in_v: Id) -> Result<()> {
        self.write_edge("textDocument/definition", json!({ "outV": out_v, "inV": in_v }))
    }

    fn emit_references(&mut self, out_v: Id, in_v: Id) -> Result<()> {
        self.write_edge("textDocument/references", json!({ "outV": out_v, "inV": in_v }))
    }

    fn emit_item(
        &mut self,
        out_v: Id,
        in_vs: &[Id],
        document: Id,
        property: Option<ItemProperty>,
    ) -> Result<()> {
        // `property` is omitted from the record entirely when absent.
        let fields = match property {
            Some(property) => json!({
                "outV": out_v,
                "inVs": in_vs,
                "document": document,
                "property": property,
            }),
            None => json!({
                "outV": out_v,
                "inVs": in_vs,
                "document": document,
            }),
        };
        self.write_edge("item", fields)
    }

    fn emit_contains(&mut self, out_v: Id, in_vs: &[Id]) -> Result<()> {
        self.write_edge("contains", json!({ "outV": out_v, "inVs": in_vs }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Span;

    fn lines(buf: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_vertex_shape_and_id_allocation() {
        let mut emitter = JsonEmitter::new(Vec::new());
        let project = emitter.emit_project("py").unwrap();
        let doc = emitter
            .emit_document("file:///tmp/a.py", "py", "ZGVmIGYoKTogcGFzcw==")
            .unwrap();

        assert_eq!(project, Id(1));
        assert_eq!(doc, Id(2));

        let records = lines(&emitter.into_inner());
        assert_eq!(records[0]["type"], "vertex");
        assert_eq!(records[0]["label"], "project");
        assert_eq!(records[0]["kind"], "py");
        assert_eq!(records[1]["label"], "document");
        assert_eq!(records[1]["uri"], "file:///tmp/a.py");
        assert_eq!(records[1]["languageId"], "py");
        assert_eq!(records[1]["contents"], "ZGVmIGYoKTogcGFzcw==");
    }

    #[test]
    fn test_range_uses_lsif_positions() {
        let mut emitter = JsonEmitter::new(Vec::new());
        emitter.emit_range(Span::from_coords(0, 4, 0, 5)).unwrap();

        let records = lines(&emitter.into_inner());
        assert_eq!(records[0]["start"], serde_json::json!({"line": 0, "character": 4}));
        assert_eq!(records[0]["end"], serde_json::json!({"line": 0, "character": 5}));
    }

    #[test]
    fn test_hover_result_wraps_contents() {
        let mut emitter = JsonEmitter::new(Vec::new());
        let contents = HoverContents::new("py", "def f(): pass");
        emitter.emit_hover_result(&contents).unwrap();

        let records = lines(&emitter.into_inner());
        assert_eq!(
            records[0]["result"]["contents"],
            serde_json::json!([{"language": "py", "value": "def f(): pass"}])
        );
    }

    #[test]
    fn test_edges_allocate_ids_too() {
        let mut emitter = JsonEmitter::new(Vec::new());
        let a = emitter.emit_result_set().unwrap();
        let b = emitter.emit_reference_result().unwrap();
        emitter.emit_references(a, b).unwrap();

        let records = lines(&emitter.into_inner());
        assert_eq!(records[2]["type"], "edge");
        assert_eq!(records[2]["label"], "textDocument/references");
        assert_eq!(records[2]["id"], 3);
        assert_eq!(records[2]["outV"], 1);
        assert_eq!(records[2]["inV"], 2);
    }

    #[test]
    fn test_item_property_is_optional() {
        let mut emitter = JsonEmitter::new(Vec::new());
        let result = emitter.emit_definition_result().unwrap();
        emitter.emit_item(result, &[Id(10)], Id(20), None).unwrap();
        emitter
            .emit_item(result, &[Id(10)], Id(20), Some(ItemProperty::Definitions))
            .unwrap();

        let records = lines(&emitter.into_inner());
        assert!(records[1].get("property").is_none());
        assert_eq!(records[2]["property"], "definitions");
        assert_eq!(records[2]["inVs"], serde_json::json!([10]));
        assert_eq!(records[2]["document"], 20);
    }
}
