//! Persisted document format.
//!
//! ```json
//! { "name": "...", "timestamp": "2024-01-01T00:00:00Z", "nodes": [...], "connectors": [...] }
//! ```
//!
//! Loading is all-or-nothing: a document either parses and validates
//! completely or nothing from it is applied.

use crate::error::EditorError;
use crate::model::{Connector, Node, SceneSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped flowchart as written by an explicit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl Document {
    pub fn new(name: impl Into<String>, timestamp: DateTime<Utc>, snapshot: SceneSnapshot) -> Self {
        Self {
            name: name.into(),
            timestamp,
            nodes: snapshot.nodes,
            connectors: snapshot.connectors,
        }
    }

    /// Parse and validate a document. Missing `nodes`/`connectors` are
    /// empty; anything unparseable is `MalformedDocument`.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let mut doc: Document = serde_json::from_str(json)
            .map_err(|e| EditorError::MalformedDocument(e.to_string()))?;
        let clean = doc.snapshot().sanitize()?;
        doc.nodes = clean.nodes;
        doc.connectors = clean.connectors;
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        serde_json::to_string_pretty(self).map_err(|e| EditorError::Encode(e.to_string()))
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            nodes: self.nodes.clone(),
            connectors: self.connectors.clone(),
        }
    }

    /// Case-insensitive substring match on the name.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl SceneSnapshot {
    /// Parse an autosave payload (`{ nodes, connectors }`).
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let snapshot: SceneSnapshot = serde_json::from_str(json)
            .map_err(|e| EditorError::MalformedDocument(e.to_string()))?;
        snapshot.sanitize()
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        serde_json::to_string(self).map_err(|e| EditorError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::NodeType;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_lists_default_to_empty() {
        let doc = Document::from_json(r#"{ "name": "empty", "timestamp": "2024-05-01T10:00:00Z" }"#)
            .unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.connectors.is_empty());
        assert_eq!(doc.name, "empty");
    }

    #[test]
    fn autosave_payload_without_name_still_loads() {
        let doc = Document::from_json(r#"{ "nodes": [], "connectors": [] }"#).unwrap();
        assert_eq!(doc.name, "");
    }

    #[test]
    fn garbage_is_malformed() {
        for input in ["not json", "[1, 2]", r#"{ "nodes": [{ "id": "x" }] }"#] {
            let err = Document::from_json(input).unwrap_err();
            assert!(matches!(err, EditorError::MalformedDocument(_)), "{input}");
        }
    }

    #[test]
    fn unknown_node_type_is_malformed() {
        let json = r##"{ "nodes": [{ "id": 0, "type": "hexagon", "x": 0, "y": 0,
            "width": 120, "height": 60, "text": "", "fillColor": "#ffffff",
            "borderColor": "#000000", "borderRadius": 5, "fontSize": 14 }] }"##;
        assert!(matches!(
            Document::from_json(json),
            Err(EditorError::MalformedDocument(_))
        ));
    }

    #[test]
    fn parses_documents_written_by_the_browser_build() {
        let json = r##"{
          "name": "Checkout",
          "timestamp": "2024-03-09T18:22:41.512Z",
          "nodes": [
            { "id": 0, "type": "start", "x": 100, "y": 100, "width": 120, "height": 60,
              "text": "Start", "fillColor": "#ffffff", "borderColor": "#000000",
              "borderRadius": 30, "fontSize": 14 },
            { "id": 1, "type": "decision", "x": 300, "y": 100, "width": 120, "height": 60,
              "text": "Paid?", "fillColor": "#ffeeaa", "borderColor": "#333333",
              "borderRadius": 0, "fontSize": 16 }
          ],
          "connectors": [ { "id": 0, "from": 0, "to": 1 } ]
        }"##;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[1].kind(), NodeType::Decision);
        assert_eq!(doc.nodes[1].text, "Paid?");
        assert_eq!(doc.connectors[0].to, NodeId(1));
    }

    #[test]
    fn pretty_json_roundtrips() {
        let mut scene = crate::model::Scene::new();
        let a = scene.add_node(NodeType::Process, 100.0, 100.0).id;
        let b = scene.add_node(NodeType::Decision, 300.0, 100.0).id;
        scene.add_connector(a, b).unwrap();
        let doc = Document::new("flow", DateTime::<Utc>::default(), scene.snapshot());
        let back = Document::from_json(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn name_match_ignores_case() {
        let doc = Document::new("Order Pipeline", Utc::now(), SceneSnapshot::default());
        assert!(doc.name_matches("pipe"));
        assert!(doc.name_matches("ORDER"));
        assert!(doc.name_matches(""));
        assert!(!doc.name_matches("invoice"));
    }
}
