use crate::id::NodeId;
use thiserror::Error;

/// Errors surfaced by the scene model and the document layer.
///
/// Resize below the minimum node size is not an error: it is clamped
/// while the gesture runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("cannot connect node {from} to itself")]
    SelfConnection { from: NodeId },

    #[error("connector endpoint {0} does not resolve to a node in the scene")]
    UnknownNode(NodeId),

    #[error("failed to load document: {0}")]
    MalformedDocument(String),

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("no saved document at index {index} (history holds {len})")]
    UnknownSavedDocument { index: usize, len: usize },
}

impl EditorError {
    /// True for the connector-endpoint class of errors, which gestures
    /// swallow instead of reporting.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::SelfConnection { .. } | Self::UnknownNode(_))
    }
}
