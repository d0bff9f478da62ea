use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within a scene. Serialized as a bare integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Identifier of a connector within a scene. Serialized as a bare integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub u64);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Debug for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Monotonic id source for nodes and connectors.
///
/// Lives beside the scene but outside of history snapshots, so undoing
/// a creation never hands the retired id out again. Only a document load
/// rewinds it, to `max(existing) + 1`; restoring a checkpoint moves it
/// forward past whatever the checkpoint holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next_node: u64,
    next_connector: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            next_node: 0,
            next_connector: 0,
        }
    }

    pub fn next_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    pub fn next_connector(&mut self) -> ConnectorId {
        let id = ConnectorId(self.next_connector);
        self.next_connector += 1;
        id
    }

    /// The id the next `next_node()` call will hand out.
    pub fn peek_node(&self) -> NodeId {
        NodeId(self.next_node)
    }

    pub fn peek_connector(&self) -> ConnectorId {
        ConnectorId(self.next_connector)
    }

    /// Reset both counters after restoring persisted data.
    ///
    /// Each counter becomes `max(existing, 0) + 1`, so an empty document
    /// starts at 1 and nothing restored can collide with a future id.
    pub fn reset_after_load(
        &mut self,
        nodes: impl IntoIterator<Item = NodeId>,
        connectors: impl IntoIterator<Item = ConnectorId>,
    ) {
        let max_node = nodes.into_iter().map(|id| id.0).max().unwrap_or(0);
        let max_connector = connectors.into_iter().map(|id| id.0).max().unwrap_or(0);
        self.next_node = max_node + 1;
        self.next_connector = max_connector + 1;
    }

    /// Advance both counters past the given ids. Never moves backwards.
    pub fn ensure_past(
        &mut self,
        nodes: impl IntoIterator<Item = NodeId>,
        connectors: impl IntoIterator<Item = ConnectorId>,
    ) {
        if let Some(max) = nodes.into_iter().map(|id| id.0).max() {
            self.next_node = self.next_node.max(max + 1);
        }
        if let Some(max) = connectors.into_iter().map(|id| id.0).max() {
            self.next_connector = self.next_connector.max(max + 1);
        }
    }
}
