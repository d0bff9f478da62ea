//! Undo/Redo snapshot history.
//!
//! Every completed user action records a deep copy of the whole scene.
//! Undo and redo move a cursor through the list and hand back the
//! snapshot to restore; nothing is ever diffed or inverted.

use fc_core::model::SceneSnapshot;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded list of scene snapshots with a cursor.
///
/// `index` points at the snapshot matching the live scene. Committing
/// after an undo discards everything past the cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<SceneSnapshot>,
    /// Cursor; `None` before the first commit.
    index: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            index: None,
            capacity: capacity.max(1),
        }
    }

    /// Record a snapshot of the state *after* a mutation.
    pub fn commit(&mut self, snapshot: SceneSnapshot) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.index = Some(self.snapshots.len() - 1);
        log::debug!(
            "history commit: {} of {}",
            self.snapshots.len(),
            self.capacity
        );
    }

    /// Step back one snapshot. Returns the snapshot to restore, or `None`
    /// at the oldest entry.
    pub fn undo(&mut self) -> Option<&SceneSnapshot> {
        let i = self.index.filter(|i| *i > 0)? - 1;
        self.index = Some(i);
        self.snapshots.get(i)
    }

    /// Step forward one snapshot. Returns the snapshot to restore, or
    /// `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&SceneSnapshot> {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.snapshots.len() {
            return None;
        }
        self.index = Some(next);
        self.snapshots.get(next)
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |i| i + 1) < self.snapshots.len()
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&SceneSnapshot> {
        self.snapshots.get(self.index?)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::model::{NodeType, Scene};
    use pretty_assertions::assert_eq;

    fn snapshot_with(count: usize) -> SceneSnapshot {
        let mut scene = Scene::new();
        for i in 0..count {
            scene.add_node(NodeType::Process, i as f64 * 10.0, 0.0);
        }
        scene.snapshot()
    }

    #[test]
    fn undo_at_oldest_is_noop() {
        let mut history = History::default();
        assert!(history.undo().is_none());
        history.commit(snapshot_with(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.index(), Some(0));
    }

    #[test]
    fn undo_then_redo_walks_the_cursor() {
        let mut history = History::default();
        for n in 0..3 {
            history.commit(snapshot_with(n));
        }
        assert_eq!(history.undo().map(|s| s.nodes.len()), Some(1));
        assert_eq!(history.undo().map(|s| s.nodes.len()), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().map(|s| s.nodes.len()), Some(1));
        assert_eq!(history.redo().map(|s| s.nodes.len()), Some(2));
        assert!(history.redo().is_none());
    }

    #[test]
    fn commit_after_undo_discards_redo_tail() {
        let mut history = History::default();
        for n in 0..4 {
            history.commit(snapshot_with(n));
        }
        history.undo();
        history.undo();
        assert!(history.can_redo());
        history.commit(snapshot_with(7));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().map(|s| s.nodes.len()), Some(7));
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut history = History::new(50);
        for n in 0..51 {
            history.commit(snapshot_with(n % 3));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.index(), Some(49));
        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 49);
        // The first commit (0 nodes, n = 0) is gone; the oldest left is n = 1.
        assert_eq!(history.current().map(|s| s.nodes.len()), Some(1));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut history = History::default();
        history.commit(snapshot_with(1));
        history.clear();
        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(!history.can_redo());
    }
}
