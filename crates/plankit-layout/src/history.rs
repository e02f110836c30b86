//! Snapshot history for undo/redo.
//!
//! A linear stack of full `Project` snapshots plus a current index. Two
//! mutation entry points exist:
//!
//! - `commit` creates an undoable history entry (truncating any redo branch)
//! - `live` replaces the current snapshot in place, used for continuous drag
//!   feedback that would otherwise flood history with per-pixel entries
//!
//! Invariant: `0 <= index < snapshots.len()` at all times.

use plankit_core::Project;

/// Linear snapshot stack with standard undo-branch-truncation semantics.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Project>,
    index: usize,
}

impl History {
    /// Creates a history seeded with the initial project state.
    pub fn new(initial: Project) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// The snapshot at the current index.
    pub fn current(&self) -> &Project {
        &self.snapshots[self.index]
    }

    /// Commits a new snapshot: discards any entries after the current index,
    /// appends, and advances. This is the only path that can lose redo
    /// entries.
    pub fn commit(&mut self, project: Project) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(project);
        self.index += 1;
        tracing::debug!(index = self.index, len = self.snapshots.len(), "commit");
    }

    /// Replaces the snapshot at the current index in place. Does not move the
    /// index and does not truncate redo entries.
    pub fn live(&mut self, project: Project) {
        self.snapshots[self.index] = project;
    }

    /// Steps back one snapshot. Returns false (no-op) at the first entry.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        tracing::debug!(index = self.index, "undo");
        true
    }

    /// Steps forward one snapshot. Returns false (no-op) at the tail.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        tracing::debug!(index = self.index, "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false // always seeded with at least one snapshot
    }

    /// The current index into the snapshot stack.
    pub fn index(&self) -> usize {
        self.index
    }
}
