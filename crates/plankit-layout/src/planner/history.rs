//! Undo/redo entry points on the planner.

use plankit_core::Project;

use super::Planner;

impl Planner {
    /// Commits a mutated project as a new undoable history entry.
    pub(crate) fn commit(&mut self, project: Project) {
        self.history.commit(project);
    }

    /// Replaces the current snapshot in place, without creating an entry.
    /// Used for continuous drag feedback.
    pub(crate) fn live(&mut self, project: Project) {
        self.history.live(project);
    }

    /// Steps the project back one snapshot. Returns false at the first entry.
    ///
    /// The selection is pruned to ids that still exist in the restored
    /// snapshot; placement mode and viewport state are untouched.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.after_history_jump();
        true
    }

    /// Steps the project forward one snapshot. Returns false at the tail.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.after_history_jump();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn after_history_jump(&mut self) {
        self.drag = None;
        let project = self.history.current().clone();
        self.selection.retain_existing(&project);
        self.error_ids.retain(|id| project.furniture_by_id(*id).is_some());
    }
}
