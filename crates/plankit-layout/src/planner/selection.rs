//! Click and marquee selection commands.

use plankit_core::{Error, Point, Rect};
use uuid::Uuid;

use super::Planner;
use crate::selection::{expand_stack, hit_test, marquee_hits};

impl Planner {
    /// Handles a primary click at a screen position.
    ///
    /// While placement mode is armed the click places an instance and returns
    /// its id. Otherwise the click selects: a hit on a stacked item selects
    /// the whole stack, `multi` toggles membership per item instead of
    /// replacing, and a miss clears the selection (unless `multi` is held).
    pub fn click_at(&mut self, screen: Point, multi: bool) -> Result<Option<Uuid>, Error> {
        let world = self.view.screen_to_world(screen);
        if self.placement.is_armed() {
            return self.place_at(world).map(Some);
        }

        match hit_test(self.project(), world) {
            Some(id) => {
                if multi {
                    self.selection.toggle(id);
                } else {
                    let ids = expand_stack(self.project(), id);
                    self.selection.replace(ids);
                }
            }
            None => {
                if !multi {
                    self.selection.clear();
                }
            }
        }
        Ok(None)
    }

    /// Selects every placed item whose bounds intersect the marquee drawn
    /// between two screen corners. `additive` extends the current selection
    /// instead of replacing it.
    pub fn marquee_select(&mut self, corner_a: Point, corner_b: Point, additive: bool) {
        let a = self.view.screen_to_world(corner_a);
        let b = self.view.screen_to_world(corner_b);
        let marquee = Rect::from_corners(a, b);
        let hits = marquee_hits(self.project(), marquee);
        tracing::debug!(hits = hits.len(), "marquee selection");
        if additive {
            self.selection.extend(hits);
        } else {
            self.selection.replace(hits);
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selected ids in insertion order, with stacks fully expanded.
    pub(crate) fn expanded_selection(&self) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for id in self.selection.ordered_ids(self.project()) {
            for member in expand_stack(self.project(), id) {
                if !ids.contains(&member) {
                    ids.push(member);
                }
            }
        }
        ids
    }
}
