//! Selection state and selection operations.
//!
//! `SelectionSet` tracks which furniture items are selected. Selection is
//! stack-aware: selecting one stacked item selects the whole stack, unless
//! the multi-select modifier is held, in which case membership is toggled
//! per item.

use std::collections::HashSet;

use plankit_core::{Point, Project, Rect};
use uuid::Uuid;

/// Transient set of selected furniture ids.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<Uuid>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected ids in the project's insertion order.
    pub fn ordered_ids(&self, project: &Project) -> Vec<Uuid> {
        project
            .furniture
            .iter()
            .filter(|f| self.ids.contains(&f.id))
            .map(|f| f.id)
            .collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replaces the selection with the given ids.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.ids = ids.into_iter().collect();
    }

    /// Toggles a single id's membership.
    pub fn toggle(&mut self, id: Uuid) {
        if !self.ids.insert(id) {
            self.ids.remove(&id);
        }
    }

    /// Adds ids without clearing the existing selection.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.ids.extend(ids);
    }

    /// Drops ids that no longer exist in the project.
    pub fn retain_existing(&mut self, project: &Project) {
        let existing: HashSet<Uuid> = project.furniture.iter().map(|f| f.id).collect();
        self.ids.retain(|id| existing.contains(id));
    }
}

/// Expands an item id to its whole stack, or just itself when unstacked.
pub fn expand_stack(project: &Project, id: Uuid) -> Vec<Uuid> {
    match project.furniture_by_id(id).and_then(|f| f.stack_id) {
        Some(stack_id) => project.stack_members(stack_id),
        None => vec![id],
    }
}

/// Hit-tests placed items at a world point, topmost (last inserted) first.
///
/// Requires the project scale; without it no item has pixel bounds.
pub fn hit_test(project: &Project, world: Point) -> Option<Uuid> {
    let scale = project.scale?;
    project
        .furniture
        .iter()
        .rev()
        .filter(|f| f.is_placed())
        .find(|f| {
            plankit_core::RichFurniture::derive(f, scale)
                .bounds()
                .is_some_and(|b| b.contains_point(&world))
        })
        .map(|f| f.id)
}

/// Ids of all placed items whose AABB intersects the marquee rectangle.
pub fn marquee_hits(project: &Project, marquee: Rect) -> Vec<Uuid> {
    let Some(scale) = project.scale else {
        return Vec::new();
    };
    project
        .furniture
        .iter()
        .filter(|f| f.is_placed())
        .filter(|f| {
            plankit_core::RichFurniture::derive(f, scale)
                .bounds()
                .is_some_and(|b| b.intersects(&marquee))
        })
        .map(|f| f.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plankit_core::{Furniture, Unit};

    fn placed(name: &str, x: f64, y: f64) -> Furniture {
        let mut item = Furniture::new(name, 100.0, 50.0);
        item.x = Some(x);
        item.y = Some(y);
        item
    }

    fn scaled_project() -> Project {
        let mut project = Project::new("test");
        project.set_scale(100.0, 100.0, Unit::Centimeters); // 1 px/cm
        project
    }

    #[test]
    fn test_toggle_membership() {
        let mut selection = SelectionSet::new();
        let id = Uuid::new_v4();
        selection.toggle(id);
        assert!(selection.contains(id));
        selection.toggle(id);
        assert!(!selection.contains(id));
    }

    #[test]
    fn test_expand_stack_selects_all_members() {
        let mut project = scaled_project();
        let stack_id = Uuid::new_v4();
        let mut a = placed("Chair", 10.0, 10.0);
        let mut b = placed("Chair", 10.0, 10.0);
        a.stack_id = Some(stack_id);
        b.stack_id = Some(stack_id);
        let (a_id, b_id) = (a.id, b.id);
        let c = placed("Sofa", 500.0, 500.0);
        let c_id = c.id;
        project.furniture.extend([a, b, c]);

        let expanded = expand_stack(&project, a_id);
        assert_eq!(expanded.len(), 2);
        assert!(expanded.contains(&a_id) && expanded.contains(&b_id));

        assert_eq!(expand_stack(&project, c_id), vec![c_id]);
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut project = scaled_project();
        let bottom = placed("Rug", 0.0, 0.0);
        let top = placed("Table", 20.0, 10.0);
        let top_id = top.id;
        project.furniture.extend([bottom, top]);

        // Point inside both footprints; the later insertion wins.
        assert_eq!(hit_test(&project, Point::new(30.0, 20.0)), Some(top_id));
        assert_eq!(hit_test(&project, Point::new(1000.0, 1000.0)), None);
    }

    #[test]
    fn test_hit_test_requires_scale() {
        let mut project = Project::new("test");
        project.furniture.push(placed("Desk", 0.0, 0.0));
        assert_eq!(hit_test(&project, Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_marquee_intersection_rules() {
        let mut project = scaled_project();
        let inside = placed("A", 10.0, 10.0); // 100x50 at (10,10)
        let touching = placed("B", 200.0, 10.0);
        let outside = placed("C", 1000.0, 1000.0);
        let (inside_id, touching_id) = (inside.id, touching.id);
        project.furniture.extend([inside, touching, outside]);

        // Marquee overlaps A fully and clips B's left edge.
        let hits = marquee_hits(&project, Rect::new(0.0, 0.0, 210.0, 100.0));
        assert!(hits.contains(&inside_id));
        assert!(hits.contains(&touching_id));
        assert_eq!(hits.len(), 2);
    }
}
