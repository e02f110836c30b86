//! Manipulation commands: drag, rotate, stack/unstack, tidy, arrange,
//! delete and palette drops.

use std::f64::consts::TAU;

use plankit_core::{Error, PlacementError, Point};
use uuid::Uuid;

use super::{DragGesture, Planner};

/// Alignment axis for the tidy command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TidyAxis {
    /// Align vertical centers, preserving horizontal positions.
    VerticalCenter,
    /// Align horizontal centers, preserving vertical positions.
    HorizontalCenter,
}

impl Planner {
    /// Starts a drag gesture on the current selection. Stacked items drag
    /// their whole stack. No-op when nothing is selected.
    pub fn begin_drag(&mut self) {
        let item_ids = self.expanded_selection();
        if item_ids.is_empty() {
            return;
        }
        self.drag = Some(DragGesture {
            item_ids,
            origin: self.project().clone(),
            moved: false,
        });
    }

    /// Applies a screen-space drag delta as a live (non-committing) update.
    ///
    /// The delta is scaled by the inverse of the current zoom so the items
    /// track the pointer. All members of a dragged stack receive the same
    /// delta, keeping the shared-position invariant.
    pub fn drag_by(&mut self, screen_dx: f64, screen_dy: f64) {
        let Some(drag) = &mut self.drag else { return };
        let zoom = self.view.scale();
        let (dx, dy) = (screen_dx / zoom, screen_dy / zoom);

        let ids = drag.item_ids.clone();
        drag.moved = true;
        let mut project = self.history.current().clone();
        for id in &ids {
            if let Some(item) = project.furniture_by_id_mut(*id) {
                if let (Some(x), Some(y)) = (item.x, item.y) {
                    item.x = Some(x + dx);
                    item.y = Some(y + dy);
                }
            }
        }
        self.live(project);
    }

    /// Ends the drag gesture, creating exactly one history entry for the
    /// whole movement. A drag with no movement leaves history untouched.
    pub fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else { return };
        if !drag.moved {
            return;
        }
        // The live updates overwrote the current snapshot; restore the
        // pre-drag state there so undo lands before the gesture, then commit
        // the final positions as the single entry.
        let dragged = self.project().clone();
        self.live(drag.origin);
        self.commit(dragged);
    }

    /// Rotates every selected item by +45 degrees (mod 360).
    pub fn rotate_selected(&mut self) -> Result<(), Error> {
        let ids = self.require_selected("Rotate", 1)?;
        let mut project = self.project().clone();
        for id in &ids {
            if let Some(item) = project.furniture_by_id_mut(*id) {
                item.set_rotation(item.rotation + 45.0);
            }
        }
        self.commit(project);
        Ok(())
    }

    /// Stacks the selected items: assigns a fresh shared stack id and snaps
    /// every member to the position of the largest-area item (ties break to
    /// the first encountered).
    pub fn stack_selected(&mut self) -> Result<Uuid, Error> {
        let ids = self.require_selected("Stack", 2)?;
        let project = self.project();
        let anchor = ids
            .iter()
            .filter_map(|id| project.furniture_by_id(*id))
            .filter(|f| f.is_placed())
            .fold(None::<&plankit_core::Furniture>, |best, item| match best {
                Some(b) if item.width_cm * item.depth_cm > b.width_cm * b.depth_cm => Some(item),
                Some(b) => Some(b),
                None => Some(item),
            });
        let Some(anchor) = anchor else {
            let err = Error::from(PlacementError::NotEnoughSelected {
                operation: "Stack".to_string(),
                required: 2,
                actual: 0,
            });
            self.notify_error(&err);
            return Err(err);
        };
        let (anchor_x, anchor_y) = (anchor.x, anchor.y);

        let stack_id = Uuid::new_v4();
        let mut project = self.project().clone();
        for id in &ids {
            if let Some(item) = project.furniture_by_id_mut(*id) {
                item.x = anchor_x;
                item.y = anchor_y;
                item.stack_id = Some(stack_id);
            }
        }
        tracing::debug!(%stack_id, members = ids.len(), "stacked selection");
        self.commit(project);
        Ok(stack_id)
    }

    /// Unstacks a stack: members are redistributed evenly on a circle around
    /// the shared anchor point and become the new selection.
    ///
    /// The circle radius is 0.75 times the larger pixel dimension of the
    /// first member; angle assignment follows member insertion order.
    pub fn unstack(&mut self, stack_id: Uuid) -> Result<(), Error> {
        let members = self.project().stack_members(stack_id);
        if members.is_empty() {
            let err = Error::from(PlacementError::UnknownStack { id: stack_id });
            self.notify_error(&err);
            return Err(err);
        }
        let Some(first) = self.project().rich(members[0]) else {
            let err = Error::from(PlacementError::NoScale);
            self.notify_error(&err);
            return Err(err);
        };
        let radius = 0.75 * first.px_width.max(first.px_height);
        let anchor = Point::new(
            first.furniture.x.unwrap_or(0.0),
            first.furniture.y.unwrap_or(0.0),
        );

        let step = TAU / members.len() as f64;
        let mut project = self.project().clone();
        for (i, id) in members.iter().enumerate() {
            if let Some(item) = project.furniture_by_id_mut(*id) {
                let angle = step * i as f64;
                item.x = Some(anchor.x + radius * angle.cos());
                item.y = Some(anchor.y + radius * angle.sin());
                item.stack_id = None;
            }
        }
        tracing::debug!(%stack_id, members = members.len(), "unstacked");
        self.commit(project);
        self.selection.replace(members);
        Ok(())
    }

    /// Aligns the selected items' centers on one axis to the selection's
    /// average center, preserving positions on the other axis.
    pub fn tidy(&mut self, axis: TidyAxis) -> Result<(), Error> {
        let ids = self.require_selected("Tidy", 2)?;
        let rich: Vec<_> = ids
            .iter()
            .filter_map(|id| self.project().rich(*id))
            .filter(|r| r.furniture.is_placed())
            .collect();
        if rich.len() < 2 {
            let err = Error::from(PlacementError::NotEnoughSelected {
                operation: "Tidy".to_string(),
                required: 2,
                actual: rich.len(),
            });
            self.notify_error(&err);
            return Err(err);
        }

        let centers: Vec<(Uuid, Point, f64, f64)> = rich
            .iter()
            .filter_map(|r| {
                let b = r.bounds()?;
                Some((r.furniture.id, b.center(), b.w, b.h))
            })
            .collect();

        let mut project = self.project().clone();
        match axis {
            TidyAxis::VerticalCenter => {
                let avg = centers.iter().map(|(_, c, _, _)| c.y).sum::<f64>()
                    / centers.len() as f64;
                for (id, _, _, h) in &centers {
                    if let Some(item) = project.furniture_by_id_mut(*id) {
                        item.y = Some(avg - h / 2.0);
                    }
                }
            }
            TidyAxis::HorizontalCenter => {
                let avg = centers.iter().map(|(_, c, _, _)| c.x).sum::<f64>()
                    / centers.len() as f64;
                for (id, _, w, _) in &centers {
                    if let Some(item) = project.furniture_by_id_mut(*id) {
                        item.x = Some(avg - w / 2.0);
                    }
                }
            }
        }
        self.commit(project);
        Ok(())
    }

    /// Lays out the selection along the largest-area item's longer axis,
    /// evenly spaced and centered on the anchor's shorter-axis midpoint.
    ///
    /// Spacing may be negative when the other items' combined span exceeds
    /// the anchor's; this is cosmetic arrangement, not packing.
    pub fn arrange_on_largest(&mut self) -> Result<(), Error> {
        let ids = self.require_selected("Arrange", 2)?;
        let rich: Vec<_> = ids
            .iter()
            .filter_map(|id| self.project().rich(*id))
            .filter(|r| r.furniture.is_placed())
            .collect();
        if rich.len() < 2 {
            let err = Error::from(PlacementError::NotEnoughSelected {
                operation: "Arrange".to_string(),
                required: 2,
                actual: rich.len(),
            });
            self.notify_error(&err);
            return Err(err);
        }

        let anchor_idx = rich
            .iter()
            .enumerate()
            .fold(0, |best, (i, r)| {
                let area = |r: &plankit_core::RichFurniture| r.px_width * r.px_height;
                if area(r) > area(&rich[best]) {
                    i
                } else {
                    best
                }
            });
        let Some(anchor_bounds) = rich[anchor_idx].bounds() else {
            let err = Error::from(PlacementError::NoScale);
            self.notify_error(&err);
            return Err(err);
        };
        let horizontal = anchor_bounds.w >= anchor_bounds.h;

        let others: Vec<_> = rich
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != anchor_idx)
            .filter_map(|(_, r)| r.bounds().map(|b| (r.furniture.id, b)))
            .collect();

        let anchor_span = if horizontal { anchor_bounds.w } else { anchor_bounds.h };
        let occupied: f64 = others
            .iter()
            .map(|(_, b)| if horizontal { b.w } else { b.h })
            .sum();
        let spacing = (anchor_span - occupied) / (others.len() + 1) as f64;
        let anchor_center = anchor_bounds.center();

        let mut project = self.project().clone();
        let mut cursor = if horizontal {
            anchor_bounds.x + spacing
        } else {
            anchor_bounds.y + spacing
        };
        for (id, b) in &others {
            if let Some(item) = project.furniture_by_id_mut(*id) {
                if horizontal {
                    item.x = Some(cursor);
                    item.y = Some(anchor_center.y - b.h / 2.0);
                    cursor += b.w + spacing;
                } else {
                    item.y = Some(cursor);
                    item.x = Some(anchor_center.x - b.w / 2.0);
                    cursor += b.h + spacing;
                }
            }
        }
        self.commit(project);
        Ok(())
    }

    /// Deletes every selected item from the project and clears the
    /// selection.
    pub fn delete_selected(&mut self) -> Result<(), Error> {
        let ids = self.require_selected("Delete", 1)?;
        let mut project = self.project().clone();
        project.furniture.retain(|f| !ids.contains(&f.id));
        tracing::debug!(removed = ids.len(), "deleted selection");
        self.commit(project);
        self.selection.clear();
        self.error_ids.retain(|id| !ids.contains(id));
        Ok(())
    }

    /// Places an unplaced item dropped from the external palette, centered
    /// on the drop point.
    pub fn drop_from_palette(&mut self, name: &str, screen: Point) -> Result<Uuid, Error> {
        let Some(scale) = self.project().scale else {
            let err = Error::from(PlacementError::NoScale);
            self.notify_error(&err);
            return Err(err);
        };
        let world = self.view.screen_to_world(screen);

        let mut project = self.project().clone();
        let Some(item) = project
            .furniture
            .iter_mut()
            .find(|f| !f.is_placed() && f.name == name)
        else {
            let err = Error::from(PlacementError::NothingToPlace {
                name: name.to_string(),
            });
            self.notify_error(&err);
            return Err(err);
        };
        item.x = Some(world.x - item.width_cm * scale / 2.0);
        item.y = Some(world.y - item.depth_cm * scale / 2.0);
        item.rotation = 0.0;
        let id = item.id;
        self.commit(project);
        Ok(id)
    }

    /// Expands the selection and enforces a minimum count, surfacing a
    /// notification on failure.
    fn require_selected(&mut self, operation: &str, required: usize) -> Result<Vec<Uuid>, Error> {
        let ids = self.expanded_selection();
        if ids.len() < required {
            let err = Error::from(PlacementError::NotEnoughSelected {
                operation: operation.to_string(),
                required,
                actual: ids.len(),
            });
            self.notify_error(&err);
            return Err(err);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use plankit_core::{Furniture, Project, Unit};

    use crate::advisory::CollisionOnlyAdvisor;
    use crate::planner::Planner;

    use super::*;

    fn placed(name: &str, w_cm: f64, d_cm: f64, x: f64, y: f64) -> Furniture {
        let mut item = Furniture::new(name, w_cm, d_cm);
        item.x = Some(x);
        item.y = Some(y);
        item
    }

    fn planner_with(items: Vec<Furniture>) -> Planner {
        let mut project = Project::new("test");
        project.set_scale(100.0, 100.0, Unit::Centimeters); // 1 px/cm
        project.furniture.extend(items);
        Planner::new(project, Arc::new(CollisionOnlyAdvisor))
    }

    #[test]
    fn test_drag_is_one_history_entry() {
        let item = placed("Desk", 120.0, 60.0, 10.0, 10.0);
        let id = item.id;
        let mut planner = planner_with(vec![item]);
        planner.selection.replace([id]);

        planner.begin_drag();
        planner.drag_by(5.0, 5.0);
        planner.drag_by(5.0, 5.0);
        planner.drag_by(10.0, 0.0);
        planner.end_drag();

        let moved = planner.project().furniture_by_id(id).unwrap();
        assert_eq!(moved.x, Some(30.0));
        assert_eq!(moved.y, Some(20.0));

        // The whole gesture undoes in one step.
        assert!(planner.undo());
        let back = planner.project().furniture_by_id(id).unwrap();
        assert_eq!(back.x, Some(10.0));
        assert_eq!(back.y, Some(10.0));
        assert!(!planner.undo());
    }

    #[test]
    fn test_drag_delta_scales_with_inverse_zoom() {
        let item = placed("Desk", 120.0, 60.0, 0.0, 0.0);
        let id = item.id;
        let mut planner = planner_with(vec![item]);
        planner.wheel_zoom(plankit_core::Point::new(0.0, 0.0), 2.0);
        planner.selection.replace([id]);

        planner.begin_drag();
        planner.drag_by(100.0, 50.0);
        planner.end_drag();

        let moved = planner.project().furniture_by_id(id).unwrap();
        assert_eq!(moved.x, Some(50.0));
        assert_eq!(moved.y, Some(25.0));
    }

    #[test]
    fn test_drag_moves_whole_stack() {
        let stack_id = Uuid::new_v4();
        let mut a = placed("Chair", 40.0, 40.0, 10.0, 10.0);
        let mut b = placed("Chair", 40.0, 40.0, 10.0, 10.0);
        a.stack_id = Some(stack_id);
        b.stack_id = Some(stack_id);
        let (a_id, b_id) = (a.id, b.id);
        let mut planner = planner_with(vec![a, b]);
        planner.selection.replace([a_id]);

        planner.begin_drag();
        planner.drag_by(20.0, 30.0);
        planner.end_drag();

        let a = planner.project().furniture_by_id(a_id).unwrap();
        let b = planner.project().furniture_by_id(b_id).unwrap();
        assert_eq!((a.x, a.y), (b.x, b.y));
        assert_eq!(a.x, Some(30.0));
    }

    #[test]
    fn test_motionless_drag_leaves_history_untouched() {
        let item = placed("Desk", 120.0, 60.0, 10.0, 10.0);
        let id = item.id;
        let mut planner = planner_with(vec![item]);
        planner.selection.replace([id]);

        planner.begin_drag();
        planner.end_drag();
        assert!(!planner.can_undo());
    }

    #[test]
    fn test_rotate_wraps_modulo_360() {
        let item = placed("Desk", 120.0, 60.0, 0.0, 0.0);
        let id = item.id;
        let mut planner = planner_with(vec![item]);
        planner.selection.replace([id]);

        for _ in 0..8 {
            planner.rotate_selected().unwrap();
        }
        assert_eq!(planner.project().furniture_by_id(id).unwrap().rotation, 0.0);
        assert_eq!(planner.history.len(), 9);
    }

    #[test]
    fn test_stack_snaps_to_largest_member() {
        let small = placed("Stool", 40.0, 40.0, 10.0, 10.0);
        let large = placed("Table", 200.0, 100.0, 300.0, 300.0);
        let (small_id, large_id) = (small.id, large.id);
        let mut planner = planner_with(vec![small, large]);
        planner.selection.replace([small_id, large_id]);

        let stack_id = planner.stack_selected().unwrap();
        let small = planner.project().furniture_by_id(small_id).unwrap();
        let large = planner.project().furniture_by_id(large_id).unwrap();
        assert_eq!((small.x, small.y), (Some(300.0), Some(300.0)));
        assert_eq!(small.stack_id, Some(stack_id));
        assert_eq!(large.stack_id, Some(stack_id));
    }

    #[test]
    fn test_stack_requires_two_items() {
        let item = placed("Desk", 120.0, 60.0, 0.0, 0.0);
        let id = item.id;
        let mut planner = planner_with(vec![item]);
        planner.selection.replace([id]);

        assert!(planner.stack_selected().is_err());
        assert!(!planner.notifications().is_empty());
        assert!(!planner.can_undo());
    }

    #[test]
    fn test_unstack_distributes_on_circle() {
        let small = placed("Stool", 40.0, 40.0, 100.0, 100.0);
        let large = placed("Table", 200.0, 100.0, 100.0, 100.0);
        let ids = [small.id, large.id];
        let mut planner = planner_with(vec![small, large]);
        planner.selection.replace(ids);
        let stack_id = planner.stack_selected().unwrap();

        planner.unstack(stack_id).unwrap();
        let a = planner.project().furniture_by_id(ids[0]).unwrap().clone();
        let b = planner.project().furniture_by_id(ids[1]).unwrap().clone();

        assert_eq!(a.stack_id, None);
        assert_eq!(b.stack_id, None);
        // Members no longer share a position.
        assert_ne!((a.x, a.y), (b.x, b.y));
        // Radius comes from the first member (40x40 cm at 1 px/cm): 30 px.
        // The anchor is the shared position after stacking (the table's).
        assert_eq!(a.x, Some(100.0 + 30.0));
        assert_eq!(a.y, Some(100.0));

        // Unstacked members become the new selection.
        assert!(planner.selection().contains(ids[0]));
        assert!(planner.selection().contains(ids[1]));
    }

    #[test]
    fn test_unstack_unknown_stack_is_rejected() {
        let mut planner = planner_with(vec![]);
        assert!(planner.unstack(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_unstack_without_scale_surfaces_notification() {
        let stack_id = Uuid::new_v4();
        let mut a = placed("Chair", 40.0, 40.0, 10.0, 10.0);
        let mut b = placed("Chair", 40.0, 40.0, 10.0, 10.0);
        a.stack_id = Some(stack_id);
        b.stack_id = Some(stack_id);
        let mut project = Project::new("test");
        project.furniture.extend([a, b]);
        let mut planner = Planner::new(project, Arc::new(CollisionOnlyAdvisor));

        let err = planner.unstack(stack_id).unwrap_err();
        assert!(err.is_precondition());
        assert!(!planner.notifications().is_empty());
    }

    #[test]
    fn test_tidy_vertical_center_alignment() {
        // Heights 60 and 100 px, centers at y=40 and y=250.
        let a = placed("A", 100.0, 60.0, 10.0, 10.0);
        let b = placed("B", 100.0, 100.0, 500.0, 200.0);
        let ids = [a.id, b.id];
        let mut planner = planner_with(vec![a, b]);
        planner.selection.replace(ids);

        planner.tidy(TidyAxis::VerticalCenter).unwrap();
        let a = planner.project().furniture_by_id(ids[0]).unwrap();
        let b = planner.project().furniture_by_id(ids[1]).unwrap();

        // Average center y = (40 + 250) / 2 = 145.
        assert_eq!(a.y, Some(145.0 - 30.0));
        assert_eq!(b.y, Some(145.0 - 50.0));
        // Horizontal positions untouched.
        assert_eq!(a.x, Some(10.0));
        assert_eq!(b.x, Some(500.0));
    }

    #[test]
    fn test_tidy_requires_two_items() {
        let item = placed("Desk", 120.0, 60.0, 0.0, 0.0);
        let id = item.id;
        let mut planner = planner_with(vec![item]);
        planner.selection.replace([id]);
        assert!(planner.tidy(TidyAxis::HorizontalCenter).is_err());
    }

    #[test]
    fn test_arrange_on_largest_spaces_along_longer_axis() {
        // Anchor 400x100 px, two 50x50 px items.
        let anchor = placed("Sofa", 400.0, 100.0, 0.0, 0.0);
        let a = placed("Stool", 50.0, 50.0, 900.0, 900.0);
        let b = placed("Stool", 50.0, 50.0, 950.0, 950.0);
        let ids = [anchor.id, a.id, b.id];
        let mut planner = planner_with(vec![anchor, a, b]);
        planner.selection.replace(ids);

        planner.arrange_on_largest().unwrap();
        let a = planner.project().furniture_by_id(ids[1]).unwrap();
        let b = planner.project().furniture_by_id(ids[2]).unwrap();

        // Spacing = (400 - 100) / 3 = 100.
        assert_eq!(a.x, Some(100.0));
        assert_eq!(b.x, Some(250.0));
        // Centered on the anchor's vertical midpoint (y = 50).
        assert_eq!(a.y, Some(25.0));
        assert_eq!(b.y, Some(25.0));
    }

    #[test]
    fn test_arrange_permits_negative_spacing() {
        let anchor = placed("Desk", 100.0, 50.0, 0.0, 0.0);
        let a = placed("Sofa", 90.0, 40.0, 500.0, 500.0);
        let b = placed("Sofa", 90.0, 40.0, 600.0, 600.0);
        let ids = [anchor.id, a.id, b.id];
        let mut planner = planner_with(vec![anchor, a, b]);
        planner.selection.replace(ids);

        // Combined span 180 exceeds the anchor's 100: spacing is negative
        // and the arrangement still completes.
        planner.arrange_on_largest().unwrap();
        let a = planner.project().furniture_by_id(ids[1]).unwrap();
        let spacing = (100.0 - 180.0) / 3.0;
        assert!((a.x.unwrap() - spacing).abs() < 1e-9);
    }

    #[test]
    fn test_arrange_without_scale_surfaces_notification() {
        let a = placed("Desk", 100.0, 50.0, 0.0, 0.0);
        let b = placed("Sofa", 90.0, 40.0, 500.0, 500.0);
        let ids = [a.id, b.id];
        let mut project = Project::new("test");
        project.furniture.extend([a, b]);
        let mut planner = Planner::new(project, Arc::new(CollisionOnlyAdvisor));
        planner.selection.replace(ids);

        let err = planner.arrange_on_largest().unwrap_err();
        assert!(err.is_precondition());
        assert!(!planner.notifications().is_empty());
    }

    #[test]
    fn test_delete_clears_selection() {
        let a = placed("A", 100.0, 50.0, 0.0, 0.0);
        let b = placed("B", 100.0, 50.0, 200.0, 200.0);
        let (a_id, b_id) = (a.id, b.id);
        let mut planner = planner_with(vec![a, b]);
        planner.selection.replace([a_id]);

        planner.delete_selected().unwrap();
        assert!(planner.project().furniture_by_id(a_id).is_none());
        assert!(planner.project().furniture_by_id(b_id).is_some());
        assert!(planner.selection().is_empty());

        assert!(planner.undo());
        assert!(planner.project().furniture_by_id(a_id).is_some());
    }

    #[test]
    fn test_palette_drop_centers_on_drop_point() {
        let mut planner = planner_with(vec![]);
        planner.import_furniture(vec![Furniture::new("Desk", 120.0, 60.0)]);

        let id = planner
            .drop_from_palette("Desk", plankit_core::Point::new(200.0, 200.0))
            .unwrap();
        let item = planner.project().furniture_by_id(id).unwrap();
        assert_eq!(item.x, Some(200.0 - 60.0));
        assert_eq!(item.y, Some(200.0 - 30.0));
    }
}
