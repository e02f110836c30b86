//! Integration tests for the layout engine driven through the planner
//! facade, covering the end-to-end placement, manipulation and history
//! behavior a host UI relies on.

use std::sync::Arc;

use proptest::prelude::*;

use plankit_core::{Furniture, Point, Project, Rect, Unit};
use plankit_layout::{CollisionOnlyAdvisor, History, Planner, TidyAxis};

fn project_with_desks(n: usize) -> Project {
    let mut project = Project::new("Office");
    // 200 px for 100 cm: scale = 2 px/cm.
    project.set_scale(200.0, 100.0, Unit::Centimeters);
    for _ in 0..n {
        project.furniture.push(Furniture::new("Desk", 120.0, 60.0));
    }
    project
}

fn planner_with_desks(n: usize) -> Planner {
    Planner::new(project_with_desks(n), Arc::new(CollisionOnlyAdvisor))
}

#[test]
fn test_bulk_desk_placement_scenario() {
    let mut planner = planner_with_desks(3);

    planner.start_placement("Desk", 3).unwrap();
    for x in [100.0, 300.0, 500.0] {
        planner.place_at(Point::new(x, 100.0)).unwrap();
    }

    assert!(!planner.placement().is_armed());
    assert_eq!(planner.placement().remaining(), 0);

    // 120x60 cm at 2 px/cm is 240x120 px, centered on each click point.
    let placed: Vec<_> = planner.project().placed().collect();
    assert_eq!(placed.len(), 3);
    for (item, expected_x) in placed.iter().zip([-20.0, 180.0, 380.0]) {
        assert_eq!(item.x, Some(expected_x));
        assert_eq!(item.y, Some(40.0));
        let rich = planner.project().rich(item.id).unwrap();
        assert_eq!(rich.px_width, 240.0);
        assert_eq!(rich.px_height, 120.0);
    }
}

#[test]
fn test_over_requested_quantity_is_clamped() {
    let mut planner = planner_with_desks(2);
    planner.start_placement("Desk", 10).unwrap();
    assert_eq!(planner.placement().remaining(), 2);

    planner.place_at(Point::new(100.0, 100.0)).unwrap();
    planner.place_at(Point::new(600.0, 100.0)).unwrap();
    assert!(!planner.placement().is_armed());
    assert!(planner.place_at(Point::new(900.0, 100.0)).is_err());
}

#[test]
fn test_full_session_unwinds_to_initial_project() {
    let mut planner = planner_with_desks(2);
    let initial = planner.project().clone();

    planner.start_placement("Desk", 2).unwrap();
    planner.place_at(Point::new(100.0, 100.0)).unwrap();
    planner.place_at(Point::new(600.0, 100.0)).unwrap();
    planner.marquee_select(Point::new(-300.0, -100.0), Point::new(800.0, 300.0), false);
    planner.rotate_selected().unwrap();
    planner.stack_selected().unwrap();
    planner.delete_selected().unwrap();

    let mut undos = 0;
    while planner.undo() {
        undos += 1;
    }
    assert_eq!(undos, 5);
    assert_eq!(planner.project(), &initial);
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut planner = planner_with_desks(2);
    planner.start_placement("Desk", 2).unwrap();
    planner.place_at(Point::new(100.0, 100.0)).unwrap();
    planner.place_at(Point::new(600.0, 100.0)).unwrap();

    planner.undo();
    assert!(planner.can_redo());

    // A fresh committing mutation truncates the redo branch for good.
    planner.start_placement("Desk", 1).unwrap();
    planner.place_at(Point::new(900.0, 100.0)).unwrap();
    assert!(!planner.can_redo());
}

#[test]
fn test_stack_then_unstack_invariants() {
    let mut planner = planner_with_desks(0);
    let mut items = Vec::new();
    for i in 0..4 {
        let mut item = Furniture::new("Chair", 45.0, 45.0);
        item.x = Some(100.0 * i as f64);
        item.y = Some(50.0);
        items.push(item);
    }
    let ids: Vec<_> = items.iter().map(|f| f.id).collect();
    planner.import_furniture(items);
    planner.marquee_select(Point::new(-10.0, -10.0), Point::new(2000.0, 2000.0), false);

    let stack_id = planner.stack_selected().unwrap();

    // All members share one position and the new stack id.
    let positions: Vec<_> = ids
        .iter()
        .map(|id| {
            let f = planner.project().furniture_by_id(*id).unwrap();
            assert_eq!(f.stack_id, Some(stack_id));
            (f.x, f.y)
        })
        .collect();
    assert!(positions.iter().all(|p| *p == positions[0]));

    planner.unstack(stack_id).unwrap();

    // No member keeps the stack id and no two share a position.
    let mut seen = Vec::new();
    for id in &ids {
        let f = planner.project().furniture_by_id(*id).unwrap();
        assert_eq!(f.stack_id, None);
        let pos = (f.x, f.y);
        assert!(!seen.contains(&pos));
        seen.push(pos);
    }
    assert_eq!(planner.selection().len(), 4);
}

#[test]
fn test_marquee_selects_iff_bounds_overlap() {
    let mut planner = planner_with_desks(0);
    // 50x50 cm at 2 px/cm is 100x100 px.
    let mut inside = Furniture::new("A", 50.0, 50.0);
    inside.x = Some(50.0);
    inside.y = Some(50.0);
    let mut clipped = Furniture::new("B", 50.0, 50.0);
    clipped.x = Some(250.0);
    clipped.y = Some(50.0);
    let mut outside = Furniture::new("C", 50.0, 50.0);
    outside.x = Some(900.0);
    outside.y = Some(900.0);
    let (a, b, c) = (inside.id, clipped.id, outside.id);
    planner.import_furniture(vec![inside, clipped, outside]);

    planner.marquee_select(Point::new(0.0, 0.0), Point::new(300.0, 200.0), false);
    assert!(planner.selection().contains(a));
    assert!(planner.selection().contains(b));
    assert!(!planner.selection().contains(c));
}

#[test]
fn test_tidy_preserves_cross_axis_positions() {
    let mut planner = planner_with_desks(0);
    let mut a = Furniture::new("A", 50.0, 50.0);
    a.x = Some(0.0);
    a.y = Some(0.0);
    let mut b = Furniture::new("B", 50.0, 50.0);
    b.x = Some(400.0);
    b.y = Some(200.0);
    let ids = [a.id, b.id];
    planner.import_furniture(vec![a, b]);
    planner.marquee_select(Point::new(-10.0, -10.0), Point::new(600.0, 400.0), false);

    planner.tidy(TidyAxis::HorizontalCenter).unwrap();
    let a = planner.project().furniture_by_id(ids[0]).unwrap();
    let b = planner.project().furniture_by_id(ids[1]).unwrap();
    assert_eq!(a.x, b.x);
    assert_eq!(a.y, Some(0.0));
    assert_eq!(b.y, Some(200.0));
}

#[test]
fn test_escape_cancels_everything_at_once() {
    let mut planner = planner_with_desks(2);
    planner.start_placement("Desk", 2).unwrap();
    planner.place_at(Point::new(100.0, 100.0)).unwrap();
    planner.marquee_select(Point::new(-300.0, -100.0), Point::new(800.0, 300.0), false);

    planner.cancel_all();
    assert!(!planner.placement().is_armed());
    assert!(planner.selection().is_empty());
    // Placed items survive cancellation.
    assert_eq!(planner.project().placed().count(), 1);
}

#[tokio::test]
async fn test_collision_check_matches_render_styling() {
    let mut planner = planner_with_desks(2);
    planner.start_placement("Desk", 2).unwrap();
    planner.place_at(Point::new(100.0, 100.0)).unwrap();
    planner.place_at(Point::new(150.0, 120.0)).unwrap();

    let issues = planner
        .check_layout(Rect::new(0.0, 0.0, 2000.0, 2000.0))
        .await;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].item_ids.len(), 2);

    let list = planner.render_list();
    assert!(list
        .items
        .iter()
        .all(|item| item.style == plankit_layout::ItemStyle::Error));
}

proptest! {
    #[test]
    fn prop_history_fully_unwinds(xs in prop::collection::vec(-500.0f64..500.0, 1..12)) {
        let initial = project_with_desks(1);
        let mut history = History::new(initial.clone());

        for x in &xs {
            let mut project = history.current().clone();
            project.furniture[0].x = Some(*x);
            project.furniture[0].y = Some(*x);
            history.commit(project);
        }
        for _ in &xs {
            prop_assert!(history.undo());
        }
        prop_assert_eq!(history.current(), &initial);
        prop_assert!(!history.undo());
    }

    #[test]
    fn prop_undo_redo_round_trip(xs in prop::collection::vec(-500.0f64..500.0, 1..12)) {
        let mut history = History::new(project_with_desks(1));
        for x in &xs {
            let mut project = history.current().clone();
            project.furniture[0].x = Some(*x);
            history.commit(project);
        }
        let before = history.current().clone();
        prop_assert!(history.undo());
        prop_assert!(history.redo());
        prop_assert_eq!(history.current(), &before);
    }
}
