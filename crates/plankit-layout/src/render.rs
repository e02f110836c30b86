//! Draw-list orchestration.
//!
//! The engine does not draw; it builds an ordered list of render items the
//! host paints back to front: the reference floor plan first, then all
//! non-stacked placed furniture, then one representative per stack (the
//! largest-area member, carrying the member count for the badge).
//!
//! Outline styling is computed by priority: error > selected > stacked >
//! normal.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use plankit_core::{Project, Rect, RichFurniture};

use crate::selection::SelectionSet;

/// Outline style for a rendered item, highest priority wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyle {
    Error,
    Selected,
    Stacked,
    Normal,
}

/// One paintable furniture footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: Uuid,
    pub bounds: Rect,
    pub rotation: f64,
    pub color: String,
    pub style: ItemStyle,
    /// Member count when this item represents a stack.
    pub stack_size: Option<usize>,
}

/// Complete draw list in paint order.
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    /// Painted first when present.
    pub floor_plan_url: Option<String>,
    pub items: Vec<RenderItem>,
}

fn style_for(
    id: Uuid,
    stacked: bool,
    selection: &SelectionSet,
    error_ids: &HashSet<Uuid>,
) -> ItemStyle {
    if error_ids.contains(&id) {
        ItemStyle::Error
    } else if selection.contains(id) {
        ItemStyle::Selected
    } else if stacked {
        ItemStyle::Stacked
    } else {
        ItemStyle::Normal
    }
}

/// Builds the draw list for the current project snapshot.
///
/// `error_ids` carries the item ids referenced by the latest layout check's
/// error issues. Items without pixel bounds (no scale, or unplaced) are
/// skipped.
pub fn build_render_list(
    project: &Project,
    selection: &SelectionSet,
    error_ids: &HashSet<Uuid>,
) -> RenderList {
    let mut list = RenderList {
        floor_plan_url: project.floor_plan_url.clone(),
        items: Vec::new(),
    };
    let Some(scale) = project.scale else {
        return list;
    };

    let mut stacks: HashMap<Uuid, Vec<RichFurniture>> = HashMap::new();
    let mut stack_order: Vec<Uuid> = Vec::new();

    for item in project.placed() {
        let rich = RichFurniture::derive(item, scale);
        match item.stack_id {
            Some(stack_id) => {
                let members = stacks.entry(stack_id).or_default();
                if members.is_empty() {
                    stack_order.push(stack_id);
                }
                members.push(rich);
            }
            None => {
                if let Some(bounds) = rich.bounds() {
                    list.items.push(RenderItem {
                        id: item.id,
                        bounds,
                        rotation: item.rotation,
                        color: item.display_color(),
                        style: style_for(item.id, false, selection, error_ids),
                        stack_size: None,
                    });
                }
            }
        }
    }

    // One representative per stack: the largest-area member.
    for stack_id in stack_order {
        let members = &stacks[&stack_id];
        let representative = members
            .iter()
            .max_by(|a, b| {
                (a.px_width * a.px_height)
                    .partial_cmp(&(b.px_width * b.px_height))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("stack has at least one member");
        if let Some(bounds) = representative.bounds() {
            let item = &representative.furniture;
            list.items.push(RenderItem {
                id: item.id,
                bounds,
                rotation: item.rotation,
                color: item.display_color(),
                style: style_for(item.id, true, selection, error_ids),
                stack_size: Some(members.len()),
            });
        }
    }

    list
}
