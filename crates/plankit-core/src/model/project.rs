//! The `Project` aggregate root.
//!
//! A project owns the reference floor plan, the pixels-per-centimeter scale
//! and the furniture list. All mutation outside this crate goes through the
//! layout engine's commit/live entry points; the methods here are either
//! queries or primitive setters invoked from that single path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Furniture, RichFurniture};
use crate::units::Unit;

/// Aggregate root for a floor-plan layout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Reference image location; `None` until a floor plan is uploaded.
    #[serde(default)]
    pub floor_plan_url: Option<String>,
    /// Natural pixel width of the reference image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_width: Option<f64>,
    /// Natural pixel height of the reference image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_height: Option<f64>,
    /// Pixels per centimeter; `None` until the user draws a reference line.
    #[serde(default)]
    pub scale: Option<f64>,
    /// Insertion order is preserved for deterministic rendering and export.
    #[serde(default)]
    pub furniture: Vec<Furniture>,
}

impl Project {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            floor_plan_url: None,
            floor_plan_width: None,
            floor_plan_height: None,
            scale: None,
            furniture: Vec::new(),
        }
    }

    /// Sets the scale from a reference measurement.
    ///
    /// `pixel_length` is the drawn line's length in floor-plan pixels and
    /// `real_length` its physical length in `unit`. A non-positive real
    /// length is silently ignored.
    pub fn set_scale(&mut self, pixel_length: f64, real_length: f64, unit: Unit) {
        let cm = unit.to_centimeters(real_length);
        if cm <= 0.0 {
            tracing::debug!(real_length, %unit, "ignoring non-positive reference length");
            return;
        }
        self.scale = Some(pixel_length / cm);
    }

    /// Looks up an item by id.
    pub fn furniture_by_id(&self, id: Uuid) -> Option<&Furniture> {
        self.furniture.iter().find(|f| f.id == id)
    }

    /// Mutable lookup by id.
    pub fn furniture_by_id_mut(&mut self, id: Uuid) -> Option<&mut Furniture> {
        self.furniture.iter_mut().find(|f| f.id == id)
    }

    /// Iterates over placed items.
    pub fn placed(&self) -> impl Iterator<Item = &Furniture> {
        self.furniture.iter().filter(|f| f.is_placed())
    }

    /// Number of unplaced items with the given name.
    pub fn unplaced_count(&self, name: &str) -> usize {
        self.furniture
            .iter()
            .filter(|f| !f.is_placed() && f.name == name)
            .count()
    }

    /// Ids of all members of a stack, in insertion order.
    pub fn stack_members(&self, stack_id: Uuid) -> Vec<Uuid> {
        self.furniture
            .iter()
            .filter(|f| f.stack_id == Some(stack_id))
            .map(|f| f.id)
            .collect()
    }

    /// Derives the pixel-space view for one item.
    ///
    /// Returns `None` while the scale is unset: the rich view is undefined
    /// without a pixels-per-centimeter factor.
    pub fn rich(&self, id: Uuid) -> Option<RichFurniture> {
        let scale = self.scale?;
        self.furniture_by_id(id)
            .map(|f| RichFurniture::derive(f, scale))
    }

    /// Derives the pixel-space view for every placed item.
    pub fn rich_placed(&self) -> Vec<RichFurniture> {
        match self.scale {
            Some(scale) => self
                .placed()
                .map(|f| RichFurniture::derive(f, scale))
                .collect(),
            None => Vec::new(),
        }
    }
}
