//! AI advisory port and local fallback.
//!
//! The advisory capability is an external collaborator: it analyzes the
//! current layout, infers item rotation from image snippets and proposes
//! placement dimension lines. It is consumed read-only: advisory output
//! never mutates state, applying it is always the engine's decision.
//!
//! The engine must degrade gracefully when the capability is unavailable: a
//! local fallback performs pairwise AABB overlap detection only, producing
//! `error` issues for overlapping pairs and no flow/clustering suggestions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use plankit_core::{AdvisoryError, Rect, RichFurniture};

/// Classification of a layout finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Suggestion,
}

/// A single finding from layout analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    pub item_ids: Vec<Uuid>,
}

/// Outcome of a layout analysis, ready to be applied to a planner.
#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub issues: Vec<LayoutIssue>,
    /// Whether the advisor failed and the local collision check ran instead.
    pub degraded: bool,
}

/// A dimension line from an item to a nearby reference feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// What the line measures against, e.g. "wall" or "pillar".
    pub reference_type: String,
}

impl DimensionLine {
    /// Length of the line in floor-plan pixels.
    pub fn pixel_length(&self) -> f64 {
        ((self.x2 - self.x1).powi(2) + (self.y2 - self.y1).powi(2)).sqrt()
    }
}

/// External layout-advisory capability.
///
/// Implementations must treat all inputs as read-only and should expect to be
/// called while canvas interaction continues; calls suspend only the logical
/// operation that awaits them.
#[async_trait]
pub trait LayoutAdvisor: Send + Sync {
    /// Analyzes the placed items against the canvas bounds, returning
    /// collision/boundary/flow findings.
    async fn analyze_layout(
        &self,
        items: &[RichFurniture],
        canvas_bounds: Rect,
    ) -> Result<Vec<LayoutIssue>, AdvisoryError>;

    /// Infers an item's rotation from a rendered snapshot of its placement
    /// region. Returns a multiple of 45 in [0, 315].
    async fn infer_rotation(&self, snippet: &[u8]) -> Result<u16, AdvisoryError>;

    /// Proposes dimension lines from the item to nearby reference features
    /// on the floor plan.
    async fn placement_dimensions(
        &self,
        floor_plan: &[u8],
        item_bounds: Rect,
    ) -> Result<Vec<DimensionLine>, AdvisoryError>;
}

/// Local fallback advisor: pairwise AABB overlap detection only.
///
/// O(n²) over placed items; produces `error` issues for each overlapping
/// pair and never produces suggestions. Rotation inference and dimension
/// lines are not available locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionOnlyAdvisor;

#[async_trait]
impl LayoutAdvisor for CollisionOnlyAdvisor {
    async fn analyze_layout(
        &self,
        items: &[RichFurniture],
        _canvas_bounds: Rect,
    ) -> Result<Vec<LayoutIssue>, AdvisoryError> {
        Ok(detect_collisions(items))
    }

    async fn infer_rotation(&self, _snippet: &[u8]) -> Result<u16, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }

    async fn placement_dimensions(
        &self,
        _floor_plan: &[u8],
        _item_bounds: Rect,
    ) -> Result<Vec<DimensionLine>, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }
}

/// Pairwise AABB overlap detection over placed items.
///
/// Exactly one issue per overlapping pair, referencing both ids.
pub fn detect_collisions(items: &[RichFurniture]) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();
    for i in 0..items.len() {
        let Some(a) = items[i].bounds() else { continue };
        for item in &items[i + 1..] {
            let Some(b) = item.bounds() else { continue };
            if a.intersects(&b) {
                issues.push(LayoutIssue {
                    kind: IssueKind::Error,
                    message: format!(
                        "'{}' overlaps '{}'",
                        items[i].furniture.name, item.furniture.name
                    ),
                    item_ids: vec![items[i].furniture.id, item.furniture.id],
                });
            }
        }
    }
    issues
}

/// Human label for a dimension line: pixel length converted to meters via
/// the project scale (px/cm).
pub fn dimension_label(pixel_length: f64, scale: f64) -> String {
    let meters = pixel_length / scale / 100.0;
    format!("{:.2} m", meters)
}
