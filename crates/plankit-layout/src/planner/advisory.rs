//! Layout checking and dimension-line commands.
//!
//! All advisory calls go through the injected `LayoutAdvisor` port and
//! degrade gracefully: an unreachable or malformed advisor falls back to the
//! local collision check and a dismissable warning, never an error that
//! touches project state.

use std::future::Future;
use std::sync::Arc;

use plankit_core::{Rect, Severity};
use uuid::Uuid;

use crate::advisory::{
    detect_collisions, dimension_label, DimensionLine, IssueKind, LayoutIssue, LayoutReport,
};

use super::Planner;

impl Planner {
    /// Starts a layout analysis over the placed items.
    ///
    /// The returned future owns its inputs and does not borrow the planner,
    /// so hosts can spawn it and keep issuing commands while the advisor
    /// call is in flight. Apply the outcome with [`apply_layout_report`].
    ///
    /// On advisor failure the local pairwise collision check runs instead
    /// and the report is marked degraded.
    ///
    /// [`apply_layout_report`]: Planner::apply_layout_report
    pub fn analyze_layout(
        &self,
        canvas_bounds: Rect,
    ) -> impl Future<Output = LayoutReport> + Send + 'static {
        let items = self.project().rich_placed();
        let advisor = Arc::clone(&self.advisor);
        async move {
            match advisor.analyze_layout(&items, canvas_bounds).await {
                Ok(issues) => LayoutReport {
                    issues,
                    degraded: false,
                },
                Err(err) => {
                    tracing::warn!(%err, "layout advisor unavailable, using local collision check");
                    LayoutReport {
                        issues: detect_collisions(&items),
                        degraded: true,
                    }
                }
            }
        }
    }

    /// Applies an analysis outcome: retains the ids referenced by `error`
    /// issues for render styling and surfaces a warning notification when
    /// the report came from the degraded fallback.
    pub fn apply_layout_report(&mut self, report: LayoutReport) -> Vec<LayoutIssue> {
        if report.degraded {
            self.notifications.push(
                Severity::Warning,
                "Layout advisor unavailable; showing overlap check only",
            );
        }
        self.error_ids = report
            .issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Error)
            .flat_map(|issue| issue.item_ids.iter().copied())
            .collect();
        tracing::debug!(
            issues = report.issues.len(),
            flagged = self.error_ids.len(),
            "layout check complete"
        );
        report.issues
    }

    /// Runs a layout check over the placed items and applies the outcome in
    /// one awaited call. Hosts that need the canvas to stay interactive
    /// spawn [`analyze_layout`] instead and apply the report when it
    /// resolves.
    ///
    /// [`analyze_layout`]: Planner::analyze_layout
    pub async fn check_layout(&mut self, canvas_bounds: Rect) -> Vec<LayoutIssue> {
        let analysis = self.analyze_layout(canvas_bounds);
        let report = analysis.await;
        self.apply_layout_report(report)
    }

    /// Item ids flagged by the latest layout check.
    pub fn flagged_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.error_ids.iter().copied()
    }

    /// Clears the error styling from the latest layout check.
    pub fn clear_layout_flags(&mut self) {
        self.error_ids.clear();
    }

    /// Requests dimension lines from an item to nearby reference features,
    /// labelled in meters. Empty on failure or while the scale is unset.
    pub async fn placement_dimensions(
        &self,
        floor_plan: &[u8],
        id: Uuid,
    ) -> Vec<(DimensionLine, String)> {
        let Some(scale) = self.project().scale else {
            return Vec::new();
        };
        let Some(bounds) = self.project().rich(id).and_then(|r| r.bounds()) else {
            return Vec::new();
        };

        match self.advisor.placement_dimensions(floor_plan, bounds).await {
            Ok(lines) => lines
                .into_iter()
                .map(|line| {
                    let label = dimension_label(line.pixel_length(), scale);
                    (line, label)
                })
                .collect(),
            Err(err) => {
                tracing::warn!(%err, "placement dimensions unavailable");
                Vec::new()
            }
        }
    }
}
