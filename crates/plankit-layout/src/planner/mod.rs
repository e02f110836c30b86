//! Planner facade for host integration.
//!
//! Owns the project history and all transient interaction state and exposes
//! the command surface the host UI drives. This module is split into
//! submodules for better organization:
//! - `history`: commit/live entry points, undo/redo
//! - `placement`: placement mode lifecycle and rotation refinement
//! - `selection`: click and marquee selection
//! - `transforms`: drag, rotate, stack/unstack, tidy, arrange, delete
//! - `viewport`: pan/zoom controls and coordinate mapping
//! - `advisory`: layout checking with local fallback, dimension lines

mod advisory;
mod history;
mod placement;
mod selection;
mod transforms;
mod viewport;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use plankit_core::{Error, Furniture, Notifications, Project, Severity};

use crate::advisory::LayoutAdvisor;
use crate::history::History;
use crate::placement::PlacementMode;
use crate::render::{build_render_list, RenderList};
use crate::selection::SelectionSet;
use crate::viewport::ViewTransform;

/// Active canvas tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    /// Drawing the reference line that establishes the scale.
    ScaleLine,
    /// Measuring distances on the floor plan.
    Measure,
}

pub use transforms::TidyAxis;

/// In-flight drag gesture state.
#[derive(Debug, Clone)]
pub(crate) struct DragGesture {
    pub(crate) item_ids: Vec<Uuid>,
    /// Snapshot taken at gesture start; restored under the single commit the
    /// gesture produces so undo lands before the drag.
    pub(crate) origin: Project,
    pub(crate) moved: bool,
}

/// The embedded layout engine facade.
///
/// All project mutation flows through the planner's commit/live entry
/// points; no component mutates furniture outside that path. The advisory
/// port is injected at construction and owned by the host application.
pub struct Planner {
    pub(crate) history: History,
    pub(crate) selection: SelectionSet,
    pub(crate) placement: PlacementMode,
    pub(crate) view: ViewTransform,
    pub(crate) notifications: Notifications,
    pub(crate) advisor: Arc<dyn LayoutAdvisor>,
    pub(crate) tool: Tool,
    pub(crate) drag: Option<DragGesture>,
    /// Item ids flagged by the latest layout check's error issues.
    pub(crate) error_ids: HashSet<Uuid>,
}

impl Planner {
    /// Creates a planner around an existing project.
    pub fn new(project: Project, advisor: Arc<dyn LayoutAdvisor>) -> Self {
        Self {
            history: History::new(project),
            selection: SelectionSet::new(),
            placement: PlacementMode::Idle,
            view: ViewTransform::new(),
            notifications: Notifications::new(),
            advisor,
            tool: Tool::Select,
            drag: None,
            error_ids: HashSet::new(),
        }
    }

    /// The current project read model.
    pub fn project(&self) -> &Project {
        self.history.current()
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The current placement mode.
    pub fn placement(&self) -> &PlacementMode {
        &self.placement
    }

    /// The active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Active notifications.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Dismisses a notification by id.
    pub fn dismiss_notification(&mut self, id: Uuid) -> bool {
        self.notifications.dismiss(id)
    }

    /// Drops notifications past their auto-dismiss window.
    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    /// Builds the current draw list for the host.
    pub fn render_list(&self) -> RenderList {
        build_render_list(self.project(), &self.selection, &self.error_ids)
    }

    /// Global cancellation (Escape): resets placement, scale-line and
    /// measure tools, abandons any drag and clears the selection.
    /// Cancellation is total, not partial.
    pub fn cancel_all(&mut self) {
        self.placement.cancel();
        self.tool = Tool::Select;
        self.drag = None;
        self.selection.clear();
        tracing::debug!("cancelled all transient interaction state");
    }

    /// Records the reference floor plan image for the project.
    pub fn upload_floor_plan(&mut self, url: impl Into<String>, width: f64, height: f64) {
        let mut project = self.project().clone();
        project.floor_plan_url = Some(url.into());
        project.floor_plan_width = Some(width);
        project.floor_plan_height = Some(height);
        self.history.commit(project);
    }

    /// Adds imported furniture to the project as a single committed action.
    pub fn import_furniture(&mut self, items: Vec<Furniture>) {
        if items.is_empty() {
            return;
        }
        let mut project = self.project().clone();
        project.furniture.extend(items);
        self.history.commit(project);
    }

    /// Sets the project scale from a reference measurement. Silently ignores
    /// non-positive real lengths, creating no history entry.
    pub fn set_scale(&mut self, pixel_length: f64, real_length: f64, unit: plankit_core::Unit) {
        if unit.to_centimeters(real_length) <= 0.0 {
            return;
        }
        let mut project = self.project().clone();
        project.set_scale(pixel_length, real_length, unit);
        self.history.commit(project);
        if self.tool == Tool::ScaleLine {
            self.tool = Tool::Select;
        }
    }

    /// Surfaces an error as a transient notification and logs it.
    pub(crate) fn notify_error(&mut self, err: &Error) {
        let severity = if err.is_precondition() {
            Severity::Info
        } else if err.is_advisory_error() {
            Severity::Warning
        } else {
            Severity::Error
        };
        tracing::debug!(%err, "user-facing failure");
        self.notifications.push(severity, err.to_string());
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("project", &self.project().name)
            .field("history_len", &self.history.len())
            .field("selection", &self.selection.len())
            .field("placement", &self.placement)
            .field("tool", &self.tool)
            .finish()
    }
}
