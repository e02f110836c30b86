//! # Plankit Layout
//!
//! The interactive placement and layout engine. It combines snapshot history,
//! furniture placement, selection and manipulation into an embeddable module
//! driven entirely by host input events.
//!
//! ## Core Components
//!
//! - **History**: linear snapshot stack distinguishing live (non-committing)
//!   from committed (history-creating) mutations
//! - **Viewport**: pan/zoom transform between screen and world coordinates
//! - **Placement**: the `Idle -> Armed -> Idle` placement state machine
//! - **Selection**: stack-aware single/multi/marquee selection
//! - **Render**: draw-list orchestration with styling priorities
//! - **Advisory**: the AI layout-advisory port and its local collision-only
//!   fallback
//! - **Planner**: the facade tying everything together for the host UI
//!
//! ## Architecture
//!
//! ```text
//! Planner (host-facing command surface)
//!   ├── History (commit/live snapshots of Project)
//!   ├── SelectionSet (transient)
//!   ├── PlacementMode (transient)
//!   ├── ViewTransform (per-session)
//!   └── LayoutAdvisor port (async, best-effort)
//! ```
//!
//! The `Project` is the single mutable resource; every mutation flows through
//! the planner's commit/live entry points.

pub mod advisory;
pub mod history;
pub mod placement;
pub mod planner;
pub mod render;
pub mod selection;
pub mod viewport;

pub use advisory::{
    detect_collisions, dimension_label, CollisionOnlyAdvisor, DimensionLine, IssueKind,
    LayoutAdvisor, LayoutIssue, LayoutReport,
};
pub use history::History;
pub use placement::{PlacementMode, PlacementTemplate};
pub use planner::{Planner, TidyAxis, Tool};
pub use render::{build_render_list, ItemStyle, RenderItem, RenderList};
pub use selection::SelectionSet;
pub use viewport::ViewTransform;
