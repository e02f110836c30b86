//! # Plankit Core
//!
//! Core types for the plankit floor-plan placement engine:
//!
//! - **Geometry**: points and axis-aligned rectangles in world coordinates
//! - **Units**: conversion between real-world units and centimeters
//! - **Model**: the persisted `Project`/`Furniture` entities and the derived
//!   `RichFurniture` view used for pixel-space layout
//! - **Errors**: the error taxonomy shared by all plankit crates
//! - **Notifications**: transient user-facing messages with auto-dismiss

pub mod error;
pub mod geometry;
pub mod model;
pub mod notify;
pub mod units;

pub use error::{AdvisoryError, Error, ImportError, PersistenceError, PlacementError, Result};
pub use geometry::{Point, Rect};
pub use model::{color_for_name, Furniture, Project, RichFurniture};
pub use notify::{Notification, Notifications, Severity};
pub use units::Unit;
