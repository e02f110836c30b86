//! Persisted data model: the `Project` aggregate and its `Furniture` entities,
//! plus the derived `RichFurniture` pixel-space view.

mod furniture;
mod project;

pub use furniture::{color_for_name, Furniture, RichFurniture};
pub use project::Project;
