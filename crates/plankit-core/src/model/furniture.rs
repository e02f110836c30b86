//! Furniture entities.
//!
//! `Furniture` is the persisted base entity: real-world dimensions in
//! centimeters, an optional world-coordinate position and optional grouping
//! relations. `RichFurniture` is the derived pixel-space view computed from
//! the project scale; it is never stored and is recomputed whenever the scale
//! or the base dimensions change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rect;

/// A furniture item within a project.
///
/// An item is "placed" iff both `x` and `y` are set. Items sharing a
/// `stack_id` always share the exact same position; stacks move as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    /// Unique within the owning project.
    pub id: Uuid,
    /// Display name; also the key used to match unplaced items during
    /// placement and to derive the default color.
    pub name: String,
    /// Real-world width in centimeters. Immutable once imported.
    pub width_cm: f64,
    /// Real-world depth in centimeters. Immutable once imported.
    pub depth_cm: f64,
    /// Rotation in degrees, normalized to [0, 360).
    pub rotation: f64,
    /// World-coordinate X of the top-left corner, in floor-plan pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// World-coordinate Y of the top-left corner, in floor-plan pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<Uuid>,
    /// Display color, derived deterministically from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// External product code carried through from the import source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    /// Source line number in the imported document, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl Furniture {
    /// Creates a new unplaced item with a fresh id and a name-derived color.
    pub fn new(name: impl Into<String>, width_cm: f64, depth_cm: f64) -> Self {
        let name = name.into();
        let color = Some(color_for_name(&name));
        Self {
            id: Uuid::new_v4(),
            name,
            width_cm,
            depth_cm,
            rotation: 0.0,
            x: None,
            y: None,
            group_id: None,
            stack_id: None,
            color,
            product_code: None,
            line_number: None,
        }
    }

    /// Whether this item has a position on the canvas.
    pub fn is_placed(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// Sets the rotation, normalized to [0, 360).
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    /// The display color, falling back to the name-derived default.
    pub fn display_color(&self) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| color_for_name(&self.name))
    }
}

/// Derived pixel-space view of a furniture item.
///
/// Only exists when the project scale (px/cm) is set; it is recomputed on
/// read and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RichFurniture {
    pub furniture: Furniture,
    /// Width in world pixels (`width_cm` × scale).
    pub px_width: f64,
    /// Depth in world pixels (`depth_cm` × scale).
    pub px_height: f64,
}

impl RichFurniture {
    /// Derives the pixel view from a base item and the project scale.
    pub fn derive(furniture: &Furniture, scale: f64) -> Self {
        Self {
            furniture: furniture.clone(),
            px_width: furniture.width_cm * scale,
            px_height: furniture.depth_cm * scale,
        }
    }

    /// Axis-aligned bounding box in world coordinates.
    ///
    /// Extents swap at 90° and 270°; other rotations keep the unrotated
    /// extents, matching how the canvas hit-tests items.
    /// Returns `None` for unplaced items.
    pub fn bounds(&self) -> Option<Rect> {
        let (x, y) = match (self.furniture.x, self.furniture.y) {
            (Some(x), Some(y)) => (x, y),
            _ => return None,
        };
        let quarter_turn = (self.furniture.rotation.rem_euclid(180.0) - 90.0).abs() < 1e-9;
        let (w, h) = if quarter_turn {
            (self.px_height, self.px_width)
        } else {
            (self.px_width, self.px_height)
        };
        Some(Rect::new(x, y, w, h))
    }
}

/// Deterministic display color derived from a furniture name.
///
/// FNV-1a over the name bytes, mapped onto the hue wheel at fixed
/// saturation/lightness so repeated imports of the same catalog stay visually
/// stable.
pub fn color_for_name(name: &str) -> String {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in name.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("hsl({}, 70%, 75%)", hash % 360)
}
