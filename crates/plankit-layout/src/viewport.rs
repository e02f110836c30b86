//! Viewport transform between screen and world coordinates.
//!
//! Screen coordinates are raw pointer coordinates in the host's display
//! space; world coordinates are the floor plan's own pixel space. The
//! transform is a uniform scale plus a pixel offset:
//!
//! ```text
//! screen = world * scale + offset
//! world  = (screen - offset) / scale
//! ```
//!
//! The transform is per-session state and is never part of the project.

use std::fmt;

use plankit_core::Point;

/// Minimum zoom scale.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum zoom scale.
pub const MAX_ZOOM: f64 = 10.0;

/// Pan/zoom state of the layout canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ViewTransform {
    /// Identity transform: 1:1 zoom, no offset.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Current zoom scale (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current pixel offset.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Converts a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    /// Converts a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset_x,
            world.y * self.scale + self.offset_y,
        )
    }

    /// Translates the offset by a raw screen-space delta. No scaling is
    /// applied to the pan delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Sets the zoom anchored at a cursor position: the world point under the
    /// cursor stays visually fixed.
    ///
    /// `offset' = cursor - (cursor - offset) * (new / old)`
    pub fn zoom_at(&mut self, cursor: Point, new_scale: f64) {
        let new_scale = new_scale.clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_scale / self.scale;
        self.offset_x = cursor.x - (cursor.x - self.offset_x) * ratio;
        self.offset_y = cursor.y - (cursor.y - self.offset_y) * ratio;
        self.scale = new_scale;
    }

    /// Wheel zoom: multiplies the current scale by `factor`, anchored at the
    /// cursor.
    pub fn wheel_zoom(&mut self, cursor: Point, factor: f64) {
        self.zoom_at(cursor, self.scale * factor);
    }

    /// Double-click zoom toggle between 1.0 and 1.5, anchored at the click
    /// point.
    pub fn toggle_zoom(&mut self, cursor: Point) {
        let target = if (self.scale - 1.0).abs() < f64::EPSILON {
            1.5
        } else {
            1.0
        };
        self.zoom_at(cursor, target);
    }

    /// Resets to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.scale, self.offset_x, self.offset_y
        )
    }
}
