//! Viewport commands: pan, zoom and coordinate mapping.

use plankit_core::Point;

use super::Planner;
use crate::viewport::ViewTransform;

impl Planner {
    /// The current view transform.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Converts a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.view.screen_to_world(screen)
    }

    /// Converts a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.view.world_to_screen(world)
    }

    /// Pans by a raw screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan_by(dx, dy);
    }

    /// Wheel zoom anchored at the cursor.
    pub fn wheel_zoom(&mut self, cursor: Point, factor: f64) {
        self.view.wheel_zoom(cursor, factor);
    }

    /// Double-click zoom toggle between 1.0 and 1.5.
    pub fn toggle_zoom(&mut self, cursor: Point) {
        self.view.toggle_zoom(cursor);
    }

    /// Resets pan and zoom to the identity transform.
    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Measures the distance between two screen points, returning a label in
    /// meters. `None` while the scale is unset.
    pub fn measure_between(&self, screen_a: Point, screen_b: Point) -> Option<String> {
        let scale = self.project().scale?;
        let a = self.view.screen_to_world(screen_a);
        let b = self.view.screen_to_world(screen_b);
        Some(crate::advisory::dimension_label(a.distance_to(&b), scale))
    }
}
