//! Placement commands: arming, placing, cancelling and rotation refinement.

use std::future::Future;
use std::sync::Arc;

use plankit_core::{Error, PlacementError, Point, Rect};
use uuid::Uuid;

use super::Planner;

impl Planner {
    /// Arms placement mode for `quantity` instances of the named item.
    ///
    /// The quantity is clamped to the available unplaced count; arming fails
    /// when none are available. Arming replaces any previous armed state.
    pub fn start_placement(&mut self, name: &str, quantity: usize) -> Result<(), Error> {
        match crate::placement::PlacementMode::arm(self.project(), name, quantity) {
            Ok(mode) => {
                self.placement = mode;
                self.selection.clear();
                Ok(())
            }
            Err(err) => {
                let err = Error::from(err);
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Places the next armed instance centered on a world-space click point.
    ///
    /// The placed item gets rotation 0 immediately; rotation refinement is a
    /// separate, best-effort follow-up (`refine_rotation`). Returns the
    /// placed item's id.
    pub fn place_at(&mut self, world: Point) -> Result<Uuid, Error> {
        let template = match self.placement.template() {
            Some(template) => template.clone(),
            None => return Err(PlacementError::NotArmed.into()),
        };
        let Some(scale) = self.project().scale else {
            let err = Error::from(PlacementError::NoScale);
            self.notify_error(&err);
            return Err(err);
        };

        let px_width = template.width_cm * scale;
        let px_height = template.depth_cm * scale;

        let mut project = self.project().clone();
        let Some(item) = project
            .furniture
            .iter_mut()
            .find(|f| !f.is_placed() && f.name == template.name)
        else {
            let err = Error::from(PlacementError::NothingToPlace {
                name: template.name.clone(),
            });
            self.notify_error(&err);
            return Err(err);
        };
        item.x = Some(world.x - px_width / 2.0);
        item.y = Some(world.y - px_height / 2.0);
        item.rotation = 0.0;
        let id = item.id;

        tracing::debug!(name = %template.name, x = world.x, y = world.y, "placed item");
        self.commit(project);
        self.placement.decrement();
        Ok(id)
    }

    /// Exits placement mode, keeping already-placed instances.
    pub fn cancel_placement(&mut self) {
        self.placement.cancel();
    }

    /// The floor-plan region to snapshot for rotation inference: the item's
    /// bounds padded by 20% of its larger pixel dimension on every side.
    pub fn snippet_region(&self, id: Uuid) -> Option<Rect> {
        let rich = self.project().rich(id)?;
        let bounds = rich.bounds()?;
        let pad = 0.2 * rich.px_width.max(rich.px_height);
        Some(bounds.padded(pad))
    }

    /// Starts best-effort rotation inference for a just-placed item.
    ///
    /// `snippet` is the rendered snapshot of the item's placement region.
    /// The returned future owns the snippet and the advisor handle and does
    /// not borrow the planner; hosts spawn it and keep placing while the
    /// inference runs, then feed the result to [`apply_inferred_rotation`].
    /// On failure it resolves to `None` and only a log line is produced.
    ///
    /// [`apply_inferred_rotation`]: Planner::apply_inferred_rotation
    pub fn infer_rotation(
        &self,
        snippet: Vec<u8>,
    ) -> impl Future<Output = Option<u16>> + Send + 'static {
        let advisor = Arc::clone(&self.advisor);
        async move {
            match advisor.infer_rotation(&snippet).await {
                Ok(degrees) => Some(degrees),
                Err(err) => {
                    tracing::warn!(%err, "rotation inference unavailable, keeping rotation 0");
                    None
                }
            }
        }
    }

    /// Infers and applies a rotation in one awaited call. Never surfaces an
    /// error to the user; a failed inference leaves the rotation at 0.
    pub async fn refine_rotation(&mut self, id: Uuid, snippet: &[u8]) {
        let inference = self.infer_rotation(snippet.to_vec());
        if let Some(degrees) = inference.await {
            self.apply_inferred_rotation(id, degrees);
        }
    }

    /// Applies an inferred rotation to an item if it still exists. A zero
    /// inference is a no-op so it creates no history entry.
    pub fn apply_inferred_rotation(&mut self, id: Uuid, degrees: u16) {
        if degrees == 0 {
            return;
        }
        let mut project = self.project().clone();
        let Some(item) = project.furniture_by_id_mut(id) else {
            tracing::debug!(%id, "inferred rotation target no longer exists");
            return;
        };
        item.set_rotation(f64::from(degrees));
        tracing::debug!(%id, degrees, "applied inferred rotation");
        self.commit(project);
    }
}
