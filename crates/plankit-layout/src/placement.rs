//! Placement state machine.
//!
//! `Idle -> Armed(template, remaining) -> Idle`. While armed, canvas clicks
//! place instances of the chosen furniture template instead of performing
//! selection. The mode is transient: it is never persisted and is destroyed
//! when the remaining count reaches zero or on explicit cancel.

use plankit_core::{Furniture, PlacementError, Project};

/// The furniture shape being placed, without id or position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementTemplate {
    pub name: String,
    pub width_cm: f64,
    pub depth_cm: f64,
}

impl From<&Furniture> for PlacementTemplate {
    fn from(item: &Furniture) -> Self {
        Self {
            name: item.name.clone(),
            width_cm: item.width_cm,
            depth_cm: item.depth_cm,
        }
    }
}

/// Transient placement-mode state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlacementMode {
    #[default]
    Idle,
    Armed {
        template: PlacementTemplate,
        /// Total quantity the user asked for (after clamping).
        requested: usize,
        /// Instances still to be placed.
        remaining: usize,
    },
}

impl PlacementMode {
    /// Arms placement for `quantity` instances of the named item.
    ///
    /// The quantity is clamped to the number of currently-unplaced items
    /// sharing that name; arming is rejected when none are available.
    pub fn arm(project: &Project, name: &str, quantity: usize) -> Result<Self, PlacementError> {
        let available = project.unplaced_count(name);
        if available == 0 || quantity == 0 {
            return Err(PlacementError::NothingToPlace {
                name: name.to_string(),
            });
        }
        let template = project
            .furniture
            .iter()
            .find(|f| !f.is_placed() && f.name == name)
            .map(PlacementTemplate::from)
            .ok_or_else(|| PlacementError::NothingToPlace {
                name: name.to_string(),
            })?;

        let quantity = quantity.min(available);
        tracing::debug!(name, quantity, available, "placement armed");
        Ok(Self::Armed {
            template,
            requested: quantity,
            remaining: quantity,
        })
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed { .. })
    }

    /// The armed template, if any.
    pub fn template(&self) -> Option<&PlacementTemplate> {
        match self {
            Self::Armed { template, .. } => Some(template),
            Self::Idle => None,
        }
    }

    /// Instances still to be placed (0 when idle).
    pub fn remaining(&self) -> usize {
        match self {
            Self::Armed { remaining, .. } => *remaining,
            Self::Idle => 0,
        }
    }

    /// Records one successful placement, transitioning to `Idle` when the
    /// remaining count hits zero.
    pub fn decrement(&mut self) {
        if let Self::Armed { remaining, .. } = self {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                *self = Self::Idle;
            }
        }
    }

    /// Returns to `Idle`, discarding any remaining count. Already-placed
    /// items are unaffected.
    pub fn cancel(&mut self) {
        if self.is_armed() {
            tracing::debug!(remaining = self.remaining(), "placement cancelled");
        }
        *self = Self::Idle;
    }
}
