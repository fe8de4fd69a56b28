//! The Courier entity and its movement primitive.

use crate::model::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// A delivery courier.
///
/// Invariant: `is_available == false` exactly when `current_order_id` is
/// present. All mutation goes through [`Courier::mark_busy`] and
/// [`Courier::mark_available`], which keep the two fields in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub id: String,
    pub name: String,
    pub current_location: Coordinate,
    pub is_available: bool,
    pub current_order_id: Option<String>,
}

/// Payload for registering a courier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierCreate {
    pub name: String,
    pub location: Coordinate,
}

/// Partial update; only the location is mutable from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierUpdate {
    pub location: Option<Coordinate>,
}

/// Result of a single movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub reached: bool,
    pub location: Coordinate,
}

impl Courier {
    pub fn new(id: impl Into<String>, params: CourierCreate) -> Self {
        Self {
            id: id.into(),
            name: params.name,
            current_location: params.location,
            is_available: true,
            current_order_id: None,
        }
    }

    pub fn mark_busy(&mut self, order_id: impl Into<String>) {
        self.is_available = false;
        self.current_order_id = Some(order_id.into());
    }

    pub fn mark_available(&mut self) {
        self.is_available = true;
        self.current_order_id = None;
    }

    /// Moves one step of `step_size_km` along the straight line toward
    /// `target`. Snaps onto the target when the remaining distance is below
    /// the step; a courier exactly one step away lands on the target but
    /// reports `reached = false` and arrives on the next step.
    pub fn move_towards(&mut self, target: Coordinate, step_size_km: f64) -> MoveOutcome {
        let distance = self.current_location.manhattan_distance_km(target);

        if distance < step_size_km {
            self.current_location = target;
            return MoveOutcome {
                reached: true,
                location: target,
            };
        }

        let ratio = step_size_km / distance;
        self.current_location = Coordinate::new(
            self.current_location.lat + (target.lat - self.current_location.lat) * ratio,
            self.current_location.lng + (target.lng - self.current_location.lng) * ratio,
        );

        MoveOutcome {
            reached: false,
            location: self.current_location,
        }
    }
}
