//! Custom actions for the Courier actor.
//!
//! These are the domain-specific operations beyond CRUD: binding a courier
//! to an order, releasing it, and advancing it one movement step. Each runs
//! inside the actor's sequential loop, so a whole action is atomic: a reader
//! can never observe a courier marked busy without its bound order id.

use crate::model::{Coordinate, Courier, MoveOutcome};

/// Custom actions for Courier entities.
#[derive(Debug, Clone)]
pub enum CourierAction {
    /// Marks the courier busy with the given order.
    ///
    /// # Errors
    /// Fails if the courier is already bound to an order.
    Bind { order_id: String },
    /// Frees the courier, but only if it is still bound to `order_id`.
    /// A courier already freed or rebound elsewhere is left untouched.
    Release { order_id: String },
    /// Moves one step of `step_size_km` toward `target`, snapping onto it
    /// when the remaining distance is below the step.
    MoveTowards {
        target: Coordinate,
        step_size_km: f64,
    },
}

/// Results from CourierActions - variants match 1:1 with CourierAction.
#[derive(Debug, Clone)]
pub enum CourierActionResult {
    /// The courier after a successful bind.
    Bound(Courier),
    /// The courier after a release (or the untouched courier on no-op).
    Released(Courier),
    /// The courier after a movement step, with the step outcome.
    Moved {
        courier: Courier,
        outcome: MoveOutcome,
    },
}
