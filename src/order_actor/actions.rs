//! Custom actions for the Order actor.
//!
//! State changes are applied here, inside the actor's sequential loop, so
//! legality is re-checked against the *current* state at apply time. That
//! re-check is what catches a manual cancellation racing an automatic
//! transition from the movement simulator: whichever lands second sees the
//! updated state and is rejected cleanly.

use crate::model::OrderState;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Binds a courier and advances `CREATED -> ASSIGNED` in one step.
    AssignCourier { courier_id: String },
    /// Applies a state transition after validating it against the table.
    /// Terminal transitions also clear the courier binding.
    ApplyTransition { new_state: OrderState },
}

/// Results from OrderActions - variants match 1:1 with OrderAction.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The order after a successful courier assignment.
    Assigned(crate::model::Order),
    /// The order after a committed transition.
    Transitioned(crate::model::Order),
}
