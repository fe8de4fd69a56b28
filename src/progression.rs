//! Decides whether an order may advance automatically, and which transitions
//! a caller may request by hand.
//!
//! Automatic progression layers physical preconditions (courier proximity)
//! on top of the structural table in [`crate::model::state`]. Manual requests
//! bypass proximity entirely and are limited to the cancellation paths; all
//! forward progress must come from movement.

use crate::model::{Coordinate, Courier, Order, OrderState, ARRIVAL_THRESHOLD_KM};

/// Outcome of an automatic-progression check.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub allowed: bool,
    pub reason: String,
}

impl Progression {
    fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    fn blocked(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

/// Evaluates whether `order` may advance to its next state given where its
/// courier currently is. Pure in its inputs.
pub fn evaluate(order: &Order, courier: &Courier) -> Progression {
    match order.state {
        OrderState::Created => {
            Progression::blocked("Order must be assigned to a courier first")
        }
        OrderState::Assigned => {
            check_arrival(courier.current_location, order.pickup_location, "pickup")
        }
        // Pickup hand-off is modeled as instantaneous: no travel between
        // PICKED_UP and IN_TRANSIT.
        OrderState::PickedUp => Progression::allowed("Package picked up, ready for transit"),
        OrderState::InTransit => {
            check_arrival(courier.current_location, order.drop_location, "drop")
        }
        OrderState::Delivered | OrderState::Cancelled => Progression::blocked(format!(
            "Order is in terminal state: {}",
            order.state
        )),
    }
}

fn check_arrival(courier_at: Coordinate, target: Coordinate, label: &str) -> Progression {
    let distance = courier_at.manhattan_distance_km(target);
    if distance <= ARRIVAL_THRESHOLD_KM {
        Progression::allowed(format!("Courier reached {label} location"))
    } else {
        Progression::blocked(format!(
            "Courier is {distance:.4} units away from {label} location (threshold: {ARRIVAL_THRESHOLD_KM})"
        ))
    }
}

/// The restrictive allow-list for manually requested transitions.
pub fn manual_transition_allowed(from: OrderState, to: OrderState) -> bool {
    matches!(
        (from, to),
        (OrderState::Created, OrderState::Cancelled)
            | (OrderState::Assigned, OrderState::Cancelled)
    )
}
