//! The order state machine.
//!
//! Structural legality lives here and only here; physical preconditions
//! (courier proximity) are layered on top by [`crate::progression`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Created,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderState {
    /// Exact-match transition table.
    pub fn can_transition_to(self, next: OrderState) -> bool {
        matches!(
            (self, next),
            (OrderState::Created, OrderState::Assigned)
                | (OrderState::Created, OrderState::Cancelled)
                | (OrderState::Assigned, OrderState::PickedUp)
                | (OrderState::Assigned, OrderState::Cancelled)
                | (OrderState::PickedUp, OrderState::InTransit)
                | (OrderState::InTransit, OrderState::Delivered)
        )
    }

    /// All legal next states, for caller diagnostics.
    pub fn valid_next_states(self) -> Vec<OrderState> {
        match self {
            OrderState::Created => vec![OrderState::Assigned, OrderState::Cancelled],
            OrderState::Assigned => vec![OrderState::PickedUp, OrderState::Cancelled],
            OrderState::PickedUp => vec![OrderState::InTransit],
            OrderState::InTransit => vec![OrderState::Delivered],
            OrderState::Delivered | OrderState::Cancelled => vec![],
        }
    }

    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Cancelled)
    }

    /// States in which an order is worked by a courier and moved by the
    /// simulator.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            OrderState::Assigned | OrderState::PickedUp | OrderState::InTransit
        )
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderState::Created => "CREATED",
            OrderState::Assigned => "ASSIGNED",
            OrderState::PickedUp => "PICKED_UP",
            OrderState::InTransit => "IN_TRANSIT",
            OrderState::Delivered => "DELIVERED",
            OrderState::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// Renders a state list as `A, B` for error messages.
pub fn join_states(states: &[OrderState]) -> String {
    states
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
