//! Error types for the Order actor and the order lifecycle.

use crate::courier_actor::CourierError;
use crate::framework::FrameworkError;
use crate::model::state::{join_states, OrderState};
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// One enum covers the whole actor and its lifecycle orchestration; callers
/// pattern-match the variant they care about.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The creation payload violated one or more constraints.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The requested state change is not an edge of the transition table.
    #[error(
        "Invalid state transition: {from} -> {to}. Valid transitions from {from}: {}",
        join_states(.valid)
    )]
    InvalidTransition {
        from: OrderState,
        to: OrderState,
        valid: Vec<OrderState>,
    },

    /// A manually requested transition outside the cancellation allow-list.
    #[error(
        "Manual transition from {from} to {to} is not allowed. \
         State progression must be automatic based on courier movement."
    )]
    TransitionNotPermitted { from: OrderState, to: OrderState },

    /// An automatic transition was attempted before its physical
    /// precondition (courier proximity) was met.
    #[error("Progression blocked: {reason}")]
    ProgressionBlocked { reason: String },

    /// The operation requires a bound courier and the order has none.
    #[error("No courier assigned to order {0}")]
    NoCourierAssigned(String),

    /// The order has already reached `DELIVERED` or `CANCELLED`.
    #[error("Order {id} is already in terminal state: {state}")]
    AlreadyTerminal { id: String, state: OrderState },

    /// A courier-side failure surfaced through the order lifecycle.
    #[error(transparent)]
    Courier(#[from] CourierError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl OrderError {
    /// Recovers the typed order error carried across the actor boundary.
    pub(crate) fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(boxed) => match boxed.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::ActorCommunication(other.to_string()),
            },
            other => OrderError::ActorCommunication(other.to_string()),
        }
    }
}
