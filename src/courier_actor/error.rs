//! Error types for the Courier actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during courier operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CourierError {
    /// The requested courier was not found.
    #[error("Courier not found: {0}")]
    NotFound(String),

    /// The courier is already bound to an order and cannot take another.
    #[error("Courier {courier_id} is already busy with order {order_id}")]
    AlreadyBusy {
        courier_id: String,
        order_id: String,
    },

    /// A location payload contained non-finite coordinates.
    #[error("Invalid location: lat and lng must be finite numbers")]
    InvalidLocation,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl CourierError {
    /// Recovers the typed courier error carried across the actor boundary.
    pub(crate) fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CourierError::NotFound(id),
            FrameworkError::Entity(boxed) => match boxed.downcast::<CourierError>() {
                Ok(err) => *err,
                Err(other) => CourierError::ActorCommunication(other.to_string()),
            },
            other => CourierError::ActorCommunication(other.to_string()),
        }
    }
}
