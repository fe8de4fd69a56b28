//! Entity trait implementation for the Courier domain type.
//!
//! Enables [`Courier`] to be managed by the generic
//! [`ResourceActor`](crate::framework::ResourceActor). Location updates go
//! through [`CourierUpdate`]; binding, releasing, and movement are actions.

use super::actions::{CourierAction, CourierActionResult};
use super::error::CourierError;
use crate::framework::ActorEntity;
use crate::model::{Courier, CourierCreate, CourierUpdate};

impl ActorEntity for Courier {
    type Id = String;
    type CreateParams = CourierCreate;
    type UpdateParams = CourierUpdate;
    type Action = CourierAction;
    type ActionResult = CourierActionResult;
    type Error = CourierError;

    fn from_create_params(id: String, params: CourierCreate) -> Result<Self, CourierError> {
        if !params.location.is_finite() {
            return Err(CourierError::InvalidLocation);
        }
        Ok(Courier::new(id, params))
    }

    fn on_update(&mut self, update: CourierUpdate) -> Result<(), CourierError> {
        if let Some(location) = update.location {
            if !location.is_finite() {
                return Err(CourierError::InvalidLocation);
            }
            self.current_location = location;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CourierAction) -> Result<CourierActionResult, CourierError> {
        match action {
            CourierAction::Bind { order_id } => {
                if !self.is_available {
                    return Err(CourierError::AlreadyBusy {
                        courier_id: self.id.clone(),
                        order_id: self
                            .current_order_id
                            .clone()
                            .unwrap_or_else(|| "<unknown>".to_string()),
                    });
                }
                self.mark_busy(order_id);
                Ok(CourierActionResult::Bound(self.clone()))
            }
            CourierAction::Release { order_id } => {
                // Defends against the courier having been reassigned or
                // already freed by a racing caller.
                if self.current_order_id.as_deref() == Some(order_id.as_str()) {
                    self.mark_available();
                }
                Ok(CourierActionResult::Released(self.clone()))
            }
            CourierAction::MoveTowards {
                target,
                step_size_km,
            } => {
                if !target.is_finite() {
                    return Err(CourierError::InvalidLocation);
                }
                let outcome = self.move_towards(target, step_size_km);
                Ok(CourierActionResult::Moved {
                    courier: self.clone(),
                    outcome,
                })
            }
        }
    }
}
