//! Entity trait implementation for the Order domain type.
//!
//! Enables [`Order`] to be managed by the generic
//! [`ResourceActor`](crate::framework::ResourceActor). Orders have no partial
//! update; every mutation after creation is a state-machine action.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderState};

/// Orders are never field-patched from outside; the type is uninhabitable.
#[derive(Debug, Clone)]
pub enum NoUpdate {}

impl ActorEntity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type UpdateParams = NoUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        params.validate().map_err(OrderError::Validation)?;
        Ok(Order::new(id, params))
    }

    fn on_update(&mut self, update: NoUpdate) -> Result<(), OrderError> {
        match update {}
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::AssignCourier { courier_id } => {
                if !self.state.can_transition_to(OrderState::Assigned) {
                    return Err(OrderError::InvalidTransition {
                        from: self.state,
                        to: OrderState::Assigned,
                        valid: self.state.valid_next_states(),
                    });
                }
                self.bind_courier(courier_id);
                Ok(OrderActionResult::Assigned(self.clone()))
            }
            OrderAction::ApplyTransition { new_state } => {
                if !self.state.can_transition_to(new_state) {
                    return Err(OrderError::InvalidTransition {
                        from: self.state,
                        to: new_state,
                        valid: self.state.valid_next_states(),
                    });
                }
                if new_state == OrderState::PickedUp && self.courier_id.is_none() {
                    return Err(OrderError::NoCourierAssigned(self.id.clone()));
                }
                self.set_state(new_state);
                if new_state.is_terminal() {
                    // Terminal orders carry no courier binding.
                    self.clear_courier();
                }
                Ok(OrderActionResult::Transitioned(self.clone()))
            }
        }
    }
}
