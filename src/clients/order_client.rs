//! # Order Client
//!
//! The order lifecycle manager. Wraps the generic `ResourceClient<Order>`
//! and owns the orchestration around it: creation + assignment, manual and
//! automatic transitions, cancellation, and single-step progression.

use crate::assignment::{AssignmentEngine, AssignmentOutcome};
use crate::clients::actor_client::ActorClient;
use crate::clients::courier_client::CourierClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Courier, Order, OrderCreate, OrderState};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::progression;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Movement increment used by manually triggered single-step progression,
/// in the same units as the distance function's output.
const MANUAL_STEP_KM: f64 = 0.01;

/// A created order together with how its assignment attempt went. The order
/// is valid either way; an unassigned one simply stays `CREATED`.
#[derive(Debug, Clone)]
pub struct OrderPlacement {
    pub order: Order,
    pub assignment: AssignmentOutcome,
}

/// Snapshot returned by single-step progression.
#[derive(Debug, Clone)]
pub struct ProgressReport {
    pub order: Order,
    pub courier: Courier,
    pub message: String,
}

/// Client for interacting with the Order actor.
///
/// Holds the courier client and the assignment engine so the full lifecycle
/// (assign on create, release on terminal states) runs behind one API.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    couriers: CourierClient,
    assignment: AssignmentEngine,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        couriers: CourierClient,
        assignment: AssignmentEngine,
    ) -> Self {
        Self {
            inner,
            couriers,
            assignment,
        }
    }

    /// Fetches an order, failing with `NotFound` if absent.
    pub async fn get_required(&self, order_id: &str) -> Result<Order, OrderError> {
        self.get(order_id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// Validates and persists a new order, then attempts assignment.
    ///
    /// The order is persisted and returned regardless of the assignment
    /// outcome: `NoCouriersAvailable` / `NoCouriersInRange` leave a valid
    /// order in `CREATED`.
    #[instrument(skip(self, params))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderPlacement, OrderError> {
        debug!(?params, "create_order called");

        let order_id = self
            .inner
            .create(params)
            .await
            .map_err(OrderError::from_framework)?;
        let order = self.get_required(&order_id).await?;

        let assignment = self.assignment.assign(&order).await?;

        // Re-read: a successful assignment just advanced the order.
        let order = self.get_required(&order_id).await?;
        info!(order_id = %order.id, state = %order.state, "Order created");
        Ok(OrderPlacement { order, assignment })
    }

    /// Requests a state change on an order.
    ///
    /// Manual requests (`manual = true`) are limited to the cancellation
    /// allow-list. Automatic requests additionally pass the progression
    /// validator unless they target `CANCELLED`. Terminal transitions
    /// release the bound courier.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        order_id: &str,
        new_state: OrderState,
        manual: bool,
    ) -> Result<Order, OrderError> {
        let order = self.get_required(order_id).await?;

        if manual && !progression::manual_transition_allowed(order.state, new_state) {
            return Err(OrderError::TransitionNotPermitted {
                from: order.state,
                to: new_state,
            });
        }

        if !order.state.can_transition_to(new_state) {
            return Err(OrderError::InvalidTransition {
                from: order.state,
                to: new_state,
                valid: order.state.valid_next_states(),
            });
        }

        if new_state == OrderState::PickedUp && order.courier_id.is_none() {
            return Err(OrderError::NoCourierAssigned(order.id.clone()));
        }

        if !manual && new_state != OrderState::Cancelled {
            let courier_id = order
                .courier_id
                .clone()
                .ok_or_else(|| OrderError::NoCourierAssigned(order.id.clone()))?;
            let courier = self.couriers.get_required(&courier_id).await?;
            let check = progression::evaluate(&order, &courier);
            if !check.allowed {
                return Err(OrderError::ProgressionBlocked {
                    reason: check.reason,
                });
            }
        }

        // The binding is cleared by terminal transitions; remember it so the
        // courier can be released afterwards.
        let bound_courier = order.courier_id.clone();
        let updated = self.apply_transition(order_id, new_state).await?;

        if new_state.is_terminal() {
            if let Some(courier_id) = bound_courier {
                self.assignment.unassign(order_id, &courier_id).await?;
            }
        }

        info!(order_id, state = %updated.state, "Order transitioned");
        Ok(updated)
    }

    /// Cancels an order that has not yet been picked up.
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_id: &str) -> Result<Order, OrderError> {
        let order = self.get_required(order_id).await?;
        if order.state.is_terminal() {
            return Err(OrderError::AlreadyTerminal {
                id: order.id,
                state: order.state,
            });
        }
        self.transition(order_id, OrderState::Cancelled, true).await
    }

    /// Advances an order a single step without waiting on the background
    /// simulator: either the courier moves one increment toward its current
    /// target, or, once close enough, the order transitions.
    pub async fn progress_one_step(&self, order_id: &str) -> Result<ProgressReport, OrderError> {
        self.progress_with_step(order_id, MANUAL_STEP_KM).await
    }

    /// Single-step progression with an explicit movement increment; the
    /// simulator's force-progress path passes an effectively unbounded step
    /// here so arrival is certain.
    #[instrument(skip(self))]
    pub(crate) async fn progress_with_step(
        &self,
        order_id: &str,
        step_size_km: f64,
    ) -> Result<ProgressReport, OrderError> {
        let order = self.get_required(order_id).await?;
        // Terminal orders have no binding left, so this must come first or
        // a finished walk would misreport as "no courier assigned".
        if order.state.is_terminal() {
            return Err(OrderError::AlreadyTerminal {
                id: order.id,
                state: order.state,
            });
        }
        let courier_id = order
            .courier_id
            .clone()
            .ok_or_else(|| OrderError::NoCourierAssigned(order.id.clone()))?;
        let courier = self.couriers.get_required(&courier_id).await?;
        let check = progression::evaluate(&order, &courier);

        let message = match order.state {
            OrderState::Assigned => {
                if check.allowed {
                    self.transition(order_id, OrderState::PickedUp, false)
                        .await?;
                    "Courier reached pickup location".to_string()
                } else {
                    self.couriers
                        .move_towards(&courier_id, order.pickup_location, step_size_km)
                        .await?;
                    check.reason
                }
            }
            OrderState::PickedUp => {
                self.transition(order_id, OrderState::InTransit, false)
                    .await?;
                "Package picked up, now in transit".to_string()
            }
            OrderState::InTransit => {
                if check.allowed {
                    self.transition(order_id, OrderState::Delivered, false)
                        .await?;
                    "Order delivered successfully".to_string()
                } else {
                    self.couriers
                        .move_towards(&courier_id, order.drop_location, step_size_km)
                        .await?;
                    check.reason
                }
            }
            OrderState::Created | OrderState::Delivered | OrderState::Cancelled => {
                return Err(OrderError::ProgressionBlocked {
                    reason: check.reason,
                });
            }
        };

        let order = self.get_required(order_id).await?;
        let courier = self.couriers.get_required(&courier_id).await?;
        Ok(ProgressReport {
            order,
            courier,
            message,
        })
    }

    async fn apply_transition(
        &self,
        order_id: &str,
        new_state: OrderState,
    ) -> Result<Order, OrderError> {
        match self
            .inner
            .perform_action(
                order_id.to_string(),
                OrderAction::ApplyTransition { new_state },
            )
            .await
            .map_err(OrderError::from_framework)?
        {
            OrderActionResult::Transitioned(order) => Ok(order),
            other => Err(OrderError::ActorCommunication(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from_framework(e)
    }
}
