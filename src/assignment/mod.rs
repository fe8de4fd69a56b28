//! # Assignment Engine
//!
//! Selects a courier for a new order and commits the order↔courier binding.
//!
//! ## Mutual exclusion
//!
//! Availability decisions run under a single process-wide `tokio::sync::
//! Mutex`, held end-to-end across read-availability → pick → bind. The guard
//! drops on every exit path, including the early returns, so at most one
//! assignment decision is in flight at a time and two orders can never claim
//! the same idle courier. Reads that do not decide availability (order
//! status, courier listings) never touch this lock.

use crate::clients::courier_client::CourierClient;
use crate::courier_actor::CourierError;
use crate::framework::ResourceClient;
use crate::model::{Courier, DeliveryType, Order, EXPRESS_MAX_DISTANCE_KM};
use crate::order_actor::{OrderAction, OrderError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// The result of an assignment attempt. "No courier found" is an expected
/// business outcome, not a fault, so it is a variant here rather than an
/// error.
#[derive(Debug, Clone)]
pub enum AssignmentOutcome {
    /// A courier was bound to the order.
    Assigned { courier: Courier, distance_km: f64 },
    /// No courier is currently free; the order stays `CREATED`.
    NoCouriersAvailable,
    /// EXPRESS only: free couriers exist but none within range. Carries the
    /// distance of the nearest *available* courier for diagnostics.
    NoCouriersInRange { nearest_distance_km: f64 },
}

#[derive(Clone)]
pub struct AssignmentEngine {
    couriers: CourierClient,
    orders: ResourceClient<Order>,
    lock: Arc<Mutex<()>>,
}

impl AssignmentEngine {
    pub fn new(couriers: CourierClient, orders: ResourceClient<Order>) -> Self {
        Self {
            couriers,
            orders,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Picks the nearest eligible courier for `order` and binds both sides.
    ///
    /// EXPRESS orders only consider couriers within
    /// [`EXPRESS_MAX_DISTANCE_KM`] of the pickup; NORMAL orders take the
    /// nearest free courier at any distance. Ties break by courier id
    /// ascending so the choice is deterministic.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn assign(&self, order: &Order) -> Result<AssignmentOutcome, OrderError> {
        let _guard = self.lock.lock().await;

        let available = self.couriers.list_available().await?;
        if available.is_empty() {
            info!("No couriers available");
            return Ok(AssignmentOutcome::NoCouriersAvailable);
        }

        let mut ranked: Vec<(Courier, f64)> = available
            .into_iter()
            .map(|courier| {
                let distance_km = courier
                    .current_location
                    .manhattan_distance_km(order.pickup_location);
                (courier, distance_km)
            })
            .collect();

        if order.delivery_type == DeliveryType::Express {
            let nearest_distance_km = ranked
                .iter()
                .map(|(_, d)| *d)
                .fold(f64::INFINITY, f64::min);
            ranked.retain(|(_, d)| *d <= EXPRESS_MAX_DISTANCE_KM);
            if ranked.is_empty() {
                info!(nearest_distance_km, "No couriers in EXPRESS range");
                return Ok(AssignmentOutcome::NoCouriersInRange {
                    nearest_distance_km,
                });
            }
        }

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
        let (candidate, distance_km) = ranked.remove(0);

        let courier = self.couriers.bind(&candidate.id, &order.id).await?;
        match self
            .orders
            .perform_action(
                order.id.clone(),
                OrderAction::AssignCourier {
                    courier_id: courier.id.clone(),
                },
            )
            .await
        {
            Ok(_) => {
                info!(courier_id = %courier.id, distance_km, "Order assigned");
                Ok(AssignmentOutcome::Assigned {
                    courier,
                    distance_km,
                })
            }
            Err(e) => {
                // The order side refused the bind (e.g. a cancellation raced
                // in); free the courier again before surfacing the error.
                if let Err(release_err) = self.couriers.release(&courier.id, &order.id).await {
                    warn!(courier_id = %courier.id, error = %release_err, "Rollback release failed");
                }
                Err(OrderError::from_framework(e))
            }
        }
    }

    /// Frees `courier_id` if it is still bound to `order_id`; called whenever
    /// an order reaches a terminal state. A courier that vanished or was
    /// already rebound is a no-op.
    #[instrument(skip(self))]
    pub async fn unassign(&self, order_id: &str, courier_id: &str) -> Result<(), OrderError> {
        let _guard = self.lock.lock().await;

        match self.couriers.release(courier_id, order_id).await {
            Ok(courier) => {
                info!(available = courier.is_available, "Courier released");
                Ok(())
            }
            Err(CourierError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
