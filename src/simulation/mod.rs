//! # Movement Simulator
//!
//! A recurring timer task that advances every active order's courier toward
//! its current target (pickup while `ASSIGNED`, drop while `IN_TRANSIT`) and
//! requests the automatic transition once the courier arrives.
//!
//! ## Timing model
//!
//! The loop is a cancellable periodic task: a `tokio::time::interval` raced
//! against a `watch` shutdown channel. A tick body always runs to completion
//! before the next `select`, so ticks never overlap (`MissedTickBehavior::
//! Skip` drops any tick that would have fired mid-pass), stopping prevents
//! further ticks from starting, and an in-flight tick finishes cleanly.
//! Reconfiguring the interval stops the task and starts a fresh one rather
//! than mutating the period in place, accepting a brief gap over drift.

pub mod error;

pub use error::SimulationError;

use crate::clients::courier_client::CourierClient;
use crate::clients::order_client::{OrderClient, ProgressReport};
use crate::clients::ActorClient;
use crate::courier_actor::CourierError;
use crate::model::{Order, OrderState};
use crate::order_actor::OrderError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

const MIN_INTERVAL_MS: u64 = 1000;
const MAX_INTERVAL_MS: u64 = 30000;
const DEFAULT_INTERVAL_MS: u64 = 2000;

const MIN_STEP_KM: f64 = 0.001;
const MAX_STEP_KM: f64 = 0.1;
const DEFAULT_STEP_KM: f64 = 0.005;

/// Step handed to force-progress: far beyond any real courier distance, so
/// a single movement step always arrives.
const FORCE_PROGRESS_STEP_KM: f64 = 1_000_000.0;

/// Snapshot of the simulator's control state.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorStatus {
    pub running: bool,
    pub interval_ms: u64,
    pub step_size_km: f64,
    pub active_order_count: usize,
}

struct RunningLoop {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

struct SimulatorState {
    interval_ms: u64,
    step_size_km: f64,
    runtime: Option<RunningLoop>,
}

/// Handle for controlling the movement simulation. Cheap to clone; all
/// clones share one control state and at most one loop runs at a time.
#[derive(Clone)]
pub struct Simulator {
    orders: OrderClient,
    couriers: CourierClient,
    state: Arc<Mutex<SimulatorState>>,
}

impl Simulator {
    pub fn new(orders: OrderClient, couriers: CourierClient) -> Self {
        Self {
            orders,
            couriers,
            state: Arc::new(Mutex::new(SimulatorState {
                interval_ms: DEFAULT_INTERVAL_MS,
                step_size_km: DEFAULT_STEP_KM,
                runtime: None,
            })),
        }
    }

    /// Starts the periodic movement task.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<SimulatorStatus, SimulationError> {
        {
            let mut state = self.state.lock().await;
            if state.runtime.is_some() {
                return Err(SimulationError::AlreadyRunning);
            }

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let handle = tokio::spawn(run_loop(
                self.orders.clone(),
                self.couriers.clone(),
                self.state.clone(),
                Duration::from_millis(state.interval_ms),
                shutdown_rx,
            ));
            state.runtime = Some(RunningLoop {
                shutdown: shutdown_tx,
                handle,
            });
            info!(interval_ms = state.interval_ms, "Movement simulation started");
        }
        self.status().await
    }

    /// Stops the periodic task. Any tick already in flight completes before
    /// this returns; no further ticks start.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), SimulationError> {
        let runtime = {
            let mut state = self.state.lock().await;
            state.runtime.take().ok_or(SimulationError::NotRunning)?
        };
        // Signal outside the lock: the loop needs the state lock to finish
        // its current tick.
        let _ = runtime.shutdown.send(true);
        if runtime.handle.await.is_err() {
            warn!("Simulation task ended abnormally");
        }
        info!("Movement simulation stopped");
        Ok(())
    }

    pub async fn status(&self) -> Result<SimulatorStatus, SimulationError> {
        let (running, interval_ms, step_size_km) = {
            let state = self.state.lock().await;
            (
                state.runtime.is_some(),
                state.interval_ms,
                state.step_size_km,
            )
        };
        let active_order_count = self
            .orders
            .list()
            .await
            .map_err(SimulationError::Order)?
            .iter()
            .filter(|order| is_active(order))
            .count();
        Ok(SimulatorStatus {
            running,
            interval_ms,
            step_size_km,
            active_order_count,
        })
    }

    /// Changes the tick period. If the simulator is running it is stopped and
    /// restarted with the new period.
    #[instrument(skip(self))]
    pub async fn set_interval(&self, interval_ms: u64) -> Result<SimulatorStatus, SimulationError> {
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
            return Err(SimulationError::InvalidInterval(interval_ms));
        }

        let was_running = {
            let mut state = self.state.lock().await;
            state.interval_ms = interval_ms;
            state.runtime.is_some()
        };

        if was_running {
            self.stop().await?;
            self.start().await?;
        }

        info!(interval_ms, "Simulation interval updated");
        self.status().await
    }

    /// Changes the per-tick movement increment; takes effect from the next
    /// tick without restarting the loop.
    #[instrument(skip(self))]
    pub async fn set_step_size(&self, step_size_km: f64) -> Result<SimulatorStatus, SimulationError> {
        if !(MIN_STEP_KM..=MAX_STEP_KM).contains(&step_size_km) {
            return Err(SimulationError::InvalidStepSize(step_size_km));
        }
        {
            let mut state = self.state.lock().await;
            state.step_size_km = step_size_km;
        }
        info!(step_size_km, "Simulation step size updated");
        self.status().await
    }

    /// Performs one progression step with an effectively unbounded movement
    /// increment, guaranteeing arrival in a single call. The configured step
    /// size is untouched, so deterministic test scenarios don't have to wait
    /// on the timer.
    #[instrument(skip(self))]
    pub async fn force_progress(&self, order_id: &str) -> Result<ProgressReport, SimulationError> {
        Ok(self
            .orders
            .progress_with_step(order_id, FORCE_PROGRESS_STEP_KM)
            .await?)
    }
}

fn is_active(order: &Order) -> bool {
    order.state.is_active() && order.courier_id.is_some()
}

async fn run_loop(
    orders: OrderClient,
    couriers: CourierClient,
    state: Arc<Mutex<SimulatorState>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // An interval yields immediately once; consume it so the first pass
    // happens a full period after start, as callers expect of a timer.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                let step_size_km = { state.lock().await.step_size_km };
                run_tick(&orders, &couriers, step_size_km).await;
            }
        }
    }
}

/// One full pass over the active orders. Each order gets a complete
/// move-then-maybe-transition sequence before the next order is touched;
/// per-order failures are logged and skipped so one bad order cannot stall
/// the fleet.
async fn run_tick(orders: &OrderClient, couriers: &CourierClient, step_size_km: f64) {
    let all = match orders.list().await {
        Ok(all) => all,
        Err(e) => {
            error!(error = %e, "Failed to enumerate orders for simulation tick");
            return;
        }
    };

    for order in all.into_iter().filter(is_active) {
        if let Err(e) = advance_order(orders, couriers, &order, step_size_km).await {
            error!(order_id = %order.id, error = %e, "Simulation step failed");
        }
    }
}

async fn advance_order(
    orders: &OrderClient,
    couriers: &CourierClient,
    order: &Order,
    step_size_km: f64,
) -> Result<(), OrderError> {
    let Some(courier_id) = order.courier_id.as_deref() else {
        return Ok(());
    };

    let (target, next_state) = match order.state {
        OrderState::Assigned => (order.pickup_location, OrderState::PickedUp),
        OrderState::PickedUp => {
            // Instantaneous hand-off; no movement this tick.
            orders
                .transition(&order.id, OrderState::InTransit, false)
                .await?;
            debug!(order_id = %order.id, "Order picked up, now in transit");
            return Ok(());
        }
        OrderState::InTransit => (order.drop_location, OrderState::Delivered),
        // A racing manual call already moved the order on; skip.
        _ => return Ok(()),
    };

    let (courier, outcome) = match couriers.move_towards(courier_id, target, step_size_km).await {
        Ok(moved) => moved,
        Err(CourierError::NotFound(_)) => {
            warn!(order_id = %order.id, courier_id, "Courier not found for active order");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if outcome.reached {
        orders.transition(&order.id, next_state, false).await?;
        info!(order_id = %order.id, state = %next_state, "Order progressed");
    } else {
        debug!(
            courier_id = %courier.id,
            lat = outcome.location.lat,
            lng = outcome.location.lng,
            "Courier moving"
        );
    }
    Ok(())
}
