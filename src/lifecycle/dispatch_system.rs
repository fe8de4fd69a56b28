use crate::assignment::AssignmentEngine;
use crate::clients::{ActorClient, CourierClient, OrderClient};
use crate::courier_actor::{self, CourierError};
use crate::model::{Coordinate, CourierCreate};
use crate::order_actor::{self, OrderError};
use crate::simulation::{SimulationError, Simulator};
use tracing::{error, info};

/// The ten-courier fleet registered at process start.
const SEED_COURIERS: [(&str, f64, f64); 10] = [
    ("Aswin Kumar", 19.0760, 72.8777),  // Mumbai Central
    ("Anil Kumar", 19.0896, 72.8656),   // Bandra
    ("Santhi Anil", 19.1136, 72.8697),  // Andheri
    ("Tejas Nair", 19.0330, 72.8569),   // Worli
    ("John Doe", 19.0176, 72.8561),     // Lower Parel
    ("Mike Tyson", 19.0728, 72.8826),   // Dadar
    ("Arjun Reddy", 19.1197, 72.9046),  // Powai
    ("Kavita Joshi", 19.0522, 72.8820), // Parel
    ("Rohit Nair", 18.9894, 72.8360),   // Colaba
    ("Anjali Verma", 19.0544, 72.8320), // Breach Candy
];

/// Counts reported by [`DispatchSystem::stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub total_orders: usize,
    pub total_couriers: usize,
    pub available_couriers: usize,
    pub orders_in_progress: usize,
}

/// The main runtime orchestrator for the dispatch system.
///
/// `DispatchSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the actors and simulator
/// - **Dependency Wiring**: connecting the order client to the courier client
///   and the assignment engine
/// - **Fleet Seeding**: registering the initial couriers
///
/// # Example
///
/// ```ignore
/// let system = DispatchSystem::new().await?;
///
/// let placement = system.orders.create_order(params).await?;
/// system.simulator.start().await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct DispatchSystem {
    /// Client for the order lifecycle (create, transition, cancel, progress).
    pub orders: OrderClient,

    /// Client for fleet queries and courier movement.
    pub couriers: CourierClient,

    /// Handle for the movement simulation.
    pub simulator: Simulator,

    /// Task handles for the running actors (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DispatchSystem {
    /// Boots the actors, wires the clients, and seeds the courier fleet.
    pub async fn new() -> Result<Self, CourierError> {
        // 1. Create actors and their generic clients.
        let (courier_actor, courier_resource) = courier_actor::new();
        let (order_actor, order_resource) = order_actor::new();

        // 2. Spawn each actor in its own task.
        let handles = vec![
            tokio::spawn(courier_actor.run()),
            tokio::spawn(order_actor.run()),
        ];

        // 3. Wire the domain clients together.
        let couriers = CourierClient::new(courier_resource);
        let assignment = AssignmentEngine::new(couriers.clone(), order_resource.clone());
        let orders = OrderClient::new(order_resource, couriers.clone(), assignment);
        let simulator = Simulator::new(orders.clone(), couriers.clone());

        // 4. Register the initial fleet.
        for (name, lat, lng) in SEED_COURIERS {
            couriers
                .register(CourierCreate {
                    name: name.to_string(),
                    location: Coordinate::new(lat, lng),
                })
                .await?;
        }
        info!(couriers = SEED_COURIERS.len(), "Fleet initialized");

        Ok(Self {
            orders,
            couriers,
            simulator,
            handles,
        })
    }

    /// Store-level counters for dashboards and smoke checks.
    pub async fn stats(&self) -> Result<StoreStats, OrderError> {
        let orders = self.orders.list().await?;
        let couriers = self.couriers.list().await?;

        Ok(StoreStats {
            total_orders: orders.len(),
            total_couriers: couriers.len(),
            available_couriers: couriers.iter().filter(|c| c.is_available).count(),
            orders_in_progress: orders.iter().filter(|o| !o.state.is_terminal()).count(),
        })
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Stops the simulator first (an in-flight tick completes), then drops
    /// every client so the actors' channels close, and finally awaits the
    /// actor tasks.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        match self.simulator.stop().await {
            Ok(()) | Err(SimulationError::NotRunning) => {}
            Err(e) => return Err(format!("Failed to stop simulator: {e}")),
        }

        // Dropping the clients closes the actors' channel senders; each
        // actor drains its queue and exits its loop.
        drop(self.simulator);
        drop(self.orders);
        drop(self.couriers);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e:?}");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
