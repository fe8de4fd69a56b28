//! Demo binary: boots the dispatch system, places an order, lets the
//! simulator carry it for a few ticks, then force-progresses it to delivery
//! and shuts down cleanly.

use courier_dispatch::assignment::AssignmentOutcome;
use courier_dispatch::lifecycle::{setup_tracing, DispatchSystem};
use courier_dispatch::model::{
    Coordinate, DeliveryType, OrderCreate, OrderState, PackageDetails, PackageSize,
};
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting courier dispatch system");
    let system = DispatchSystem::new().await.map_err(|e| e.to_string())?;

    // A NORMAL order from Mumbai Central to Bandra.
    let placement = system
        .orders
        .create_order(OrderCreate {
            pickup_location: Coordinate::new(19.0760, 72.8777),
            drop_location: Coordinate::new(19.0896, 72.8656),
            delivery_type: DeliveryType::Normal,
            package: PackageDetails {
                weight_kg: 2.5,
                dimensions: PackageSize::Small,
            },
        })
        .await
        .map_err(|e| e.to_string())?;

    match &placement.assignment {
        AssignmentOutcome::Assigned {
            courier,
            distance_km,
        } => info!(
            order_id = %placement.order.id,
            courier = %courier.name,
            distance_km,
            "Order assigned"
        ),
        other => warn!(?other, "Order placed without a courier"),
    }

    // Let the background simulation move the courier for a few ticks.
    system.simulator.start().await.map_err(|e| e.to_string())?;
    tokio::time::sleep(Duration::from_secs(5)).await;

    let status = system.simulator.status().await.map_err(|e| e.to_string())?;
    info!(
        active_orders = status.active_order_count,
        step_size_km = status.step_size_km,
        "Simulation running"
    );

    // Finish the delivery deterministically instead of waiting out the walk.
    loop {
        let report = system
            .simulator
            .force_progress(&placement.order.id)
            .await
            .map_err(|e| e.to_string())?;
        info!(state = %report.order.state, "{}", report.message);
        if report.order.state == OrderState::Delivered {
            break;
        }
    }

    let stats = system.stats().await.map_err(|e| e.to_string())?;
    info!(
        total_orders = stats.total_orders,
        available_couriers = stats.available_couriers,
        "Final stats"
    );

    system.shutdown().await?;
    info!("Done");
    Ok(())
}
