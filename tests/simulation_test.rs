//! Simulator control surface and timer behavior.

use courier_dispatch::lifecycle::DispatchSystem;
use courier_dispatch::model::{
    Coordinate, DeliveryType, OrderCreate, OrderState, PackageDetails, PackageSize,
};
use courier_dispatch::simulation::SimulationError;
use std::time::Duration;

fn order_params(pickup: Coordinate, drop: Coordinate) -> OrderCreate {
    OrderCreate {
        pickup_location: pickup,
        drop_location: drop,
        delivery_type: DeliveryType::Normal,
        package: PackageDetails {
            weight_kg: 3.0,
            dimensions: PackageSize::Large,
        },
    }
}

/// COU_001's seed position.
const CENTRAL: Coordinate = Coordinate {
    lat: 19.0760,
    lng: 72.8777,
};

#[tokio::test]
async fn start_stop_misuse_is_rejected() {
    let system = DispatchSystem::new().await.expect("system boot");
    let simulator = &system.simulator;

    let status = simulator.start().await.unwrap();
    assert!(status.running);
    assert_eq!(status.interval_ms, 2000);
    assert_eq!(status.step_size_km, 0.005);

    // Starting twice without stopping fails the second call.
    assert!(matches!(
        simulator.start().await.unwrap_err(),
        SimulationError::AlreadyRunning
    ));

    simulator.stop().await.unwrap();
    assert!(matches!(
        simulator.stop().await.unwrap_err(),
        SimulationError::NotRunning
    ));

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn configuration_is_range_checked() {
    let system = DispatchSystem::new().await.expect("system boot");
    let simulator = &system.simulator;

    assert!(matches!(
        simulator.set_interval(999).await.unwrap_err(),
        SimulationError::InvalidInterval(999)
    ));
    assert!(matches!(
        simulator.set_interval(30001).await.unwrap_err(),
        SimulationError::InvalidInterval(30001)
    ));
    assert!(matches!(
        simulator.set_step_size(0.0001).await.unwrap_err(),
        SimulationError::InvalidStepSize(_)
    ));
    assert!(matches!(
        simulator.set_step_size(0.5).await.unwrap_err(),
        SimulationError::InvalidStepSize(_)
    ));

    let status = simulator.set_interval(1000).await.unwrap();
    assert_eq!(status.interval_ms, 1000);
    let status = simulator.set_step_size(0.1).await.unwrap();
    assert_eq!(status.step_size_km, 0.1);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn status_counts_active_orders() {
    let system = DispatchSystem::new().await.expect("system boot");

    // Two assigned orders and one unassignable EXPRESS order.
    for _ in 0..2 {
        system
            .orders
            .create_order(order_params(CENTRAL, Coordinate::new(19.08, 72.87)))
            .await
            .unwrap();
    }
    system
        .orders
        .create_order(OrderCreate {
            delivery_type: DeliveryType::Express,
            ..order_params(Coordinate::new(25.0, 80.0), Coordinate::new(25.1, 80.1))
        })
        .await
        .unwrap();

    let status = system.simulator.status().await.unwrap();
    assert!(!status.running);
    assert_eq!(status.active_order_count, 2);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn force_progress_walks_an_order_to_delivery() {
    let system = DispatchSystem::new().await.expect("system boot");

    // Pickup on top of COU_001; drop across town.
    let placement = system
        .orders
        .create_order(order_params(CENTRAL, Coordinate::new(19.0896, 72.8656)))
        .await
        .unwrap();
    let order_id = placement.order.id.clone();

    // Courier already at pickup: first call picks up, second enters transit.
    let report = system.simulator.force_progress(&order_id).await.unwrap();
    assert_eq!(report.order.state, OrderState::PickedUp);
    let report = system.simulator.force_progress(&order_id).await.unwrap();
    assert_eq!(report.order.state, OrderState::InTransit);

    // The widened step covers the 2.85 km to the drop in one move...
    let report = system.simulator.force_progress(&order_id).await.unwrap();
    assert_eq!(report.order.state, OrderState::InTransit);
    assert_eq!(
        report.courier.current_location,
        Coordinate::new(19.0896, 72.8656)
    );

    // ...and the next call completes the delivery.
    let report = system.simulator.force_progress(&order_id).await.unwrap();
    assert_eq!(report.order.state, OrderState::Delivered);

    // The configured step size was never touched.
    let status = system.simulator.status().await.unwrap();
    assert_eq!(status.step_size_km, 0.005);

    // Terminal orders cannot be forced further.
    let err = system.simulator.force_progress(&order_id).await.unwrap_err();
    assert!(matches!(err, SimulationError::Order(_)));

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn timer_ticks_advance_active_orders() {
    let system = DispatchSystem::new().await.expect("system boot");

    // Pickup at the courier, drop a hair away: three ticks end to end
    // (snap -> PICKED_UP, hand-off -> IN_TRANSIT, snap -> DELIVERED).
    let drop = Coordinate::new(19.07602, 72.8777);
    let placement = system
        .orders
        .create_order(order_params(CENTRAL, drop))
        .await
        .unwrap();
    let order_id = placement.order.id.clone();
    let courier_id = placement.order.courier_id.clone().unwrap();

    system.simulator.set_interval(1000).await.unwrap();
    system.simulator.start().await.unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let order = system.orders.get_required(&order_id).await.unwrap();
    assert_eq!(order.state, OrderState::Delivered);

    let courier = system.couriers.get_required(&courier_id).await.unwrap();
    assert!(courier.is_available);
    assert_eq!(courier.current_location, drop);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn stopping_prevents_further_ticks() {
    let system = DispatchSystem::new().await.expect("system boot");

    system.simulator.set_interval(1000).await.unwrap();
    system.simulator.start().await.unwrap();
    system.simulator.stop().await.unwrap();

    let placement = system
        .orders
        .create_order(order_params(CENTRAL, Coordinate::new(19.0896, 72.8656)))
        .await
        .unwrap();
    let order_id = placement.order.id.clone();

    tokio::time::sleep(Duration::from_secs(5)).await;

    // No tick ran: the order did not move past ASSIGNED and the courier has
    // not budged.
    let order = system.orders.get_required(&order_id).await.unwrap();
    assert_eq!(order.state, OrderState::Assigned);
    let courier = system.couriers.get_required("COU_001").await.unwrap();
    assert_eq!(courier.current_location, CENTRAL);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn reconfiguring_the_interval_restarts_the_timer() {
    let system = DispatchSystem::new().await.expect("system boot");

    system.simulator.start().await.unwrap();
    let status = system.simulator.set_interval(1000).await.unwrap();
    assert!(status.running);
    assert_eq!(status.interval_ms, 1000);

    // The restarted loop ticks on the new cadence.
    let placement = system
        .orders
        .create_order(order_params(CENTRAL, Coordinate::new(19.0896, 72.8656)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    // One tick has run: ASSIGNED with the courier already at the pickup
    // snaps straight to PICKED_UP.
    let order = system
        .orders
        .get_required(&placement.order.id)
        .await
        .unwrap();
    assert_eq!(order.state, OrderState::PickedUp);

    system.shutdown().await.expect("clean shutdown");
}
