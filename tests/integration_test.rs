use courier_dispatch::assignment::AssignmentOutcome;
use courier_dispatch::clients::ActorClient;
use courier_dispatch::courier_actor::CourierError;
use courier_dispatch::lifecycle::DispatchSystem;
use courier_dispatch::model::{
    Coordinate, DeliveryType, OrderCreate, OrderState, PackageDetails, PackageSize,
};
use courier_dispatch::order_actor::OrderError;
use std::collections::HashSet;

fn order_params(pickup: Coordinate, delivery_type: DeliveryType) -> OrderCreate {
    OrderCreate {
        pickup_location: pickup,
        drop_location: Coordinate::new(19.0896, 72.8656),
        delivery_type,
        package: PackageDetails {
            weight_kg: 2.0,
            dimensions: PackageSize::Medium,
        },
    }
}

/// Pickup at Mumbai Central, right where seed courier COU_001 starts.
const CENTRAL: Coordinate = Coordinate {
    lat: 19.0760,
    lng: 72.8777,
};

#[tokio::test]
async fn full_dispatch_flow() {
    let system = DispatchSystem::new().await.expect("system boot");

    // The seeded fleet is fully available.
    let couriers = system.couriers.list().await.unwrap();
    assert_eq!(couriers.len(), 10);
    assert!(couriers.iter().all(|c| c.is_available));

    // Nearest courier wins: COU_001 sits exactly at the pickup.
    let placement = system
        .orders
        .create_order(order_params(CENTRAL, DeliveryType::Normal))
        .await
        .unwrap();
    assert_eq!(placement.order.state, OrderState::Assigned);
    assert_eq!(placement.order.courier_id.as_deref(), Some("COU_001"));
    match placement.assignment {
        AssignmentOutcome::Assigned {
            courier,
            distance_km,
        } => {
            assert_eq!(courier.id, "COU_001");
            assert_eq!(distance_km, 0.0);
        }
        other => panic!("expected assignment, got {other:?}"),
    }

    // Binding is mirrored on the courier.
    let courier = system.couriers.get_required("COU_001").await.unwrap();
    assert!(!courier.is_available);
    assert_eq!(courier.current_order_id.as_deref(), Some(placement.order.id.as_str()));

    // Next order from the same spot takes the next-nearest courier (Dadar).
    let second = system
        .orders
        .create_order(order_params(CENTRAL, DeliveryType::Normal))
        .await
        .unwrap();
    assert_eq!(second.order.courier_id.as_deref(), Some("COU_006"));

    let stats = system.stats().await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_couriers, 10);
    assert_eq!(stats.available_couriers, 8);
    assert_eq!(stats.orders_in_progress, 2);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn express_orders_are_range_limited() {
    let system = DispatchSystem::new().await.expect("system boot");

    // A pickup far outside the city: every courier is beyond 5 km.
    let remote = Coordinate::new(20.0, 73.5);
    let placement = system
        .orders
        .create_order(order_params(remote, DeliveryType::Express))
        .await
        .unwrap();

    match placement.assignment {
        AssignmentOutcome::NoCouriersInRange {
            nearest_distance_km,
        } => assert!(nearest_distance_km > 5.0),
        other => panic!("expected no couriers in range, got {other:?}"),
    }
    // The order is still valid, just unassigned.
    assert_eq!(placement.order.state, OrderState::Created);
    assert!(placement.order.courier_id.is_none());
    assert!(system.couriers.list_available().await.unwrap().len() == 10);

    // A NORMAL order from the same spot binds regardless of distance.
    let normal = system
        .orders
        .create_order(order_params(remote, DeliveryType::Normal))
        .await
        .unwrap();
    assert_eq!(normal.order.state, OrderState::Assigned);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn assignment_is_exclusive_under_concurrency() {
    let system = DispatchSystem::new().await.expect("system boot");

    // Ten concurrent orders, ten couriers: every order binds a distinct one.
    let mut handles = Vec::new();
    for _ in 0..10 {
        let orders = system.orders.clone();
        handles.push(tokio::spawn(async move {
            orders
                .create_order(order_params(CENTRAL, DeliveryType::Normal))
                .await
        }));
    }

    let mut bound = HashSet::new();
    for handle in handles {
        let placement = handle.await.unwrap().unwrap();
        match placement.assignment {
            AssignmentOutcome::Assigned { courier, .. } => {
                assert!(bound.insert(courier.id.clone()), "courier double-booked");
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }
    assert_eq!(bound.len(), 10);

    // The fleet is exhausted now.
    let eleventh = system
        .orders
        .create_order(order_params(CENTRAL, DeliveryType::Normal))
        .await
        .unwrap();
    assert!(matches!(
        eleventh.assignment,
        AssignmentOutcome::NoCouriersAvailable
    ));
    assert_eq!(eleventh.order.state, OrderState::Created);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn concurrent_express_orders_for_one_eligible_courier() {
    let system = DispatchSystem::new().await.expect("system boot");

    // Colaba: only COU_009 is within the 5 km EXPRESS range of this pickup.
    let colaba = Coordinate::new(18.9894, 72.8360);

    let first = {
        let orders = system.orders.clone();
        tokio::spawn(async move {
            orders
                .create_order(order_params(colaba, DeliveryType::Express))
                .await
        })
    };
    let second = {
        let orders = system.orders.clone();
        tokio::spawn(async move {
            orders
                .create_order(order_params(colaba, DeliveryType::Express))
                .await
        })
    };

    let outcomes = vec![
        first.await.unwrap().unwrap().assignment,
        second.await.unwrap().unwrap().assignment,
    ];

    let assigned: Vec<_> = outcomes
        .iter()
        .filter(|o| matches!(o, AssignmentOutcome::Assigned { .. }))
        .collect();
    let out_of_range: Vec<_> = outcomes
        .iter()
        .filter(|o| matches!(o, AssignmentOutcome::NoCouriersInRange { .. }))
        .collect();

    // Exactly one wins the courier; the other sees nobody in range.
    assert_eq!(assigned.len(), 1);
    assert_eq!(out_of_range.len(), 1);
    if let AssignmentOutcome::Assigned { courier, .. } = assigned[0] {
        assert_eq!(courier.id, "COU_009");
    }

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn cancelling_frees_the_courier() {
    let system = DispatchSystem::new().await.expect("system boot");

    let placement = system
        .orders
        .create_order(order_params(CENTRAL, DeliveryType::Normal))
        .await
        .unwrap();
    let order_id = placement.order.id.clone();
    let courier_id = placement.order.courier_id.clone().unwrap();

    let cancelled = system.orders.cancel(&order_id).await.unwrap();
    assert_eq!(cancelled.state, OrderState::Cancelled);
    assert!(cancelled.courier_id.is_none());

    let courier = system.couriers.get_required(&courier_id).await.unwrap();
    assert!(courier.is_available);
    assert!(courier.current_order_id.is_none());

    // Cancelling again reports the terminal state.
    let err = system.orders.cancel(&order_id).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::AlreadyTerminal {
            state: OrderState::Cancelled,
            ..
        }
    ));

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let system = DispatchSystem::new().await.expect("system boot");

    let err = system.orders.get_required("ORD_9999").await.unwrap_err();
    assert_eq!(err, OrderError::NotFound("ORD_9999".to_string()));

    let err = system.couriers.get_required("COU_099").await.unwrap_err();
    assert_eq!(err, CourierError::NotFound("COU_099".to_string()));

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn courier_location_updates_are_validated() {
    let system = DispatchSystem::new().await.expect("system boot");

    let moved = system
        .couriers
        .set_location("COU_002", Coordinate::new(19.10, 72.90))
        .await
        .unwrap();
    assert_eq!(moved.current_location, Coordinate::new(19.10, 72.90));

    let err = system
        .couriers
        .set_location("COU_002", Coordinate::new(f64::NAN, 72.90))
        .await
        .unwrap_err();
    assert_eq!(err, CourierError::InvalidLocation);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn order_validation_reports_every_violation() {
    let system = DispatchSystem::new().await.expect("system boot");

    let err = system
        .orders
        .create_order(OrderCreate {
            pickup_location: Coordinate::new(f64::NAN, 72.8777),
            drop_location: Coordinate::new(19.0896, 72.8656),
            delivery_type: DeliveryType::Express,
            package: PackageDetails {
                weight_kg: -2.0,
                dimensions: PackageSize::Large,
            },
        })
        .await
        .unwrap_err();

    match err {
        OrderError::Validation(violations) => {
            assert_eq!(violations.len(), 2);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Nothing was persisted.
    assert!(system.orders.list().await.unwrap().is_empty());

    system.shutdown().await.expect("clean shutdown");
}
