//! Assignment engine behavior against hand-built fleets, without the seeded
//! system: deterministic tie-breaking and the unassign no-op guarantees.

use courier_dispatch::assignment::{AssignmentEngine, AssignmentOutcome};
use courier_dispatch::clients::CourierClient;
use courier_dispatch::model::{
    Coordinate, CourierCreate, DeliveryType, OrderCreate, PackageDetails, PackageSize,
};
use courier_dispatch::{courier_actor, order_actor};

struct Harness {
    couriers: CourierClient,
    orders: courier_dispatch::framework::ResourceClient<courier_dispatch::model::Order>,
    engine: AssignmentEngine,
}

fn spawn_harness() -> Harness {
    let (courier_actor, courier_resource) = courier_actor::new();
    let (order_actor, order_resource) = order_actor::new();
    tokio::spawn(courier_actor.run());
    tokio::spawn(order_actor.run());

    let couriers = CourierClient::new(courier_resource);
    let engine = AssignmentEngine::new(couriers.clone(), order_resource.clone());
    Harness {
        couriers,
        orders: order_resource,
        engine,
    }
}

async fn register(harness: &Harness, name: &str, lat: f64, lng: f64) -> String {
    harness
        .couriers
        .register(CourierCreate {
            name: name.to_string(),
            location: Coordinate::new(lat, lng),
        })
        .await
        .unwrap()
}

async fn place_order(
    harness: &Harness,
    pickup: Coordinate,
    delivery_type: DeliveryType,
) -> courier_dispatch::model::Order {
    let id = harness
        .orders
        .create(OrderCreate {
            pickup_location: pickup,
            drop_location: Coordinate::new(19.10, 72.90),
            delivery_type,
            package: PackageDetails {
                weight_kg: 1.0,
                dimensions: PackageSize::Small,
            },
        })
        .await
        .unwrap();
    harness.orders.get(id).await.unwrap().unwrap()
}

#[tokio::test]
async fn equidistant_couriers_tie_break_by_id() {
    let harness = spawn_harness();
    // Both couriers are exactly 27.75 km from the pickup.
    register(&harness, "South", 19.0, 72.0).await;
    register(&harness, "North", 19.5, 72.0).await;

    let order = place_order(&harness, Coordinate::new(19.25, 72.0), DeliveryType::Normal).await;
    let outcome = harness.engine.assign(&order).await.unwrap();

    match outcome {
        AssignmentOutcome::Assigned {
            courier,
            distance_km,
        } => {
            assert_eq!(courier.id, "COU_001");
            assert_eq!(distance_km, 27.75);
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_fleet_reports_no_couriers_available() {
    let harness = spawn_harness();
    let order = place_order(&harness, Coordinate::new(19.0, 72.0), DeliveryType::Normal).await;

    let outcome = harness.engine.assign(&order).await.unwrap();
    assert!(matches!(outcome, AssignmentOutcome::NoCouriersAvailable));
}

#[tokio::test]
async fn express_range_report_covers_all_available_couriers() {
    let harness = spawn_harness();
    // 6.94 km and 13.88 km away: both out of EXPRESS range.
    register(&harness, "Near", 19.0625, 72.0).await;
    register(&harness, "Far", 19.125, 72.0).await;

    let order = place_order(&harness, Coordinate::new(19.0, 72.0), DeliveryType::Express).await;
    let outcome = harness.engine.assign(&order).await.unwrap();

    match outcome {
        AssignmentOutcome::NoCouriersInRange {
            nearest_distance_km,
        } => {
            // The diagnostic is the minimum over every available courier.
            assert_eq!(nearest_distance_km, 6.94);
        }
        other => panic!("expected no couriers in range, got {other:?}"),
    }
    // Nobody was bound.
    assert!(harness
        .couriers
        .list_available()
        .await
        .unwrap()
        .iter()
        .all(|c| c.current_order_id.is_none()));
}

#[tokio::test]
async fn unassign_is_a_no_op_for_a_reassigned_courier() {
    let harness = spawn_harness();
    let courier_id = register(&harness, "Solo", 19.0, 72.0).await;

    let first = place_order(&harness, Coordinate::new(19.0, 72.0), DeliveryType::Normal).await;
    let outcome = harness.engine.assign(&first).await.unwrap();
    assert!(matches!(outcome, AssignmentOutcome::Assigned { .. }));

    // Free the courier, then bind it to a second order.
    harness.engine.unassign(&first.id, &courier_id).await.unwrap();
    let second = place_order(&harness, Coordinate::new(19.0, 72.0), DeliveryType::Normal).await;
    harness.engine.assign(&second).await.unwrap();

    // A late unassign for the first order must not free the courier now.
    harness.engine.unassign(&first.id, &courier_id).await.unwrap();
    let courier = harness.couriers.get_required(&courier_id).await.unwrap();
    assert!(!courier.is_available);
    assert_eq!(courier.current_order_id.as_deref(), Some(second.id.as_str()));

    // Unassigning a courier that no longer exists is also a no-op.
    harness.engine.unassign(&second.id, "COU_999").await.unwrap();
}
