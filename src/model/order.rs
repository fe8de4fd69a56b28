//! The Order entity and its creation DTO.

use crate::model::geo::Coordinate;
use crate::model::state::OrderState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// EXPRESS orders are range-limited at assignment time; NORMAL orders are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    Express,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub weight_kg: f64,
    pub dimensions: PackageSize,
}

/// A delivery order.
///
/// A bound `courier_id` is present only while the order is in an active state
/// (`ASSIGNED`, `PICKED_UP`, `IN_TRANSIT`); terminal transitions clear it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub pickup_location: Coordinate,
    pub drop_location: Coordinate,
    pub delivery_type: DeliveryType,
    pub package: PackageDetails,
    pub state: OrderState,
    pub courier_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub pickup_location: Coordinate,
    pub drop_location: Coordinate,
    pub delivery_type: DeliveryType,
    pub package: PackageDetails,
}

impl OrderCreate {
    /// Collects every violated constraint rather than stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.pickup_location.is_finite() {
            errors.push("Invalid pickup location: lat and lng must be finite numbers".to_string());
        }
        if !self.drop_location.is_finite() {
            errors.push("Invalid drop location: lat and lng must be finite numbers".to_string());
        }
        if !(self.package.weight_kg > 0.0) {
            errors.push("Package weight must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Order {
    /// New orders start unassigned in `CREATED`.
    pub fn new(id: impl Into<String>, params: OrderCreate) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            pickup_location: params.pickup_location,
            drop_location: params.drop_location,
            delivery_type: params.delivery_type,
            package: params.package,
            state: OrderState::Created,
            courier_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_state(&mut self, new_state: OrderState) {
        self.state = new_state;
        self.updated_at = Utc::now();
    }

    /// Binds a courier and moves the order to `ASSIGNED` in one step.
    pub fn bind_courier(&mut self, courier_id: impl Into<String>) {
        self.courier_id = Some(courier_id.into());
        self.state = OrderState::Assigned;
        self.updated_at = Utc::now();
    }

    /// Drops the courier binding; used on terminal transitions.
    pub fn clear_courier(&mut self) {
        self.courier_id = None;
    }
}
