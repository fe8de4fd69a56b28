//! # Courier Client
//!
//! High-level API for the Courier actor: fleet queries, location updates,
//! movement steps, and the bind/release pair used by the assignment engine.

use crate::clients::actor_client::ActorClient;
use crate::courier_actor::{CourierAction, CourierActionResult, CourierError};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Coordinate, Courier, CourierCreate, CourierUpdate, MoveOutcome};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Courier actor.
#[derive(Clone)]
pub struct CourierClient {
    inner: ResourceClient<Courier>,
}

impl CourierClient {
    pub fn new(inner: ResourceClient<Courier>) -> Self {
        Self { inner }
    }

    /// Registers a courier and returns its generated id.
    #[instrument(skip(self))]
    pub async fn register(&self, params: CourierCreate) -> Result<String, CourierError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(CourierError::from_framework)
    }

    /// Fetches a courier, failing with `NotFound` if absent.
    pub async fn get_required(&self, courier_id: &str) -> Result<Courier, CourierError> {
        self.get(courier_id.to_string())
            .await?
            .ok_or_else(|| CourierError::NotFound(courier_id.to_string()))
    }

    /// All couriers currently free to take an order.
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<Courier>, CourierError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|courier| courier.is_available)
            .collect())
    }

    /// Overwrites a courier's position.
    #[instrument(skip(self))]
    pub async fn set_location(
        &self,
        courier_id: &str,
        location: Coordinate,
    ) -> Result<Courier, CourierError> {
        debug!("Sending request");
        self.inner
            .update(
                courier_id.to_string(),
                CourierUpdate {
                    location: Some(location),
                },
            )
            .await
            .map_err(CourierError::from_framework)
    }

    /// Advances a courier one movement step toward `target`.
    #[instrument(skip(self))]
    pub async fn move_towards(
        &self,
        courier_id: &str,
        target: Coordinate,
        step_size_km: f64,
    ) -> Result<(Courier, MoveOutcome), CourierError> {
        match self
            .inner
            .perform_action(
                courier_id.to_string(),
                CourierAction::MoveTowards {
                    target,
                    step_size_km,
                },
            )
            .await
            .map_err(CourierError::from_framework)?
        {
            CourierActionResult::Moved { courier, outcome } => Ok((courier, outcome)),
            other => Err(CourierError::ActorCommunication(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    /// Marks the courier busy with `order_id`.
    #[instrument(skip(self))]
    pub async fn bind(&self, courier_id: &str, order_id: &str) -> Result<Courier, CourierError> {
        match self
            .inner
            .perform_action(
                courier_id.to_string(),
                CourierAction::Bind {
                    order_id: order_id.to_string(),
                },
            )
            .await
            .map_err(CourierError::from_framework)?
        {
            CourierActionResult::Bound(courier) => Ok(courier),
            other => Err(CourierError::ActorCommunication(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    /// Frees the courier if it is still bound to `order_id`; no-op otherwise.
    #[instrument(skip(self))]
    pub async fn release(&self, courier_id: &str, order_id: &str) -> Result<Courier, CourierError> {
        match self
            .inner
            .perform_action(
                courier_id.to_string(),
                CourierAction::Release {
                    order_id: order_id.to_string(),
                },
            )
            .await
            .map_err(CourierError::from_framework)?
        {
            CourierActionResult::Released(courier) => Ok(courier),
            other => Err(CourierError::ActorCommunication(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ActorClient<Courier> for CourierClient {
    type Error = CourierError;

    fn inner(&self) -> &ResourceClient<Courier> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CourierError::from_framework(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    fn courier(id: &str, available: bool) -> Courier {
        let mut courier = Courier::new(
            id,
            CourierCreate {
                name: "Test".to_string(),
                location: Coordinate::new(19.0, 72.8),
            },
        );
        if !available {
            courier.mark_busy("ORD_0001");
        }
        courier
    }

    #[tokio::test]
    async fn list_available_filters_busy_couriers() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_list().return_ok(vec![
            courier("COU_001", true),
            courier("COU_002", false),
            courier("COU_003", true),
        ]);

        let client = CourierClient::new(mock.client());
        let available = client.list_available().await.unwrap();
        let ids: Vec<&str> = available.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["COU_001", "COU_003"]);
        mock.verify();
    }

    #[tokio::test]
    async fn get_required_maps_missing_courier_to_not_found() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_get().return_ok(None);

        let client = CourierClient::new(mock.client());
        let err = client.get_required("COU_099").await.unwrap_err();
        assert_eq!(err, CourierError::NotFound("COU_099".to_string()));
        mock.verify();
    }
}
