//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! In unit tests we don't want to spin up a full [`ResourceActor`] if we are
//! only exercising *client* logic. [`MockClient`] speaks the same channel
//! protocol as a real actor but replays queued expectations, so client code
//! can be driven deterministically, including failure paths that are hard
//! to provoke through a live actor.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// An expected request together with the canned response to replay.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

/// A mock client with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Courier>::new();
/// mock.expect_list().return_ok(vec![courier]);
///
/// let client = CourierClient::new(mock.client());
/// // ... drive the client ...
/// mock.verify(); // Ensures all expectations were consumed
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<T>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task replays expectations in FIFO order.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectation lock poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { respond_to, .. },
                        Some(Expectation::Get { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder {
            mock: self,
            wrap: |response| Expectation::Get { response },
        }
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder {
            mock: self,
            wrap: |response| Expectation::List { response },
        }
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder {
            mock: self,
            wrap: |response| Expectation::Create { response },
        }
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder {
            mock: self,
            wrap: |response| Expectation::Update { response },
        }
    }

    pub fn expect_action(&mut self) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder {
            mock: self,
            wrap: |response| Expectation::Action { response },
        }
    }

    /// Verifies that all expectations were consumed.
    pub fn verify(&self) {
        let exps = self
            .expectations
            .lock()
            .expect("mock expectation lock poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .expect("mock expectation lock poisoned")
            .push_back(expectation);
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder binding a queued expectation to its canned response.
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    /// Queue a successful response.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    /// Queue an error response.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}
