//! # Courier Dispatch
//!
//! An in-memory delivery dispatch core: orders and couriers, a
//! nearest-courier assignment engine, a strict delivery state machine, and a
//! background movement simulation that walks couriers toward their targets
//! and advances orders as they arrive.
//!
//! ## Architecture
//!
//! The system is built as a small set of actors on Tokio. Each entity type
//! (Order, Courier) is owned by one [`framework::ResourceActor`] that
//! processes messages sequentially: exclusive ownership inside the task
//! replaces locks on the stores, and every entity mutation is applied as a
//! single atomic message.
//!
//! The one cross-entity decision that needs more than per-entity atomicity
//! ("which free courier takes this order") is serialized by the
//! [`assignment::AssignmentEngine`]'s process-wide mutex, so two orders can
//! never claim the same idle courier.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` / `ResourceClient<T>` pair plus the
//! [`ActorEntity`](framework::ActorEntity) contract, and mocks for testing
//! client logic without actors.
//!
//! ### 2. The Rules ([`model`], [`progression`])
//! Pure data and pure decisions: coordinates and the distance metric, the
//! order state machine, entity types with their DTOs, and the progression
//! validator that gates automatic transitions on courier proximity.
//!
//! ### 3. The Implementation ([`order_actor`], [`courier_actor`])
//! Concrete [`ActorEntity`](framework::ActorEntity) implementations with
//! their action enums and per-actor error types.
//!
//! ### 4. The Interface ([`clients`], [`assignment`], [`simulation`])
//! Domain clients wrapping raw message passing. The
//! [`OrderClient`](clients::OrderClient) is the order lifecycle manager;
//! the [`Simulator`](simulation::Simulator) is the periodic movement task.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`DispatchSystem`](lifecycle::DispatchSystem) spins everything up, seeds
//! the fleet, and shuts the system down cleanly.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the test suite
//! cargo test
//! ```

pub mod assignment;
pub mod clients;
pub mod courier_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod progression;
pub mod simulation;
