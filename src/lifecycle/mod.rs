//! # System Lifecycle & Orchestration
//!
//! Individual actors are simple; wiring them together is where complexity
//! lives. This module is the conductor: it creates the actors, injects their
//! dependencies, seeds the courier fleet, and coordinates graceful shutdown
//! (drop clients → channels close → actors drain and exit → await tasks).

pub mod dispatch_system;
pub mod tracing;

pub use dispatch_system::*;
pub use tracing::*;
