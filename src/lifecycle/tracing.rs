//! # Observability & Tracing
//!
//! Structured logging for the whole system via the `tracing` crate.
//!
//! The compact format hides the crate/module prefix (`with_target(false)`);
//! actors log with an `entity_type` field instead, which keeps lines short
//! while staying filterable.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads and per-tick movement
//! ```
//!
//! With `RUST_LOG=info` a delivery looks like:
//!
//! ```text
//! INFO Created entity_type="Order" id="ORD_0001" size=1
//! INFO Order assigned courier_id="COU_001" distance_km=0.0
//! INFO Order progressed order_id="ORD_0001" state=PICKED_UP
//! INFO Order progressed order_id="ORD_0001" state=DELIVERED
//! INFO Courier released available=true
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
