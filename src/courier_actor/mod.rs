//! Courier-specific resource logic and entity implementation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Courier;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Courier actor and its generic client.
///
/// Courier ids follow the fleet's `COU_001` format.
pub fn new() -> (ResourceActor<Courier>, ResourceClient<Courier>) {
    let counter = Arc::new(AtomicU64::new(1));
    let next_courier_id = move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("COU_{id:03}")
    };

    ResourceActor::new(32, next_courier_id)
}
