//! Order-specific resource logic and entity implementation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::NoUpdate;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Order actor and its generic client.
///
/// Order ids follow the `ORD_0001` format.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    let counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("ORD_{id:04}")
    };

    ResourceActor::new(32, next_order_id)
}
