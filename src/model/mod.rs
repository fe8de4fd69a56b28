//! Pure data structures and pure rules: coordinates and distances, the order
//! state machine, and the Order/Courier entities with their DTOs.

pub mod courier;
pub mod geo;
pub mod order;
pub mod state;

pub use courier::*;
pub use geo::*;
pub use order::*;
pub use state::*;
