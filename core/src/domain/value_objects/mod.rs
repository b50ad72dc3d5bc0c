//! Value objects representing immutable domain concepts.

pub mod actor;
pub mod order_details;
pub mod review;

// Re-export commonly used types
pub use actor::Actor;
pub use order_details::{OfferView, OrderDetails};
pub use review::{ReviewAction, ReviewOutcome};
