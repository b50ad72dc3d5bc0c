//! Domain entities representing core business objects.

pub mod offer;
pub mod order;
pub mod provider;
pub mod service_category;
pub mod user;


// Re-export commonly used types
pub use offer::{Offer, OrderDecline};
pub use order::{NewOrder, Order, OrderMedia, OrderState, DEFAULT_CURRENCY};
pub use provider::{NewProvider, Provider};
pub use service_category::ServiceCategory;
pub use user::User;
