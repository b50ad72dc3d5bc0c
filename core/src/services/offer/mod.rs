//! Offer book service: provider bids and declines on orders.

mod service;

#[cfg(test)]
mod tests;

pub use service::OfferService;
