//! Catalog service: the list of service categories orders are filed under.

mod service;

#[cfg(test)]
mod tests;

pub use service::CatalogService;
