//! Tests for the order service

#[cfg(test)]
pub(crate) mod mocks;
