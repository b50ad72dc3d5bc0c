//! Tests for the offer book service

#[cfg(test)]
mod service_tests;
