//! Tests for the catalog service

#[cfg(test)]
mod service_tests;
