//! Tests for the provider directory service
