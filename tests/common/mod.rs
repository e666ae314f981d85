//! Shared fixtures for integration tests
//!
//! Builds fully populated requests and responses where every field carries a
//! distinguishable value, plus error types that are deliberately left out of
//! the default registry.

pub mod fixtures;
