//! Test utilities
//!
//! Manual mock implementations and fixtures for unit testing. Manual mocks
//! are used instead of a mocking crate: the port traits take `&str`
//! parameters that interact badly with macro-generated lifetimes, and the
//! in-memory versions double as behavioral references for the adapters.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
