//! Domain layer
//!
//! Entities and port definitions. No framework or I/O code lives here.

pub mod entities;
pub mod ports;
