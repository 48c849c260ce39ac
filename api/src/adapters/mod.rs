//! Adapters: concrete implementations of the domain ports

pub mod mail;
pub mod postgres;
pub mod storage;
