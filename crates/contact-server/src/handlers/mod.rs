//! HTTP handlers

pub mod contacts;
pub mod health;
pub mod stats;

pub use health::health;
