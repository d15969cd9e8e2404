//! Geometry, viewport math, engine-wide constants and configuration.

pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;
