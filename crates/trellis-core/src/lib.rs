//! Trellis Core
//!
//! This crate contains the shared foundation of the Trellis UI engine:
//! collections, math, colors, logging, profiling and configuration.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
