//! Dockband Core
//!
//! This crate contains the shared utilities of the dockband layout engine:
//! allocation helpers, geometry primitives, logging, profiling and configuration.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;
