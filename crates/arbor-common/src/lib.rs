//! Common utilities for the Arbor crates.
//!
//! This crate provides shared infrastructure used by the node model and the
//! markup pipeline:
//! - **Warning System** - colored terminal output for tolerated malformations

pub mod warning;
