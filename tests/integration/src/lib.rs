//! Integration test utilities for the raid planner
//!
//! This crate provides helpers for driving the roster services end to end
//! against an in-process store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
