//! Visage Test Harness - playback simulation and validation
//!
//! This crate provides:
//! - Scripted clocks and recording sinks for deterministic scheduler tests
//! - Canned viseme-track scenarios
//! - A playback simulator with seeded frame jitter
//! - Benchmarks for the hot per-frame path

pub mod harness;
mod integration;
pub mod playback;

pub use harness::*;
pub use playback::*;
