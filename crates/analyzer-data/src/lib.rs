//! Data layer for Chat Analyzer.
//!
//! Parses a chat export into message records and derives the workout-day and
//! weekly-weight tables from them.

pub mod analysis;
pub mod reader;
pub mod weights;
pub mod workouts;

pub use analyzer_core as core;
