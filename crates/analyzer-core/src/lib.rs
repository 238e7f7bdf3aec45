//! Shared building blocks for Chat Analyzer.
//!
//! Holds the error taxonomy, command-line settings and persisted last-used
//! configuration, the compiled chat patterns, record models, ISO-week helpers
//! and plain-text formatting used by the data and UI layers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod patterns;
pub mod settings;
pub mod time_utils;
