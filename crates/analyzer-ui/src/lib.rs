//! Terminal UI layer for Chat Analyzer.
//!
//! Provides themes, the page header, per-user workout and weight charts, and
//! the event loop that pages through them, built on [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use analyzer_core as core;
