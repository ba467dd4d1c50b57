//! Shared tuning constants for the flight trail engine.

pub mod flight;
pub mod path;
pub mod render_settings;
