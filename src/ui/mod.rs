//! UI rendering module for Weatherdash
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod dashboard_view;
pub mod help_overlay;

pub use dashboard_view::render as render_dashboard;
pub use help_overlay::render as render_help_overlay;
