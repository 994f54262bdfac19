//! Weatherdash Library
//!
//! Exposes the dashboard controller, providers, fetcher and CLI for use by the
//! terminal binary and integration tests.

pub mod cli;
pub mod dashboard;
pub mod data;
pub mod fetch;
pub mod logging;
