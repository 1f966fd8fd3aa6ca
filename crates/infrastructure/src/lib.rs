//! Contract Harness Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest implementation of the application's
//! HTTP port, settings loading and report rendering.

pub mod adapters;
pub mod config;
pub mod report;

pub use adapters::ReqwestHttpClient;
pub use crate::config::{ConfigError, ConfigResult, load_settings};
pub use report::{ReportError, render_json, render_text};
