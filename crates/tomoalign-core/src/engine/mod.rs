//! # Engine Module
//!
//! Configuration and progress plumbing shared by the batch workflows.
//!
//! - **Configuration** ([`config`]) - Validated projection and transformation
//!   settings, assembled through builders
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting

pub mod config;
pub mod progress;
