//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! persistence logic.
//!
//! - [`config`] - Configuration loading, validation and logging setup

pub mod config;
