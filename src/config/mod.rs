//! Configuration module for payperiod
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PayPaths;
pub use settings::Settings;
