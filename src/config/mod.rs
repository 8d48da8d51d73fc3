//! Configuration module for spendscope
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SpendscopePaths;
pub use settings::Settings;
