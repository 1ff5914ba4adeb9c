//! Configuration module for Quokka
//!
//! This module provides configuration management including:
//! - Platform-specific path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::QuokkaPaths;
pub use settings::Settings;
