//! Error types and handling infrastructure for inputmux.
//!
//! This module provides a centralized error handling system using `thiserror`
//! for custom error types and a standardized `Result` alias across all
//! modules.
//!
//! No condition in this crate is fatal: administrative calls report
//! recoverable conditions through these variants, and read paths
//! (`is_action_active` and friends) stay non-throwing.

use thiserror::Error;

/// The main error type for inputmux operations.
///
/// Covers the error conditions that can occur while administering actions
/// and registering input sources.
#[derive(Error, Debug)]
pub enum InputMuxError {
    /// An administrative call referenced an action name that was never bound.
    #[error("Unknown action: {name}")]
    UnknownAction { name: String },

    /// A source with the same name is already registered on the controller.
    #[error("Plugin already registered: {name}")]
    PluginAlreadyRegistered { name: String },

    /// Generic error for cases not covered by specific variants.
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for inputmux operations.
pub type Result<T> = std::result::Result<T, InputMuxError>;

impl InputMuxError {
    /// Create an UnknownAction error for the given action name
    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction { name: name.into() }
    }

    /// Create a PluginAlreadyRegistered error for the given plugin name
    pub fn plugin_already_registered(name: impl Into<String>) -> Self {
        Self::PluginAlreadyRegistered { name: name.into() }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
