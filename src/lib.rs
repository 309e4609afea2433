//! # inputmux - Action-State Aggregation for Raw Input
//!
//! Maps raw, possibly-concurrent device signals (key presses, pointer
//! button presses) from multiple independent sources onto a small set of
//! named logical actions, tracking for each action whether it is currently
//! asserted, by whom, and whether it is administratively enabled.
//!
//! ## Features
//!
//! - **OR across sources**: an action stays active while at least one
//!   source asserts it; within a single source an action bound to several
//!   codes releases only once every code is up
//! - **Edge-triggered notifications**: activation/deactivation events fire
//!   on state transitions only, never on redundant reports
//! - **Enable/disable gating**: per-action administrative gates plus
//!   controller-level enabled/focused gates
//! - **Focus-loss recovery**: losing focus (or disabling the controller)
//!   force-deactivates every action so nothing sticks across a blur
//! - **Pluggable sources**: any device class can participate by
//!   implementing the subscribe/observe/report contract
//!
//! ## Architecture
//!
//! The library is organized into focused modules:
//!
//! - [`error`] - Centralized error types and handling
//! - [`action`] - Action data model and the name → action registry
//! - [`plugin`] - Source capability contract and the two reference sources
//! - [`controller`] - Aggregation core, attachment manager, notifications
//! - [`runtime`] - Shared handle and command pump for threaded embeddings

// Core modules
pub mod action;
pub mod controller;
pub mod error;
pub mod plugin;

// Threaded/async embedding layer
pub mod runtime;

// Re-export commonly used types for convenience
pub use error::{InputMuxError, Result};

// Public API surface for external usage
pub use action::{Action, ActionDef, ActionRegistry, DeviceCode};
pub use controller::{ActionEvent, ChannelSink, EventSink, InputController, NullSink};
pub use plugin::{
    DeviceEvent, Edge, InputSource, KeyboardSource, PluginBinding, PointerSource, Report, TargetId,
};
pub use runtime::{pump_loop, spawn_pump, PumpCommand, SharedController};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
