//! Plugin protocol.
//!
//! The capability contract every input source implements, plus the raw
//! device signals and the report message sources use to talk to the
//! aggregation core. Sources never write action state directly: they are
//! handed a read-only registry view and communicate through [`Report`]
//! values alone.

pub mod keyboard;
pub mod pointer;
pub mod tracker;

pub use keyboard::KeyboardSource;
pub use pointer::PointerSource;
pub use tracker::PressTracker;

use crate::action::{ActionRegistry, DeviceCode};

/// Opaque handle for the controller's attachment target.
pub type TargetId = u64;

/// Press/release edge of a raw device signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Down,
    Up,
}

/// Raw device signal fed through the controller's dispatch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Key { code: DeviceCode, edge: Edge },
    Pointer { button: DeviceCode, edge: Edge },
}

impl DeviceEvent {
    pub fn key_down(code: DeviceCode) -> Self {
        Self::Key {
            code,
            edge: Edge::Down,
        }
    }

    pub fn key_up(code: DeviceCode) -> Self {
        Self::Key {
            code,
            edge: Edge::Up,
        }
    }

    pub fn pointer_down(button: DeviceCode) -> Self {
        Self::Pointer {
            button,
            edge: Edge::Down,
        }
    }

    pub fn pointer_up(button: DeviceCode) -> Self {
        Self::Pointer {
            button,
            edge: Edge::Up,
        }
    }
}

/// State-change report from a source to the aggregation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Name of the affected action.
    pub action: String,
    /// Name of the reporting source; keys the action's asserting set.
    pub source: String,
    /// Whether the source now asserts the action.
    pub asserted: bool,
}

impl Report {
    pub fn new(action: impl Into<String>, source: impl Into<String>, asserted: bool) -> Self {
        Self {
            action: action.into(),
            source: source.into(),
            asserted,
        }
    }
}

/// Capability contract for a pluggable input source.
pub trait InputSource: Send {
    /// Stable identifier used as the key in an action's asserting set.
    fn name(&self) -> &str;

    /// Snapshot the trigger-code view of `actions` and begin observing
    /// device events on `target`.
    fn subscribe(&mut self, target: TargetId, actions: &ActionRegistry);

    /// Stop observing the target. Must not touch action state.
    fn unsubscribe(&mut self);

    /// Inspect one raw event, pushing a report for every assertion change.
    /// Called by the controller only while subscribed.
    fn observe(
        &mut self,
        event: &DeviceEvent,
        actions: &ActionRegistry,
        reports: &mut Vec<Report>,
    );
}

/// A registered source plus the liveness of its subscription.
pub struct PluginBinding {
    pub(crate) source: Box<dyn InputSource>,
    pub(crate) bound: bool,
}

impl PluginBinding {
    pub(crate) fn new(source: Box<dyn InputSource>) -> Self {
        Self {
            source,
            bound: false,
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Whether the subscription is currently live against the attached
    /// target.
    pub fn is_bound(&self) -> bool {
        self.bound
    }
}
