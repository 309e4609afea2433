//! Key-code reference source.

use crate::action::{ActionRegistry, DeviceCode};
use crate::plugin::tracker::PressTracker;
use crate::plugin::{DeviceEvent, Edge, InputSource, Report, TargetId};
use log::debug;

/// Input source reporting key-code assertions.
///
/// Filters dispatched events to [`DeviceEvent::Key`] and delegates debounce
/// bookkeeping to a [`PressTracker`].
pub struct KeyboardSource {
    name: String,
    target: Option<TargetId>,
    tracker: PressTracker,
}

impl KeyboardSource {
    /// Source with the conventional name `"keyboard"`.
    pub fn new() -> Self {
        Self::named("keyboard")
    }

    /// Source with a custom stable name, letting several keyboard-class
    /// sources coexist on one controller.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            tracker: PressTracker::new(),
        }
    }

    /// Whether `code` is currently held according to this source.
    pub fn is_key_pressed(&self, code: DeviceCode) -> bool {
        self.tracker.is_pressed(code)
    }
}

impl Default for KeyboardSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&mut self, target: TargetId, actions: &ActionRegistry) {
        debug!("{}: subscribing to target {target}", self.name);
        self.target = Some(target);
        self.tracker.rebind(actions);
    }

    fn unsubscribe(&mut self) {
        if self.target.take().is_some() {
            debug!("{}: unsubscribed", self.name);
        }
        self.tracker.reset();
    }

    fn observe(
        &mut self,
        event: &DeviceEvent,
        actions: &ActionRegistry,
        reports: &mut Vec<Report>,
    ) {
        if self.target.is_none() {
            return;
        }
        if let DeviceEvent::Key { code, edge } = *event {
            match edge {
                Edge::Down => self.tracker.press(&self.name, code, actions, reports),
                Edge::Up => self.tracker.release(&self.name, code, actions, reports),
            }
        }
    }
}
