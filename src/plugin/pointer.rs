//! Pointer-button reference source.
//!
//! Same debounce behavior as the keyboard source, over the pointer-button
//! code space.

use crate::action::{ActionRegistry, DeviceCode};
use crate::plugin::tracker::PressTracker;
use crate::plugin::{DeviceEvent, Edge, InputSource, Report, TargetId};
use log::debug;

/// Input source reporting pointer-button assertions.
pub struct PointerSource {
    name: String,
    target: Option<TargetId>,
    tracker: PressTracker,
}

impl PointerSource {
    /// Source with the conventional name `"pointer"`.
    pub fn new() -> Self {
        Self::named("pointer")
    }

    /// Source with a custom stable name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            tracker: PressTracker::new(),
        }
    }

    /// Whether `button` is currently held according to this source.
    pub fn is_button_pressed(&self, button: DeviceCode) -> bool {
        self.tracker.is_pressed(button)
    }
}

impl Default for PointerSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for PointerSource {
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
        if let DeviceEvent::Pointer { button, edge } = *event {
            match edge {
                Edge::Down => self.tracker.press(&self.name, button, actions, reports),
                Edge::Up => self.tracker.release(&self.name, button, actions, reports),
            }
        }
    }
}
