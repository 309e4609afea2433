//! Shared debounce logic over a device-specific code space.
//!
//! Both reference sources own a [`PressTracker`] and feed it their raw
//! edges; the tracker decides which edges turn into reports. Within one
//! source an action bound to several codes stays asserted until every one of
//! them is released; the OR across sources happens later, in the aggregation
//! core.

use crate::action::{ActionRegistry, DeviceCode};
use crate::plugin::Report;
use log::trace;
use std::collections::HashSet;

/// Pressed-code bookkeeping shared by the reference sources.
///
/// `rebind` snapshots the codes worth watching and forgets pressed state. A
/// device held across a rebind is therefore not tracked anymore: its release
/// is ignored, and the source re-asserts on the next down edge.
#[derive(Debug, Default)]
pub struct PressTracker {
    watched: HashSet<DeviceCode>,
    pressed: HashSet<DeviceCode>,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the trigger codes of the current mapping.
    pub fn rebind(&mut self, actions: &ActionRegistry) {
        self.watched.clear();
        self.pressed.clear();
        for (_, action) in actions.iter() {
            self.watched.extend(action.trigger_codes());
        }
    }

    /// Forget all watched and pressed codes.
    pub fn reset(&mut self) {
        self.watched.clear();
        self.pressed.clear();
    }

    /// Whether `code` is currently held according to this tracker.
    pub fn is_pressed(&self, code: DeviceCode) -> bool {
        self.pressed.contains(&code)
    }

    /// Process a down edge for `code` on behalf of `source`.
    ///
    /// Tracks the code (idempotently) and reports an assertion for every
    /// enabled action whose trigger set contains it.
    pub fn press(
        &mut self,
        source: &str,
        code: DeviceCode,
        actions: &ActionRegistry,
        reports: &mut Vec<Report>,
    ) {
        if !self.watched.contains(&code) {
            trace!("{source}: code {code} not in watched set");
            return;
        }
        for (name, action) in actions.iter() {
            if action.is_enabled() && action.triggers_on(code) {
                self.pressed.insert(code);
                reports.push(Report::new(name, source, true));
            }
        }
    }

    /// Process an up edge for a tracked code.
    ///
    /// Untracks the code, then reports a release for every matching enabled
    /// action whose trigger codes are now all up.
    pub fn release(
        &mut self,
        source: &str,
        code: DeviceCode,
        actions: &ActionRegistry,
        reports: &mut Vec<Report>,
    ) {
        if !self.pressed.remove(&code) {
            trace!("{source}: ignoring untracked release of code {code}");
            return;
        }
        for (name, action) in actions.iter() {
            if action.is_enabled() && action.triggers_on(code) {
                let all_released = action
                    .trigger_codes()
                    .iter()
                    .all(|held| !self.pressed.contains(held));
                if all_released {
                    reports.push(Report::new(name, source, false));
                }
            }
        }
    }
}
