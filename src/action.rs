//! Action data model.
//!
//! Defines the binding definitions supplied by callers and the resolved
//! per-action records the aggregation core derives state on. Derived state
//! (`active`, the asserting-source set) is only ever written by the registry
//! and the aggregation core; input sources get a read-only view and
//! communicate through reports instead.

pub mod registry;

pub use registry::ActionRegistry;

use std::collections::HashSet;

/// Opaque device code asserted by an input source (key code, button index).
///
/// A code is meaningless without the semantics of the source that supplied
/// it; the registry never interprets codes, it only stores them.
pub type DeviceCode = u32;

/// Caller-supplied definition for one action binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDef {
    /// Device codes that assert this action.
    pub trigger_codes: Vec<DeviceCode>,
    /// Administrative gate; `None` resolves to enabled at merge time.
    pub enabled: Option<bool>,
}

impl ActionDef {
    /// Definition with the default gate (enabled).
    pub fn new(trigger_codes: impl IntoIterator<Item = DeviceCode>) -> Self {
        Self {
            trigger_codes: trigger_codes.into_iter().collect(),
            enabled: None,
        }
    }

    /// Definition carrying an explicit gate value.
    pub fn with_enabled(
        trigger_codes: impl IntoIterator<Item = DeviceCode>,
        enabled: bool,
    ) -> Self {
        Self {
            trigger_codes: trigger_codes.into_iter().collect(),
            enabled: Some(enabled),
        }
    }
}

/// Resolved action record.
///
/// `active` is derived: it holds exactly when the asserting-source set is
/// non-empty and the action is enabled.
#[derive(Debug, Clone)]
pub struct Action {
    trigger_codes: HashSet<DeviceCode>,
    enabled: bool,
    active: bool,
    active_by: HashSet<String>,
}

impl Action {
    pub(crate) fn from_def(def: ActionDef) -> Self {
        Self {
            trigger_codes: def.trigger_codes.into_iter().collect(),
            enabled: def.enabled.unwrap_or(true),
            active: false,
            active_by: HashSet::new(),
        }
    }

    /// Device codes that assert this action.
    pub fn trigger_codes(&self) -> &HashSet<DeviceCode> {
        &self.trigger_codes
    }

    /// Whether `code` belongs to this action's trigger set.
    pub fn triggers_on(&self, code: DeviceCode) -> bool {
        self.trigger_codes.contains(&code)
    }

    /// Administrative gate; disabled actions never emit and never accumulate
    /// assertions.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current derived activation state.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Names of the sources currently asserting this action.
    pub fn active_by(&self) -> &HashSet<String> {
        &self.active_by
    }

    /// Whether `source` is currently asserting this action.
    pub fn is_asserted_by(&self, source: &str) -> bool {
        self.active_by.contains(source)
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Drop every assertion and force the action inactive.
    pub(crate) fn reset_assertions(&mut self) {
        self.active = false;
        self.active_by.clear();
    }

    /// Record `source` as asserting. Returns `true` on the empty→non-empty
    /// transition of the asserting set, i.e. exactly when the action just
    /// became active.
    pub(crate) fn assert_by(&mut self, source: &str) -> bool {
        if self.active_by.contains(source) {
            return false;
        }
        let was_empty = self.active_by.is_empty();
        self.active_by.insert(source.to_string());
        if was_empty {
            self.active = true;
        }
        was_empty
    }

    /// Remove `source` from the asserting set. Returns `true` on the
    /// non-empty→empty transition, i.e. exactly when the action just became
    /// inactive. Idempotent for sources that were not asserting.
    pub(crate) fn release_by(&mut self, source: &str) -> bool {
        if !self.active_by.remove(source) {
            return false;
        }
        if self.active_by.is_empty() {
            self.active = false;
            return true;
        }
        false
    }
}
