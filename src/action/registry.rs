//! Action registry: owns the name → action mapping.
//!
//! The mapping is insertion-ordered so that a single device event matching
//! several actions always produces reports in a deterministic order.

use crate::action::{Action, ActionDef};
use crate::error::{InputMuxError, Result};
use indexmap::IndexMap;
use log::debug;

/// Mapping of action name to resolved record.
///
/// Actions are created the first time a binding introduces their name and
/// persist for the registry's lifetime; there is no remove API.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: IndexMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `defs` into the mapping.
    ///
    /// New definitions fully replace same-named entries (their gate resolves
    /// from the definition, defaulting to enabled). Every action in the
    /// resulting mapping — including ones untouched by `defs` — is reset to
    /// inactive with no asserting sources. Untouched actions keep their
    /// current gate value.
    pub fn bind<I>(&mut self, defs: I)
    where
        I: IntoIterator<Item = (String, ActionDef)>,
    {
        for (name, def) in defs {
            debug!("binding action {name:?} ({} trigger codes)", def.trigger_codes.len());
            self.actions.insert(name, Action::from_def(def));
        }
        for action in self.actions.values_mut() {
            action.reset_assertions();
        }
    }

    /// Open the administrative gate for `name`.
    pub fn enable(&mut self, name: &str) -> Result<()> {
        let action = self
            .actions
            .get_mut(name)
            .ok_or_else(|| InputMuxError::unknown_action(name))?;
        action.set_enabled(true);
        Ok(())
    }

    /// Close the administrative gate for `name`, dropping every assertion.
    pub fn disable(&mut self, name: &str) -> Result<()> {
        let action = self
            .actions
            .get_mut(name)
            .ok_or_else(|| InputMuxError::unknown_action(name))?;
        action.set_enabled(false);
        action.reset_assertions();
        Ok(())
    }

    /// Non-throwing read of the derived activation flag; `false` for names
    /// that were never bound.
    pub fn is_active(&self, name: &str) -> bool {
        self.actions.get(name).map(Action::is_active).unwrap_or(false)
    }

    /// Discriminated lookup so callers can tell "known-and-inactive" from
    /// "unknown".
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.actions.get_mut(name)
    }

    /// Force every action inactive and clear all asserting sets, returning
    /// the names that were active, in table order.
    pub(crate) fn reset_all_assertions(&mut self) -> Vec<String> {
        let mut was_active = Vec::new();
        for (name, action) in self.actions.iter_mut() {
            if action.is_active() {
                was_active.push(name.clone());
            }
            action.reset_assertions();
        }
        was_active
    }

    /// Iterate over the mapping in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.actions.iter().map(|(name, action)| (name.as_str(), action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
