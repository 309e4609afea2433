//! Aggregation core and attachment management.
//!
//! [`InputController`] owns the action table and the plugin roster, merges
//! state-change reports from an arbitrary number of sources into a single
//! coherent active/inactive state per action, and emits edge-triggered
//! notifications through the sink supplied at construction.
//!
//! The controller is single-threaded and synchronous: every dispatched
//! event, administrative call, and emission runs to completion before the
//! next is processed. Threaded embeddings wrap it in
//! [`SharedController`](crate::runtime::SharedController).

use crate::action::{Action, ActionDef, ActionRegistry};
use crate::controller::events::{ActionEvent, EventSink};
use crate::error::{InputMuxError, Result};
use crate::plugin::{DeviceEvent, InputSource, PluginBinding, TargetId};
use log::{debug, trace};

/// Merges per-source assertion reports into per-action activation state.
///
/// Aggregation is a logical OR across sources: an action is active while at
/// least one enabled source asserts it. Transitions are edge-triggered; a
/// report that does not change the asserting set emits nothing.
pub struct InputController {
    actions: ActionRegistry,
    plugins: Vec<PluginBinding>,
    enabled: bool,
    focused: bool,
    target: Option<TargetId>,
    sink: Box<dyn EventSink>,
}

impl InputController {
    /// Controller delivering notifications into `sink`.
    ///
    /// Starts enabled and focused but detached; nothing is emitted and no
    /// device events flow until [`attach`](Self::attach) is called.
    pub fn new(sink: impl EventSink + 'static) -> Self {
        Self {
            actions: ActionRegistry::new(),
            plugins: Vec::new(),
            enabled: true,
            focused: true,
            target: None,
            sink: Box::new(sink),
        }
    }

    /// Controller with an initial binding table.
    pub fn with_actions<I>(defs: I, sink: impl EventSink + 'static) -> Self
    where
        I: IntoIterator<Item = (String, ActionDef)>,
    {
        let mut controller = Self::new(sink);
        controller.bind_actions(defs);
        controller
    }

    // --- action registry surface ---

    /// Merge definitions into the action table and refresh every plugin's
    /// trigger-code view.
    ///
    /// Resets all actions to inactive; see [`ActionRegistry::bind`] for the
    /// merge rules.
    pub fn bind_actions<I>(&mut self, defs: I)
    where
        I: IntoIterator<Item = (String, ActionDef)>,
    {
        self.actions.bind(defs);
        debug!("action table rebound, {} actions registered", self.actions.len());
        self.rebind_plugins();
    }

    /// Open the administrative gate for `name`.
    pub fn enable_action(&mut self, name: &str) -> Result<()> {
        self.actions.enable(name)
    }

    /// Close the administrative gate for `name`, dropping its assertions.
    ///
    /// While attached this always emits a deactivation for the action, even
    /// when it was not active. Callers must not treat that notification as
    /// evidence of a prior activation.
    pub fn disable_action(&mut self, name: &str) -> Result<()> {
        self.actions.disable(name)?;
        self.emit(ActionEvent::Deactivated(name.to_string()));
        Ok(())
    }

    /// Non-throwing read of the derived activation flag; `false` for names
    /// that were never bound.
    pub fn is_action_active(&self, name: &str) -> bool {
        self.actions.is_active(name)
    }

    /// Discriminated lookup so callers can tell "known-and-inactive" from
    /// "unknown".
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Read-only view of the action table.
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    // --- aggregation core ---

    /// Apply one state-change report from a source.
    ///
    /// The sole mutation entry point besides the administrative calls.
    /// Dropped without effect unless the controller is enabled and focused.
    pub fn report(&mut self, action: &str, source: &str, asserted: bool) {
        if !(self.enabled && self.focused) {
            trace!("dropping report {action:?}/{source:?}: controller gated");
            return;
        }
        self.apply_report(action, source, asserted);
    }

    fn apply_report(&mut self, action_name: &str, source: &str, asserted: bool) {
        let event = match self.actions.get_mut(action_name) {
            None => {
                trace!("dropping report for unknown action {action_name:?}");
                return;
            }
            Some(action) => {
                if asserted {
                    if action.is_enabled() && action.assert_by(source) {
                        Some(ActionEvent::Activated(action_name.to_string()))
                    } else {
                        None
                    }
                } else if action.release_by(source) && action.is_enabled() {
                    Some(ActionEvent::Deactivated(action_name.to_string()))
                } else {
                    None
                }
            }
        };
        if let Some(event) = event {
            debug!("edge transition: {event:?}");
            self.emit(event);
        }
    }

    /// Route one raw device event through every bound plugin in roster
    /// order.
    ///
    /// Each plugin's reports are applied before the next plugin runs, so
    /// roster order determines emission order for a single dispatch tick.
    pub fn dispatch(&mut self, event: DeviceEvent) {
        if !(self.enabled && self.focused) {
            trace!("dropping {event:?}: controller gated");
            return;
        }
        let mut reports = Vec::new();
        for idx in 0..self.plugins.len() {
            reports.clear();
            {
                let binding = &mut self.plugins[idx];
                if !binding.bound {
                    continue;
                }
                binding.source.observe(&event, &self.actions, &mut reports);
            }
            for report in reports.drain(..) {
                self.apply_report(&report.action, &report.source, report.asserted);
            }
        }
    }

    /// Controller-level gate. The falling edge deactivates every action.
    pub fn set_enabled(&mut self, enabled: bool) {
        let falling = self.enabled && !enabled;
        self.enabled = enabled;
        if falling {
            debug!("controller disabled, deactivating all actions");
            self.deactivate_all();
        }
    }

    /// Focus flag, fed by the embedding surface. The falling edge
    /// deactivates every action; refocusing never replays devices still
    /// held.
    pub fn set_focused(&mut self, focused: bool) {
        let falling = self.focused && !focused;
        self.focused = focused;
        if falling {
            debug!("focus lost, deactivating all actions");
            self.deactivate_all();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn deactivate_all(&mut self) {
        for name in self.actions.reset_all_assertions() {
            self.emit(ActionEvent::Deactivated(name));
        }
    }

    // --- attachment manager ---

    /// Attach to `target`: enables the controller (unless suppressed),
    /// restores focus, and (re)subscribes every registered plugin.
    pub fn attach(&mut self, target: TargetId, suppress_enable: bool) {
        debug!("attaching to target {target} (suppress_enable: {suppress_enable})");
        self.target = Some(target);
        self.set_enabled(!suppress_enable);
        self.set_focused(true);
        self.rebind_plugins();
    }

    /// Detach from the current target. Safe no-op when not attached.
    ///
    /// Deactivations for still-active actions are emitted before the target
    /// is cleared, so listeners observe them.
    pub fn detach(&mut self) {
        if self.target.is_none() {
            trace!("detach ignored: not attached");
            return;
        }
        debug!("detaching from target {:?}", self.target);
        self.set_enabled(false);
        self.set_focused(false);
        self.unbind_plugins();
        self.target = None;
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// Register a new input source at the end of the roster.
    ///
    /// Rejects a source whose name is already registered; duplicate names
    /// would double every subsequent report. Subscribes immediately when a
    /// target is attached.
    pub fn add_plugin(&mut self, source: Box<dyn InputSource>) -> Result<()> {
        if self.plugins.iter().any(|b| b.name() == source.name()) {
            return Err(InputMuxError::plugin_already_registered(source.name()));
        }
        debug!("registering plugin {:?}", source.name());
        self.plugins.push(PluginBinding::new(source));
        if self.target.is_some() {
            self.rebind_plugins();
        }
        Ok(())
    }

    /// Names of the registered sources, in roster order.
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(PluginBinding::name)
    }

    /// Unsubscribe every bound plugin, then resubscribe all of them against
    /// the latest action table. In-flight device state held by the plugins
    /// is dropped.
    fn rebind_plugins(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        self.unbind_plugins();
        for binding in &mut self.plugins {
            binding.source.subscribe(target, &self.actions);
            binding.bound = true;
        }
    }

    fn unbind_plugins(&mut self) {
        for binding in &mut self.plugins {
            if binding.bound {
                binding.source.unsubscribe();
                binding.bound = false;
            }
        }
    }

    fn emit(&mut self, event: ActionEvent) {
        if self.target.is_none() {
            trace!("suppressing {event:?}: no target attached");
            return;
        }
        self.sink.emit(event);
    }
}
