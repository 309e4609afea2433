//! Threaded and async embedding helpers.
//!
//! The controller itself is single-threaded and synchronous. Embeddings
//! that feed it from OS threads or async tasks wrap it in
//! [`SharedController`] and drive it through the command pump, which drains
//! device events and focus changes from a channel in arrival order.

use crate::controller::InputController;
use crate::plugin::DeviceEvent;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Mutex-guarded controller handle for threaded embeddings.
///
/// All access goes through the single lock, preserving the single-writer
/// discipline the synchronous core relies on.
#[derive(Clone)]
pub struct SharedController {
    inner: Arc<Mutex<InputController>>,
}

impl SharedController {
    pub fn new(controller: InputController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut InputController) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Non-throwing read of one action's activation flag, for consumption
    /// loops polling at a fixed cadence.
    pub fn is_action_active(&self, name: &str) -> bool {
        self.inner.lock().is_action_active(name)
    }
}

/// Commands consumed by the pump worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCommand {
    /// Route a raw device event through the controller.
    Device(DeviceEvent),
    /// Forward a focus change from the embedding surface.
    Focus(bool),
    /// Stop the worker.
    Shutdown,
}

/// Drain pump commands into the controller until the channel closes or a
/// shutdown command arrives.
pub async fn pump_loop(mut rx: UnboundedReceiver<PumpCommand>, controller: SharedController) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            PumpCommand::Device(event) => controller.with(|c| c.dispatch(event)),
            PumpCommand::Focus(focused) => controller.with(|c| c.set_focused(focused)),
            PumpCommand::Shutdown => break,
        }
    }
    debug!("pump worker stopped");
}

/// Spawn the pump worker, returning its command handle and join handle.
pub fn spawn_pump(controller: SharedController) -> (UnboundedSender<PumpCommand>, JoinHandle<()>) {
    let (tx, rx) = unbounded_channel();
    let handle = tokio::spawn(pump_loop(rx, controller));
    (tx, handle)
}
