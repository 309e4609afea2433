//! Edge-triggered notifications and the sink interface they are delivered
//! through.
//!
//! The sink is supplied at controller construction; there is no ambient
//! event target. Notifications are only delivered while a target is
//! attached.

use tokio::sync::mpsc::UnboundedSender;

/// Edge-triggered notification carrying the affected action's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEvent {
    /// The action transitioned inactive → active.
    Activated(String),
    /// The action transitioned active → inactive (or was administratively
    /// disabled, see `InputController::disable_action`).
    Deactivated(String),
}

impl ActionEvent {
    /// Name of the action this event refers to.
    pub fn action(&self) -> &str {
        match self {
            ActionEvent::Activated(name) | ActionEvent::Deactivated(name) => name,
        }
    }
}

/// Where the controller delivers notifications.
pub trait EventSink: Send {
    fn emit(&mut self, event: ActionEvent);
}

/// Sink discarding every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: ActionEvent) {}
}

/// Sink forwarding notifications onto an unbounded channel.
///
/// Delivery to a closed channel is dropped silently; a vanished listener
/// must not break dispatch.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<ActionEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ActionEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: ActionEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn action_accessor_covers_both_variants() {
        assert_eq!(ActionEvent::Activated("jump".to_string()).action(), "jump");
        assert_eq!(ActionEvent::Deactivated("left".to_string()).action(), "left");
    }

    #[test]
    fn channel_sink_forwards_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = ChannelSink::new(tx);

        sink.emit(ActionEvent::Activated("jump".to_string()));
        assert_eq!(
            rx.try_recv().unwrap(),
            ActionEvent::Activated("jump".to_string())
        );
    }

    #[test]
    fn channel_sink_survives_a_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.emit(ActionEvent::Deactivated("jump".to_string()));
    }
}
