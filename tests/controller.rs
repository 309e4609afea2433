//! End-to-end scenarios over the public controller API: reference sources
//! feeding dispatched device events through the aggregation core, with
//! notifications observed on a channel-backed sink.

use inputmux::{
    ActionDef, ActionEvent, ChannelSink, DeviceEvent, InputController, KeyboardSource,
    PointerSource, TargetId,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

const TARGET: TargetId = 1;

fn controller() -> (InputController, UnboundedReceiver<ActionEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InputController::new(ChannelSink::new(tx)), rx)
}

fn drain(rx: &mut UnboundedReceiver<ActionEvent>) -> Vec<ActionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn activated(name: &str) -> ActionEvent {
    ActionEvent::Activated(name.to_string())
}

fn deactivated(name: &str) -> ActionEvent {
    ActionEvent::Deactivated(name.to_string())
}

#[test]
fn key_press_and_release_produce_one_activation_cycle() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("jump".to_string(), ActionDef::new([32]))]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();
    controller.attach(TARGET, false);

    controller.dispatch(DeviceEvent::key_down(32));
    assert!(controller.is_action_active("jump"));
    assert_eq!(drain(&mut rx), vec![activated("jump")]);

    controller.dispatch(DeviceEvent::key_up(32));
    assert!(!controller.is_action_active("jump"));
    assert_eq!(drain(&mut rx), vec![deactivated("jump")]);
}

#[test]
fn two_sources_asserting_one_action_release_in_either_order() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("left".to_string(), ActionDef::new([37, 65]))]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();
    controller
        .add_plugin(Box::new(PointerSource::new()))
        .unwrap();
    controller.attach(TARGET, false);

    // First source asserts: one activation.
    controller.dispatch(DeviceEvent::key_down(37));
    assert_eq!(drain(&mut rx), vec![activated("left")]);

    // Second source joins: no new event.
    controller.dispatch(DeviceEvent::pointer_down(65));
    assert_eq!(drain(&mut rx), vec![]);

    // First source releases: still active, no event.
    controller.dispatch(DeviceEvent::key_up(37));
    assert!(controller.is_action_active("left"));
    assert_eq!(drain(&mut rx), vec![]);

    // Last source releases: one deactivation.
    controller.dispatch(DeviceEvent::pointer_up(65));
    assert!(!controller.is_action_active("left"));
    assert_eq!(drain(&mut rx), vec![deactivated("left")]);
}

#[test]
fn multi_code_binding_releases_only_when_every_code_is_up() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("left".to_string(), ActionDef::new([37, 65]))]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();
    controller.attach(TARGET, false);

    controller.dispatch(DeviceEvent::key_down(37));
    assert_eq!(drain(&mut rx), vec![activated("left")]);

    controller.dispatch(DeviceEvent::key_down(65));
    assert_eq!(drain(&mut rx), vec![]);

    controller.dispatch(DeviceEvent::key_up(37));
    assert!(controller.is_action_active("left"), "65 is still held");
    assert_eq!(drain(&mut rx), vec![]);

    controller.dispatch(DeviceEvent::key_up(65));
    assert!(!controller.is_action_active("left"));
    assert_eq!(drain(&mut rx), vec![deactivated("left")]);
}

#[test]
fn disabling_an_inactive_action_still_emits_a_deactivation() {
    // The deactivation fires even without a preceding activation; listeners
    // must not pair it with an earlier event.
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("jump".to_string(), ActionDef::new([32]))]);
    controller.attach(TARGET, false);

    assert!(!controller.is_action_active("jump"));
    controller.disable_action("jump").unwrap();
    assert_eq!(drain(&mut rx), vec![deactivated("jump")]);
}

#[test]
fn reattaching_does_not_duplicate_event_delivery() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("jump".to_string(), ActionDef::new([32]))]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();

    controller.attach(TARGET, false);
    controller.detach();
    controller.attach(TARGET, false);

    controller.dispatch(DeviceEvent::key_down(32));
    assert_eq!(drain(&mut rx), vec![activated("jump")]);
    let jump = controller.action("jump").unwrap();
    assert_eq!(jump.active_by().len(), 1);
}

#[test]
fn events_while_unfocused_never_reach_the_sources() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("jump".to_string(), ActionDef::new([32]))]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();
    controller.attach(TARGET, false);
    controller.set_focused(false);
    drain(&mut rx);

    controller.dispatch(DeviceEvent::key_down(32));
    assert!(!controller.is_action_active("jump"));
    assert!(controller.action("jump").unwrap().active_by().is_empty());
    assert_eq!(drain(&mut rx), vec![]);
}

#[test]
fn focus_loss_deactivates_all_and_refocus_does_not_replay() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([
        ("left".to_string(), ActionDef::new([37])),
        ("jump".to_string(), ActionDef::new([32])),
    ]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();
    controller.attach(TARGET, false);

    controller.dispatch(DeviceEvent::key_down(37));
    controller.dispatch(DeviceEvent::key_down(32));
    drain(&mut rx);

    controller.set_focused(false);
    assert_eq!(
        drain(&mut rx),
        vec![deactivated("left"), deactivated("jump")]
    );

    // The keys are conceptually still held, but refocusing rebuilds state
    // from fresh device events only.
    controller.set_focused(true);
    assert!(!controller.is_action_active("left"));
    assert!(!controller.is_action_active("jump"));
    assert_eq!(drain(&mut rx), vec![]);
}

#[test]
fn rebinding_resets_assertions_and_refreshes_trigger_views() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("jump".to_string(), ActionDef::new([32]))]);
    controller
        .add_plugin(Box::new(KeyboardSource::new()))
        .unwrap();
    controller.attach(TARGET, false);

    controller.dispatch(DeviceEvent::key_down(32));
    drain(&mut rx);

    controller.bind_actions([("jump".to_string(), ActionDef::new([13]))]);
    assert!(!controller.is_action_active("jump"));
    assert_eq!(drain(&mut rx), vec![]);

    // Old code no longer triggers, the new one does.
    controller.dispatch(DeviceEvent::key_down(32));
    assert!(!controller.is_action_active("jump"));
    controller.dispatch(DeviceEvent::key_down(13));
    assert!(controller.is_action_active("jump"));
    assert_eq!(drain(&mut rx), vec![activated("jump")]);
}

#[test]
fn plugin_added_while_attached_is_subscribed_immediately() {
    let (mut controller, mut rx) = controller();
    controller.bind_actions([("fire".to_string(), ActionDef::new([0]))]);
    controller.attach(TARGET, false);

    controller
        .add_plugin(Box::new(PointerSource::new()))
        .unwrap();
    controller.dispatch(DeviceEvent::pointer_down(0));
    assert_eq!(drain(&mut rx), vec![activated("fire")]);
}

#[test]
fn unknown_names_are_silent_on_reads_and_explicit_on_writes() {
    let (mut controller, _rx) = controller();
    assert!(!controller.is_action_active("ghost"));
    assert!(controller.action("ghost").is_none());
    assert!(controller.enable_action("ghost").is_err());
    assert!(controller.disable_action("ghost").is_err());
}
