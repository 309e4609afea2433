//! Controller subsystem: aggregation core, attachment management, and the
//! notification channel.

pub mod events;
pub mod service;

pub use events::{ActionEvent, ChannelSink, EventSink, NullSink};
pub use service::InputController;
