use crate::relay::SignalingRelay;
use std::sync::Arc;
use tracing::warn;
use trellis_core::{ChatMessage, ServerEvent};

/// Room-scoped text fan-out on top of the relay. The sender is a room
/// member like any other, so it observes its own message echoed back.
#[derive(Clone)]
pub struct ChatRelay {
    relay: Arc<SignalingRelay>,
}

impl ChatRelay {
    pub fn new(relay: Arc<SignalingRelay>) -> Self {
        Self { relay }
    }

    /// Broadcasts the message to every current member of its room,
    /// sender included. A message that fails validation is dropped with
    /// no reply to the sender.
    pub fn send(&self, message: ChatMessage) {
        if let Err(error) = message.validate() {
            warn!(%error, "dropping chat message");
            return;
        }

        let room = message.room.clone();
        self.relay
            .broadcast(&room, ServerEvent::ReceiveMessage(message), None);
    }
}
