use crate::chat::ChatRelay;
use crate::presence::RoomPresenceRegistry;
use crate::relay::SignalingRelay;
use std::sync::Arc;
use tracing::{debug, warn};
use trellis_core::{ClientMessage, ConnectionId, RoomId, ServerEvent, ValidationError};

/// Thin composition of registry and relay: turns each client message into
/// registry mutations plus addressed deliveries. Handlers never block on
/// I/O; all sends are fire-and-forget.
#[derive(Clone)]
pub struct RelayDispatcher {
    registry: Arc<RoomPresenceRegistry>,
    relay: Arc<SignalingRelay>,
    chat: ChatRelay,
}

impl RelayDispatcher {
    pub fn new() -> Self {
        let registry = Arc::new(RoomPresenceRegistry::new());
        let relay = Arc::new(SignalingRelay::new(registry.clone()));
        let chat = ChatRelay::new(relay.clone());
        Self {
            registry,
            relay,
            chat,
        }
    }

    pub fn registry(&self) -> &Arc<RoomPresenceRegistry> {
        &self.registry
    }

    pub fn relay(&self) -> &Arc<SignalingRelay> {
        &self.relay
    }

    pub fn handle(&self, from: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::JoinRoom { room, display_name } => {
                self.handle_join(from, room, display_name);
            }
            ClientMessage::Offer { sdp, to } => {
                self.relay.unicast(&to, ServerEvent::Offer { sdp, from });
            }
            ClientMessage::Answer { sdp, to } => {
                self.relay.unicast(&to, ServerEvent::Answer { sdp, from });
            }
            ClientMessage::Candidate { candidate, to } => {
                self.relay
                    .unicast(&to, ServerEvent::Candidate { candidate, from });
            }
            ClientMessage::SendMessage(message) => self.chat.send(message),
        }
    }

    /// Introduces each unordered pair exactly once: every member already
    /// present hears about the newcomer with the initiator role, and the
    /// newcomer hears about each of them as responder.
    fn handle_join(&self, from: ConnectionId, room: RoomId, display_name: String) {
        if room.is_empty() {
            warn!(%from, error = %ValidationError::EmptyRoomId, "join-room rejected");
            return;
        }
        if display_name.is_empty() {
            warn!(%from, error = %ValidationError::EmptyDisplayName, "join-room rejected");
            return;
        }

        let existing = self.registry.join(from, &room, &display_name);
        debug!(%from, %room, existing = existing.len(), "introducing pairs");

        for member in existing {
            self.relay.unicast(
                &member.connection,
                ServerEvent::PeerJoined {
                    remote: from,
                    display_name: display_name.clone(),
                    initiator: true,
                },
            );
            self.relay.unicast(
                &from,
                ServerEvent::PeerJoined {
                    remote: member.connection,
                    display_name: member.display_name,
                    initiator: false,
                },
            );
        }
    }

    /// Transport loss and explicit leave share this path: detach the
    /// sink, sweep the registry, and tell each remaining member once.
    /// An emptied room produces no departure events at all.
    pub fn handle_disconnect(&self, connection: ConnectionId) {
        self.relay.detach(&connection);

        for departure in self.registry.leave(&connection) {
            for member in &departure.remaining {
                self.relay.unicast(
                    &member.connection,
                    ServerEvent::PeerLeft {
                        remote: connection,
                        display_name: departure.display_name.clone(),
                    },
                );
            }
        }
    }
}

impl Default for RelayDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
