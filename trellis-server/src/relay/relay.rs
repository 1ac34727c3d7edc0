use crate::presence::RoomPresenceRegistry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use trellis_core::{ConnectionId, RoomId, ServerEvent};

/// Addressed, fire-and-forget delivery of server events. The relay owns
/// the map from connection id to outbound sink and nothing else;
/// membership questions are answered by the registry.
///
/// Delivery is at-most-once: a missing or closed sink means the event is
/// silently dropped, never retried.
pub struct SignalingRelay {
    sinks: DashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
    registry: Arc<RoomPresenceRegistry>,
}

impl SignalingRelay {
    pub fn new(registry: Arc<RoomPresenceRegistry>) -> Self {
        Self {
            sinks: DashMap::new(),
            registry,
        }
    }

    pub fn attach(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<ServerEvent>) {
        self.sinks.insert(connection, tx);
    }

    pub fn detach(&self, connection: &ConnectionId) {
        self.sinks.remove(connection);
    }

    /// Delivers the event to exactly one connection. A no-op when the
    /// target is not attached.
    pub fn unicast(&self, to: &ConnectionId, event: ServerEvent) {
        match self.sinks.get(to) {
            Some(sink) => {
                if sink.send(event).is_err() {
                    debug!(%to, "sink closed, dropping event");
                }
            }
            None => debug!(%to, "no such connection, dropping event"),
        }
    }

    /// Delivers the event to every current member of the room, except
    /// `exclude` when given. Membership is read from the registry at send
    /// time.
    pub fn broadcast(&self, room: &RoomId, event: ServerEvent, exclude: Option<&ConnectionId>) {
        for member in self.registry.members(room) {
            if exclude == Some(&member.connection) {
                continue;
            }
            self.unicast(&member.connection, event.clone());
        }
    }
}
