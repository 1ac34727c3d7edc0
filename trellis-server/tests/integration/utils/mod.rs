use tokio::sync::mpsc;
use trellis_core::{ChatMessage, ClientMessage, ConnectionId, RoomId, ServerEvent};
use trellis_server::RelayDispatcher;

/// A fake connected client: an attached sink plus helpers to drive the
/// dispatcher and inspect what came back. The dispatcher is synchronous
/// and sinks are unbounded, so every effect of a call is observable
/// immediately after it returns.
pub struct TestPeer {
    pub connection: ConnectionId,
    rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl TestPeer {
    pub fn attach(dispatcher: &RelayDispatcher) -> Self {
        let connection = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        dispatcher.relay().attach(connection, tx);
        Self { connection, rx }
    }

    pub fn join(&self, dispatcher: &RelayDispatcher, room: &str, display_name: &str) {
        dispatcher.handle(
            self.connection,
            ClientMessage::JoinRoom {
                room: RoomId::from(room),
                display_name: display_name.to_string(),
            },
        );
    }

    pub fn send_chat(&self, dispatcher: &RelayDispatcher, room: &str, name: &str, text: &str) {
        dispatcher.handle(
            self.connection,
            ClientMessage::SendMessage(ChatMessage {
                room: RoomId::from(room),
                display_name: name.to_string(),
                text: text.to_string(),
                timestamp_ms: 1,
            }),
        );
    }

    pub fn disconnect(&self, dispatcher: &RelayDispatcher) {
        dispatcher.handle_disconnect(self.connection);
    }

    /// Everything delivered so far, in order.
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn peer_joined_events(&mut self) -> Vec<(ConnectionId, String, bool)> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                ServerEvent::PeerJoined {
                    remote,
                    display_name,
                    initiator,
                } => Some((remote, display_name, initiator)),
                _ => None,
            })
            .collect()
    }
}
