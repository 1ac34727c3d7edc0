use crate::error::LinkError;
use crate::link::PeerLink;
use crate::media::{LocalMedia, MediaLinkFactory};
use crate::negotiation::PeerRole;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use trellis_core::{ChatMessage, ClientMessage, ConnectionId, RoomId, ServerEvent};

/// What the embedding application observes about the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PeerUp {
        remote: ConnectionId,
        display_name: String,
    },
    PeerDown {
        remote: ConnectionId,
        display_name: String,
    },
    ChatReceived(ChatMessage),
}

#[derive(Clone)]
pub struct SessionConfig {
    pub room: RoomId,
    pub display_name: String,
}

/// Client-side heart of a call: owns one `PeerLink` per remote peer,
/// consumes the server's event stream and answers with signaling
/// messages on the outbound channel.
///
/// `leave` is the cancellation boundary. It stops local capture and
/// closes every link whatever state each is in, and it runs at most
/// once however often it is invoked.
pub struct RoomSession {
    connection: ConnectionId,
    config: SessionConfig,
    factory: Arc<dyn MediaLinkFactory>,
    local_media: Arc<dyn LocalMedia>,
    outbound: mpsc::UnboundedSender<ClientMessage>,
    events: mpsc::UnboundedSender<SessionEvent>,
    links: HashMap<ConnectionId, PeerLink>,
    left: bool,
}

impl RoomSession {
    /// Acquires local capture, announces the join, and hands back the
    /// session plus the stream of `SessionEvent`s. Capture denial fails
    /// here, before the server learns anything about us.
    pub async fn join(
        connection: ConnectionId,
        config: SessionConfig,
        factory: Arc<dyn MediaLinkFactory>,
        local_media: Arc<dyn LocalMedia>,
        outbound: mpsc::UnboundedSender<ClientMessage>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionEvent>), LinkError> {
        local_media.acquire().await?;

        let (events, event_rx) = mpsc::unbounded_channel();
        let session = Self {
            connection,
            config,
            factory,
            local_media,
            outbound,
            events,
            links: HashMap::new(),
            left: false,
        };

        session.send(ClientMessage::JoinRoom {
            room: session.config.room.clone(),
            display_name: session.config.display_name.clone(),
        })?;
        info!(connection = %session.connection, room = %session.config.room, "joined room");

        Ok((session, event_rx))
    }

    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Drives the session until the inbound stream ends, then leaves.
    /// Per-event failures are logged and skipped; transport loss ends
    /// the loop and triggers the same teardown as an explicit leave.
    pub async fn run(&mut self, mut inbound: mpsc::UnboundedReceiver<ServerEvent>) {
        while let Some(event) = inbound.recv().await {
            if let Err(e) = self.handle_event(event).await {
                warn!(connection = %self.connection, "dropping server event: {e}");
            }
        }
        self.leave().await;
    }

    pub async fn handle_event(&mut self, event: ServerEvent) -> Result<(), LinkError> {
        match event {
            ServerEvent::PeerJoined {
                remote,
                display_name,
                initiator,
            } => self.on_peer_joined(remote, display_name, initiator).await,
            ServerEvent::Offer { sdp, from } => self.on_offer(from, &sdp).await,
            ServerEvent::Answer { sdp, from } => self.on_answer(from, &sdp).await,
            ServerEvent::Candidate { candidate, from } => {
                match self.links.get_mut(&from) {
                    Some(link) => link.handle_candidate(candidate).await,
                    None => {
                        debug!(%from, "candidate for unknown peer dropped");
                        Ok(())
                    }
                }
            }
            ServerEvent::ReceiveMessage(message) => {
                let _ = self.events.send(SessionEvent::ChatReceived(message));
                Ok(())
            }
            ServerEvent::PeerLeft {
                remote,
                display_name,
            } => self.on_peer_left(remote, display_name).await,
        }
    }

    pub fn send_chat(&self, text: impl Into<String>) -> Result<(), LinkError> {
        self.send(ClientMessage::SendMessage(ChatMessage {
            room: self.config.room.clone(),
            display_name: self.config.display_name.clone(),
            text: text.into(),
            timestamp_ms: now_ms(),
        }))
    }

    /// Stops capture and closes every link regardless of its state.
    /// Safe to call repeatedly; only the first call does anything.
    pub async fn leave(&mut self) {
        if self.left {
            return;
        }
        self.left = true;

        self.local_media.stop_all();
        for (remote, mut link) in self.links.drain() {
            if let Err(e) = link.close().await {
                warn!(%remote, "link close failed: {e}");
            }
        }
        info!(connection = %self.connection, room = %self.config.room, "left room");
    }

    async fn on_peer_joined(
        &mut self,
        remote: ConnectionId,
        display_name: String,
        initiator: bool,
    ) -> Result<(), LinkError> {
        if let Some(link) = self.links.get_mut(&remote) {
            // The offer beat the introduction; just learn the name.
            link.set_display_name(display_name.clone());
            let _ = self.events.send(SessionEvent::PeerUp {
                remote,
                display_name,
            });
            return Ok(());
        }

        let role = if initiator {
            PeerRole::Initiator
        } else {
            PeerRole::Responder
        };
        let mut link = self.open_link(remote, display_name.clone(), role).await?;

        if let Some(sdp) = link.start().await? {
            self.send(ClientMessage::Offer { sdp, to: remote })?;
        }

        self.links.insert(remote, link);
        let _ = self.events.send(SessionEvent::PeerUp {
            remote,
            display_name,
        });
        Ok(())
    }

    async fn on_offer(&mut self, from: ConnectionId, sdp: &str) -> Result<(), LinkError> {
        if !self.links.contains_key(&from) {
            // An offer may name a remote we have not been introduced to
            // yet; the receiving side of an offer is always responder.
            let link = self
                .open_link(from, String::new(), PeerRole::Responder)
                .await?;
            self.links.insert(from, link);
        }

        if let Some(link) = self.links.get_mut(&from) {
            if let Some(answer) = link.handle_offer(sdp).await? {
                self.send(ClientMessage::Answer {
                    sdp: answer,
                    to: from,
                })?;
            }
        }
        Ok(())
    }

    async fn on_answer(&mut self, from: ConnectionId, sdp: &str) -> Result<(), LinkError> {
        match self.links.get_mut(&from) {
            Some(link) => link.handle_answer(sdp).await,
            None => {
                debug!(%from, "answer for unknown peer dropped");
                Ok(())
            }
        }
    }

    async fn on_peer_left(
        &mut self,
        remote: ConnectionId,
        display_name: String,
    ) -> Result<(), LinkError> {
        match self.links.remove(&remote) {
            Some(mut link) => {
                link.close().await?;
                let _ = self.events.send(SessionEvent::PeerDown {
                    remote,
                    display_name,
                });
                Ok(())
            }
            None => {
                debug!(%remote, "peer-left for unknown peer");
                Ok(())
            }
        }
    }

    /// Builds the media link and wires its locally gathered candidates
    /// onto the signaling channel, addressed to the remote.
    async fn open_link(
        &self,
        remote: ConnectionId,
        display_name: String,
        role: PeerRole,
    ) -> Result<PeerLink, LinkError> {
        let (candidate_tx, mut candidate_rx) = mpsc::unbounded_channel();
        let media = self.factory.create_link(remote, candidate_tx).await?;

        let outbound = self.outbound.clone();
        tokio::spawn(async move {
            while let Some(candidate) = candidate_rx.recv().await {
                if outbound
                    .send(ClientMessage::Candidate {
                        candidate,
                        to: remote,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Ok(PeerLink::new(remote, display_name, role, media))
    }

    fn send(&self, message: ClientMessage) -> Result<(), LinkError> {
        self.outbound
            .send(message)
            .map_err(|_| LinkError::SignalingClosed)
    }
}

impl Drop for RoomSession {
    fn drop(&mut self) {
        if !self.left {
            // Cannot await link closure here; engine handles clean up
            // as their reference counts fall. Capture stops now.
            self.local_media.stop_all();
            debug!(connection = %self.connection, "session dropped without an explicit leave");
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
