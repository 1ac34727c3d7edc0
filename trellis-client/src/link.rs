use crate::candidate::{CandidateDisposition, IceCandidateBuffer};
use crate::error::LinkError;
use crate::media::MediaLink;
use crate::negotiation::{AnswerDecision, NegotiationCoordinator, OfferDecision, PeerRole};
use tracing::debug;
use trellis_core::{CandidatePayload, ConnectionId};

/// Everything the session keeps per remote peer: the negotiation state
/// machine, the candidate holding pen and the media engine handle.
/// Exactly one exists per (local, remote) pair.
pub struct PeerLink {
    remote: ConnectionId,
    display_name: String,
    coordinator: NegotiationCoordinator,
    buffer: IceCandidateBuffer,
    media: Box<dyn MediaLink>,
}

impl PeerLink {
    pub fn new(
        remote: ConnectionId,
        display_name: String,
        role: PeerRole,
        media: Box<dyn MediaLink>,
    ) -> Self {
        Self {
            remote,
            display_name,
            coordinator: NegotiationCoordinator::new(role),
            buffer: IceCandidateBuffer::new(),
            media,
        }
    }

    pub fn remote(&self) -> ConnectionId {
        self.remote
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
    }

    pub fn role(&self) -> PeerRole {
        self.coordinator.role()
    }

    /// Initiator entry point: produce the opening offer. Responders get
    /// nothing and wait for the remote offer instead.
    pub async fn start(&mut self) -> Result<Option<String>, LinkError> {
        if self.coordinator.role() != PeerRole::Initiator {
            return Ok(None);
        }
        let sdp = self.media.create_offer().await?;
        self.coordinator.mark_offer_sent();
        Ok(Some(sdp))
    }

    /// Handles an incoming offer; returns the answer sdp when the state
    /// machine accepts it. Buffered candidates are applied right after
    /// the remote description lands, in arrival order.
    pub async fn handle_offer(&mut self, sdp: &str) -> Result<Option<String>, LinkError> {
        match self.coordinator.on_remote_offer() {
            OfferDecision::Ignore => {
                debug!(remote = %self.remote, "ignoring remote offer");
                Ok(None)
            }
            OfferDecision::Accept => {
                let answer = self.media.accept_offer(sdp).await?;
                self.flush_buffered().await?;
                self.coordinator.mark_answer_sent();
                Ok(Some(answer))
            }
        }
    }

    pub async fn handle_answer(&mut self, sdp: &str) -> Result<(), LinkError> {
        match self.coordinator.on_remote_answer() {
            AnswerDecision::Ignore => {
                debug!(remote = %self.remote, "ignoring remote answer");
                Ok(())
            }
            AnswerDecision::Apply => {
                self.media.accept_answer(sdp).await?;
                self.flush_buffered().await
            }
        }
    }

    pub async fn handle_candidate(&mut self, candidate: CandidatePayload) -> Result<(), LinkError> {
        match self.buffer.push(candidate) {
            CandidateDisposition::Queued | CandidateDisposition::Discarded => Ok(()),
            CandidateDisposition::ApplyNow(candidate) => {
                self.media.apply_candidate(&candidate).await
            }
        }
    }

    /// Tears the link down from any state. Queued candidates are gone;
    /// a late signal for this remote finds the machine closed.
    pub async fn close(&mut self) -> Result<(), LinkError> {
        self.coordinator.close();
        self.buffer.close();
        self.media.close().await
    }

    async fn flush_buffered(&mut self) -> Result<(), LinkError> {
        for candidate in self.buffer.drain_on_remote_ready() {
            self.media.apply_candidate(&candidate).await?;
        }
        Ok(())
    }
}
