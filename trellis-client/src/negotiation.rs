use tracing::debug;

/// Which side of the pair opens negotiation. Assigned by the server in
/// `peer-joined`: the member with longer tenure initiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerRole {
    Initiator,
    Responder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    HaveLocalOffer,
    HaveRemoteOffer,
    Stable,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDecision {
    Accept,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerDecision {
    Apply,
    Ignore,
}

/// Per-link negotiation state machine. Holds no media handles; the
/// owning link performs the side effects the decisions call for.
///
/// Collisions resolve by role: an initiator holding an outstanding
/// local offer ignores any incoming offer, while a responder accepts
/// offers from `idle` and `stable`. The roles are asymmetric per pair,
/// so the two sides can never both be waiting on each other.
#[derive(Debug)]
pub struct NegotiationCoordinator {
    role: PeerRole,
    state: NegotiationState,
}

impl NegotiationCoordinator {
    pub fn new(role: PeerRole) -> Self {
        Self {
            role,
            state: NegotiationState::Idle,
        }
    }

    pub fn role(&self) -> PeerRole {
        self.role
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// Records that a local offer went out. Valid from `idle` and, for
    /// renegotiation, from `stable`; anywhere else the call is ignored.
    pub fn mark_offer_sent(&mut self) {
        match self.state {
            NegotiationState::Idle | NegotiationState::Stable => {
                self.state = NegotiationState::HaveLocalOffer;
            }
            other => debug!(?other, "offer-sent ignored in this state"),
        }
    }

    /// Decides what to do with an incoming offer.
    pub fn on_remote_offer(&mut self) -> OfferDecision {
        match (self.role, self.state) {
            (PeerRole::Responder, NegotiationState::Idle)
            | (PeerRole::Responder, NegotiationState::Stable) => {
                self.state = NegotiationState::HaveRemoteOffer;
                OfferDecision::Accept
            }
            (PeerRole::Initiator, NegotiationState::HaveLocalOffer) => {
                debug!("conflicting remote offer ignored, local offer stands");
                OfferDecision::Ignore
            }
            _ => OfferDecision::Ignore,
        }
    }

    /// Records that the answer to an accepted offer went out.
    pub fn mark_answer_sent(&mut self) {
        if self.state == NegotiationState::HaveRemoteOffer {
            self.state = NegotiationState::Stable;
        }
    }

    /// Decides what to do with an incoming answer. Only the side with
    /// an outstanding local offer applies it.
    pub fn on_remote_answer(&mut self) -> AnswerDecision {
        if self.state == NegotiationState::HaveLocalOffer {
            self.state = NegotiationState::Stable;
            AnswerDecision::Apply
        } else {
            AnswerDecision::Ignore
        }
    }

    /// Terminal. Every later event is ignored.
    pub fn close(&mut self) {
        self.state = NegotiationState::Closed;
    }
}
