//! Client side of a trellis call: per-peer negotiation state machines,
//! candidate buffering, the media-engine seam and the room session that
//! ties them to the signaling channel.

pub mod candidate;
pub mod error;
pub mod link;
pub mod media;
pub mod negotiation;
pub mod session;
pub mod signaling;

pub use candidate::{CandidateDisposition, IceCandidateBuffer};
pub use error::LinkError;
pub use link::PeerLink;
pub use media::{
    LocalMedia, MediaLink, MediaLinkFactory, RtcLinkConfig, RtcMediaLink, RtcMediaLinkFactory,
};
pub use negotiation::{
    AnswerDecision, NegotiationCoordinator, NegotiationState, OfferDecision, PeerRole,
};
pub use session::{RoomSession, SessionConfig, SessionEvent};
pub use signaling::{SignalingChannel, connect};
