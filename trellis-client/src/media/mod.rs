mod rtc;

pub use rtc::{RtcLinkConfig, RtcMediaLink, RtcMediaLinkFactory};

use crate::error::LinkError;
use async_trait::async_trait;
use tokio::sync::mpsc;
use trellis_core::{CandidatePayload, ConnectionId};

/// One direct media connection to a remote peer, driven entirely by sdp
/// blobs and candidate payloads. Object-safe so sessions can hold a mix
/// of real engines and test doubles.
#[async_trait]
pub trait MediaLink: Send + Sync {
    /// Produces a local offer and installs it as the local description.
    async fn create_offer(&self) -> Result<String, LinkError>;

    /// Installs the remote offer and returns the local answer, already
    /// installed as the local description.
    async fn accept_offer(&self, sdp: &str) -> Result<String, LinkError>;

    /// Installs the remote answer.
    async fn accept_answer(&self, sdp: &str) -> Result<(), LinkError>;

    /// Feeds one remote candidate to the engine. Callers only invoke
    /// this once the remote description is installed.
    async fn apply_candidate(&self, candidate: &CandidatePayload) -> Result<(), LinkError>;

    async fn close(&self) -> Result<(), LinkError>;
}

/// Creates one link per remote peer. Local tracks are attached here, at
/// construction, so links borrow the track set rather than owning it.
/// Locally gathered candidates flow out through `candidate_out`.
#[async_trait]
pub trait MediaLinkFactory: Send + Sync {
    async fn create_link(
        &self,
        remote: ConnectionId,
        candidate_out: mpsc::UnboundedSender<CandidatePayload>,
    ) -> Result<Box<dyn MediaLink>, LinkError>;
}

/// Boundary to the capture collaborator. Acquisition happens once,
/// before the first link exists; denial aborts the session before
/// anything joined.
#[async_trait]
pub trait LocalMedia: Send + Sync {
    async fn acquire(&self) -> Result<(), LinkError>;

    /// Stops every live track. Synchronous so teardown paths can call
    /// it unconditionally.
    fn stop_all(&self);
}
