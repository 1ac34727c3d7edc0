use thiserror::Error;

/// Failures surfaced by the client side of a session. Media access
/// denial is fatal for the whole session; everything else is scoped to
/// one peer link or to the signaling channel.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("local media unavailable: {0}")]
    MediaAccessDenied(String),

    #[error("media engine failure: {0}")]
    Media(#[from] webrtc::Error),

    #[error("signaling channel closed")]
    SignalingClosed,

    #[error("websocket transport failure: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("malformed wire payload: {0}")]
    Codec(#[from] serde_json::Error),
}
