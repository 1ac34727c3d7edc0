use crate::model::{ChatMessage, ConnectionId, RoomId};
use serde::{Deserialize, Serialize};

/// STUN/TURN server entry handed to the media engine. Credentials are
/// optional for plain STUN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// One path-discovery entry. The sdp blob and its placement hints are
/// opaque to the relay; only the media engine interprets them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidatePayload {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

/// Everything a client may send up the signaling channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom {
        room: RoomId,
        display_name: String,
    },
    Offer {
        sdp: String,
        to: ConnectionId,
    },
    Answer {
        sdp: String,
        to: ConnectionId,
    },
    Candidate {
        candidate: CandidatePayload,
        to: ConnectionId,
    },
    SendMessage(ChatMessage),
}

/// Everything the server may push down to a client. Offer, answer and
/// candidate arrive relabeled with the sender in place of the original
/// `to` address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerEvent {
    PeerJoined {
        remote: ConnectionId,
        display_name: String,
        /// True when the receiving side was already in the room and must
        /// open negotiation toward `remote`; false for the newcomer.
        initiator: bool,
    },
    Offer {
        sdp: String,
        from: ConnectionId,
    },
    Answer {
        sdp: String,
        from: ConnectionId,
    },
    Candidate {
        candidate: CandidatePayload,
        from: ConnectionId,
    },
    ReceiveMessage(ChatMessage),
    PeerLeft {
        remote: ConnectionId,
        display_name: String,
    },
}
