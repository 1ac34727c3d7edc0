pub mod error;
pub mod model;

pub use error::ValidationError;
pub use model::{
    CandidatePayload, ChatMessage, ClientMessage, ConnectionId, IceServerConfig, Participant,
    RoomId, ServerEvent,
};
