mod chat;
mod connection;
mod participant;
mod room;
mod signaling;

pub use chat::ChatMessage;
pub use connection::ConnectionId;
pub use participant::Participant;
pub use room::RoomId;
pub use signaling::{CandidatePayload, ClientMessage, IceServerConfig, ServerEvent};
