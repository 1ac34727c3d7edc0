use crate::error::ValidationError;
use crate::model::RoomId;
use serde::{Deserialize, Serialize};

/// A chat message in flight. Exists only for the duration of relay
/// dispatch; nothing stores it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub room: RoomId,
    pub display_name: String,
    pub text: String,
    pub timestamp_ms: u64,
}

impl ChatMessage {
    /// A message with an empty room, sender, or body is dropped at the
    /// relay boundary rather than forwarded half-formed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room.is_empty() {
            return Err(ValidationError::EmptyRoomId);
        }
        if self.display_name.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        if self.text.is_empty() {
            return Err(ValidationError::EmptyMessageText);
        }
        Ok(())
    }
}
