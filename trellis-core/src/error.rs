use thiserror::Error;

/// Rejection outcomes for malformed input at the relay boundary. Callers
/// log and drop; nothing is reported back to the sender.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("room id is empty")]
    EmptyRoomId,

    #[error("display name is empty")]
    EmptyDisplayName,

    #[error("message text is empty")]
    EmptyMessageText,
}
