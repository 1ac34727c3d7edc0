use crate::model::ConnectionId;
use serde::{Deserialize, Serialize};

/// One member of a room as the presence registry sees it. Owned by the
/// room entry it sits in; the display name is claimed by the client and
/// never verified here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Participant {
    pub connection: ConnectionId,
    pub display_name: String,
    pub joined_at_ms: u64,
}
