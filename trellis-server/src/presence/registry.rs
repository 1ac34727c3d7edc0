use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use trellis_core::{ConnectionId, Participant, RoomId};

/// Everything `leave` tells the caller about one room the connection was
/// removed from.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDeparture {
    pub room: RoomId,
    pub display_name: String,
    pub remaining: Vec<Participant>,
}

/// Authoritative membership table. All reads of "who is in the room" go
/// through here; no other component keeps its own copy.
///
/// The whole map sits behind one mutex: `leave` sweeps every room the
/// connection belongs to and drops emptied rooms in the same step, so
/// per-entry locking would not be enough. No lock is ever held across an
/// await point.
pub struct RoomPresenceRegistry {
    rooms: Mutex<HashMap<RoomId, Vec<Participant>>>,
}

impl RoomPresenceRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Registers the connection in the room and returns the members that
    /// were already present, computed before insertion. A retried join
    /// with the same (connection, room) pair refreshes the stale entry
    /// and returns nothing, so callers introduce each pair at most once.
    pub fn join(
        &self,
        connection: ConnectionId,
        room: &RoomId,
        display_name: &str,
    ) -> Vec<Participant> {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());

        let members = rooms.entry(room.clone()).or_default();
        if let Some(entry) = members.iter_mut().find(|p| p.connection == connection) {
            entry.display_name = display_name.to_string();
            debug!(%connection, %room, "retried join refreshed the existing entry");
            return Vec::new();
        }

        let existing = members.clone();
        members.push(Participant {
            connection,
            display_name: display_name.to_string(),
            joined_at_ms: now_ms(),
        });

        info!(%connection, %room, display_name, "participant joined");
        existing
    }

    /// Removes the connection from every room it belongs to. Rooms whose
    /// member set empties are deleted in the same step.
    pub fn leave(&self, connection: &ConnectionId) -> Vec<RoomDeparture> {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        let mut affected = Vec::new();

        rooms.retain(|room, members| {
            let Some(pos) = members.iter().position(|p| p.connection == *connection) else {
                return true;
            };
            let removed = members.remove(pos);
            info!(%connection, %room, display_name = removed.display_name, "participant left");
            affected.push(RoomDeparture {
                room: room.clone(),
                display_name: removed.display_name,
                remaining: members.clone(),
            });
            if members.is_empty() {
                debug!(%room, "room emptied, dropping it");
                false
            } else {
                true
            }
        });

        affected
    }

    /// Snapshot of the current members of a room. Empty when the room
    /// does not exist.
    pub fn members(&self, room: &RoomId) -> Vec<Participant> {
        let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        rooms.get(room).cloned().unwrap_or_default()
    }

    pub fn room_exists(&self, room: &RoomId) -> bool {
        let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        rooms.len()
    }
}

impl Default for RoomPresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
