mod registry;

pub use registry::{RoomDeparture, RoomPresenceRegistry};
