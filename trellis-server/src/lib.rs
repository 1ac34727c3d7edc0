mod chat;
mod dispatcher;
mod presence;
mod relay;
mod ws;

pub use chat::ChatRelay;
pub use dispatcher::RelayDispatcher;
pub use presence::{RoomDeparture, RoomPresenceRegistry};
pub use relay::SignalingRelay;
pub use ws::ws_handler;
