pub use trellis_core::ConnectionId;

pub mod model {
    pub use trellis_core::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use trellis_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use trellis_client::*;
}
