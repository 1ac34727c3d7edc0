mod utils;

use tracing::Level;
use trellis_server::RelayDispatcher;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_dispatcher() -> RelayDispatcher {
    init_tracing();
    RelayDispatcher::new()
}
