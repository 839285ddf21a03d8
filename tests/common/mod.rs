// Shared harness: mock providers, canned components and a router client

pub mod client;
pub mod fixtures;
pub mod test_router;
pub mod upstream;

use std::sync::Once;

static INIT: Once = Once::new();

/// Routes service logs to the test writer once per binary.
pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}
