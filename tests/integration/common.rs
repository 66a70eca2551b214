use std::sync::Once;
use std::time::Duration;

use brush::{BindingConfig, ResourceBinding, TransportConfig};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const TOKEN: &str = "integration-token";
pub const AUTH_HEADER: &str = "Token token=integration-token";

static TRACING: Once = Once::new();

/// Install a test-friendly subscriber once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Collection path every test binds to.
pub const LEADS_PATH: &str = "/api/v1/leads";

/// Start a mock server and bind `leads` to it.
pub async fn leads() -> (MockServer, ResourceBinding) {
    leads_with(|config| config).await
}

/// Like [`leads`], with a chance to adjust the configuration first.
pub async fn leads_with(
    configure: impl FnOnce(BindingConfig) -> BindingConfig,
) -> (MockServer, ResourceBinding) {
    init_tracing();

    let server = MockServer::start().await;
    let config = BindingConfig::new(format!("{}{}", server.uri(), LEADS_PATH), TOKEN)
        .expect("mock server URL should be a valid base URL");
    let transport = TransportConfig::builder()
        .with_timeout(Duration::from_secs(5))
        .build();

    let binding = ResourceBinding::with_transport_config(configure(config), transport)
        .expect("binding should attach");
    (server, binding)
}
