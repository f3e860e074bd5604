//! End-to-end test harness for the SolarDirect storefront.
//!
//! [`TestServer::start`] boots the real router on an ephemeral port with an
//! optional mock Gemini endpoint. Tests drive it with a cookie-aware
//! `reqwest` client, so the session cookie flows exactly as in a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p solar-direct-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::Client;
use secrecy::SecretString;
use solar_direct_storefront::catalog::Catalog;
use solar_direct_storefront::config::{AdvisorConfig, StorefrontConfig};
use solar_direct_storefront::routes;
use solar_direct_storefront::state::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::{MockServer, ResponseTemplate};

/// A storefront running in the background for one test.
pub struct TestServer {
    base_url: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront. Pass a mock server to enable the advisor.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the state cannot be built.
    pub async fn start(model: Option<&MockServer>) -> Self {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        let base_url = format!("http://{addr}");

        let config = StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: addr.port(),
            base_url: base_url.clone(),
            advisor: model.map(|server| AdvisorConfig {
                api_key: SecretString::from("integration-test-key"),
                model: "gemini-test".to_string(),
                api_base_url: server.uri(),
            }),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let state = AppState::new(config, Catalog::solar_direct()).expect("app state");
        let app = routes::app(state);

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("server error");
        });

        Self { base_url, handle }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A client that keeps cookies between requests, like one browser tab.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized.
#[must_use]
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A `generateContent` response whose single candidate says `text`.
#[must_use]
pub fn model_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 60}
    }))
}

/// Form fields for the default advisor inputs.
pub const DEFAULT_ADVISOR_FORM: [(&str, &str); 4] = [
    ("monthly_bill", "150"),
    ("location", "San Francisco, CA"),
    ("roof_area", "50"),
    ("property_type", "residential"),
];
