//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable when the advisor has no API key, since
/// the advisor page cannot produce results.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.advisor().is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use secrecy::SecretString;

    use crate::config::AdvisorConfig;
    use crate::routes::test_support::{app, body_text, get, send};

    #[tokio::test]
    async fn test_health_is_ok() {
        let app = app(None);
        let response = send(&app, get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_readiness_depends_on_advisor() {
        let response = send(&app(None), get("/health/ready")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let configured = app(Some(AdvisorConfig {
            api_key: SecretString::from("test-gemini-key"),
            model: "gemini-test".to_string(),
            api_base_url: "http://127.0.0.1:9".to_string(),
        }));
        let response = send(&configured, get("/health/ready")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
