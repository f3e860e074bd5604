//! Solar advisor route handlers.
//!
//! `POST /advisor` validates the form, claims the visitor's in-flight slot,
//! and makes one model call. The page is rendered in every case. The status
//! code tells the states apart:
//!
//! | Status | Meaning |
//! |--------|---------|
//! | 200 | result shown, or the model produced no usable result |
//! | 400 | form input invalid |
//! | 409 | an earlier request from this visitor is still running |
//! | 503 | advisor not configured |

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use solar_direct_core::{AdvisorQuery, AdvisorResult};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session::visitor_id;
use crate::routes::cart_badge;
use crate::state::AppState;

/// Notice shown when the model produced nothing usable.
pub const NO_RESULT_NOTICE: &str =
    "The advisor could not produce a recommendation right now. Please try again later.";

/// Notice shown when a second request arrives while one is pending.
pub const BUSY_NOTICE: &str =
    "Still working on your previous request. Please wait for it to finish.";

/// Notice shown when no API key is configured.
pub const DISABLED_NOTICE: &str = "The solar advisor is currently unavailable.";

/// Advisor form submission. Values are kept as text so they can be echoed
/// back when validation fails.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorForm {
    pub monthly_bill: String,
    pub location: String,
    pub roof_area: String,
    #[serde(default)]
    pub property_type: String,
}

impl Default for AdvisorForm {
    fn default() -> Self {
        Self {
            monthly_bill: "150".to_string(),
            location: "San Francisco, CA".to_string(),
            roof_area: "50".to_string(),
            property_type: "residential".to_string(),
        }
    }
}

impl AdvisorForm {
    /// Whether the commercial option is selected.
    #[must_use]
    pub fn is_commercial(&self) -> bool {
        self.property_type.eq_ignore_ascii_case("commercial")
    }

    /// Validate into a query, or a message for the visitor.
    fn to_query(&self) -> std::result::Result<AdvisorQuery, String> {
        let bill = Decimal::from_str(self.monthly_bill.trim())
            .map_err(|_| "monthly bill must be a number".to_string())?;
        let roof_area = self
            .roof_area
            .trim()
            .parse::<f64>()
            .map_err(|_| "roof area must be a number".to_string())?;

        AdvisorQuery::new(bill, &self.location, roof_area, self.is_commercial())
            .map_err(|e| e.to_string())
    }
}

/// Advisor page template.
#[derive(Template, WebTemplate)]
#[template(path = "advisor/show.html")]
pub struct AdvisorTemplate {
    pub form: AdvisorForm,
    pub result: Option<AdvisorResult>,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
    pub enabled: bool,
    pub cart_count: u32,
    pub nonce: String,
}

/// Display the advisor form with default inputs.
///
/// Only reads the session, so a first visit stores nothing.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<AdvisorTemplate> {
    let enabled = state.advisor().is_some();

    Ok(AdvisorTemplate {
        form: AdvisorForm::default(),
        result: None,
        error: None,
        notice: (!enabled).then_some(DISABLED_NOTICE),
        enabled,
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}

/// Run the advisor and render the result.
#[instrument(skip(state, session, nonce))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    Form(form): Form<AdvisorForm>,
) -> Result<Response> {
    let cart_count = cart_badge(&session).await?;
    let page = |form: AdvisorForm| AdvisorTemplate {
        form,
        result: None,
        error: None,
        notice: None,
        enabled: state.advisor().is_some(),
        cart_count,
        nonce: nonce.clone(),
    };

    let Some(advisor) = state.advisor() else {
        let template = AdvisorTemplate {
            notice: Some(DISABLED_NOTICE),
            ..page(form)
        };
        return Ok((StatusCode::SERVICE_UNAVAILABLE, template).into_response());
    };

    let query = match form.to_query() {
        Ok(query) => query,
        Err(message) => {
            tracing::debug!(error = %message, "Advisor form rejected");
            let template = AdvisorTemplate {
                error: Some(message),
                ..page(form)
            };
            return Ok((StatusCode::BAD_REQUEST, template).into_response());
        }
    };

    let visitor = visitor_id(&session).await?;
    let Some(_guard) = state.advisor_gate().try_acquire(visitor) else {
        tracing::info!(%visitor, "Advisor request refused while another is in flight");
        let template = AdvisorTemplate {
            notice: Some(BUSY_NOTICE),
            ..page(form)
        };
        return Ok((StatusCode::CONFLICT, template).into_response());
    };

    add_breadcrumb("advisor", "Requested recommendation", None);
    let result = advisor.recommend(&query).await;

    let template = AdvisorTemplate {
        notice: result.is_none().then_some(NO_RESULT_NOTICE),
        result,
        ..page(form)
    };
    Ok(template.into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use secrecy::SecretString;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::AdvisorConfig;
    use crate::routes::test_support::{app, body_text, get, post_form, send, session_cookie};

    const FORM: &str = "monthly_bill=150&location=San+Francisco%2C+CA&roof_area=50&property_type=residential";

    fn advisor_config(server: &MockServer) -> AdvisorConfig {
        AdvisorConfig {
            api_key: SecretString::from("test-gemini-key"),
            model: "gemini-test".to_string(),
            api_base_url: server.uri(),
        }
    }

    fn model_reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
    }

    #[test]
    fn test_form_validation() {
        let form = AdvisorForm::default();
        let query = form.to_query().unwrap();
        assert_eq!(query.monthly_bill, Decimal::new(150, 0));
        assert_eq!(query.location, "San Francisco, CA");
        assert!(!query.is_commercial);

        let bad = AdvisorForm {
            monthly_bill: "lots".to_string(),
            ..AdvisorForm::default()
        };
        assert!(bad.to_query().is_err());

        let blank = AdvisorForm {
            location: "   ".to_string(),
            ..AdvisorForm::default()
        };
        assert!(blank.to_query().is_err());

        let commercial = AdvisorForm {
            property_type: "Commercial".to_string(),
            ..AdvisorForm::default()
        };
        assert!(commercial.to_query().unwrap().is_commercial);
    }

    #[tokio::test]
    async fn test_show_prefills_defaults() {
        let response = send(&app(None), get("/advisor")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_none());
        let body = body_text(response).await;
        assert!(body.contains("value=\"150\""));
        assert!(body.contains("value=\"San Francisco, CA\""));
        assert!(body.contains("value=\"50\""));
        assert!(body.contains(DISABLED_NOTICE));
    }

    #[tokio::test]
    async fn test_submit_without_api_key_is_unavailable() {
        let response = send(&app(None), post_form("/advisor", FORM, None)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_submit_invalid_input_is_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(model_reply("{}"))
            .expect(0)
            .mount(&server)
            .await;

        let app = app(Some(advisor_config(&server)));
        let form = "monthly_bill=-5&location=Austin&roof_area=50&property_type=residential";
        let response = send(&app, post_form("/advisor", form, None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("value=\"Austin\""));
    }

    #[tokio::test]
    async fn test_submit_renders_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(model_reply(
                "```json\n{\"panelsNeeded\": 11.2, \"estimatedCost\": 18500, \"annualSavings\": 1650.5, \"paybackPeriod\": 11.21, \"recommendation\": \"Go with a 5 kW array.\"}\n```",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(Some(advisor_config(&server)));
        let response = send(&app, post_form("/advisor", FORM, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("data-field=\"panels\">12<"));
        assert!(body.contains("$18,500.00"));
        assert!(body.contains("$1,650.50"));
        assert!(body.contains("11.2 years"));
        assert!(body.contains("Go with a 5 kW array."));
    }

    #[tokio::test]
    async fn test_submit_with_bad_model_output_shows_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(model_reply("Sorry, I can't do that."))
            .mount(&server)
            .await;

        let app = app(Some(advisor_config(&server)));
        let response = send(&app, post_form("/advisor", FORM, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(NO_RESULT_NOTICE));
    }

    #[tokio::test]
    async fn test_overlapping_submission_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                model_reply(
                    "{\"panelsNeeded\": 10, \"estimatedCost\": 1, \"annualSavings\": 1, \"paybackPeriod\": 1, \"recommendation\": \"ok\"}",
                )
                .set_delay(Duration::from_millis(500)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let app = app(Some(advisor_config(&server)));
        let response = send(&app, post_form("/cart/add", "product_id=p1", None)).await;
        let cookie = session_cookie(&response).unwrap();

        let first = {
            let app = app.clone();
            let cookie = cookie.clone();
            tokio::spawn(async move { send(&app, post_form("/advisor", FORM, Some(&cookie))).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = send(&app, post_form("/advisor", FORM, Some(&cookie))).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert!(body_text(second).await.contains(BUSY_NOTICE));

        let first = first.await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
    }
}
