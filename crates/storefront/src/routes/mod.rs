//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (advisor configured)
//!
//! # Products
//! GET  /products               - Catalog (?category=&q=)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (forms, Post/Redirect/Get)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit, redirect to /cart
//! POST /cart/update            - Change quantity by delta, redirect to /cart
//! POST /cart/remove            - Remove entry, redirect to /cart
//! GET  /cart/count             - Cart count (plain text)
//!
//! # Advisor
//! GET  /advisor                - Advisor form
//! POST /advisor                - Run the advisor (rate limited)
//!
//! # Company pages
//! GET  /about                  - About page
//! GET  /gallery                - Installation gallery (?kind=)
//! GET  /contact                - Contact form
//! POST /contact                - Accept a contact message, redirect to /contact?sent=true
//! ```

pub mod advisor;
pub mod cart;
pub mod health;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::Request,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::{
    advisor_rate_limiter, create_session_layer, csp_nonce_middleware, request_id_middleware,
    security_headers_middleware,
};
use crate::models::session::load_cart;
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route(
            "/advisor",
            get(advisor::show).merge(post(advisor::submit).layer(advisor_rate_limiter())),
        )
        .route("/about", get(pages::about))
        .route("/gallery", get(pages::gallery))
        .route("/contact", get(pages::contact).post(pages::contact_submit))
}

/// Build the complete application with middleware.
///
/// Layers are listed innermost first. The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the rate limiter
/// can fall back to the peer address.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(csp_nonce_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Number of items in the visitor's cart, for the header badge.
pub(crate) async fn cart_badge(session: &Session) -> Result<u32> {
    Ok(load_cart(session).await?.count())
}
