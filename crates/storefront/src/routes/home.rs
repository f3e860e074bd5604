//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::cart_badge;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Number of featured products on the home page.
const FEATURED_LIMIT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductView>,
    pub advisor_enabled: bool,
    pub cart_count: u32,
    pub nonce: String,
}

/// Display home page.
#[instrument(skip(state, session, nonce))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<HomeTemplate> {
    let featured = state
        .catalog()
        .featured(FEATURED_LIMIT)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(HomeTemplate {
        featured,
        advisor_enabled: state.advisor().is_some(),
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}
