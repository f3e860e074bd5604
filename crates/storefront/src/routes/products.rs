//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use solar_direct_core::{Category, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::cart_badge;
use crate::share::{ShareLink, share_links};
use crate::state::AppState;

/// Number of related products shown on a detail page.
const RELATED_LIMIT: usize = 3;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub currency: &'static str,
    pub category_slug: &'static str,
    pub category_label: &'static str,
    pub image: String,
    pub efficiency: String,
    pub warranty: String,
    pub rating: f32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            currency: product.price.currency_code.code(),
            category_slug: product.category.slug(),
            category_label: product.category.label(),
            image: product.image.clone(),
            efficiency: product.efficiency.clone(),
            warranty: product.warranty.clone(),
            rating: product.rating,
        }
    }
}

/// A category filter tab.
#[derive(Clone)]
pub struct CategoryTab {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Build the category tabs: "all" first, then each category.
fn category_tabs(active: Option<Category>) -> Vec<CategoryTab> {
    std::iter::once(CategoryTab {
        slug: "all",
        label: "All Products",
        active: active.is_none(),
    })
    .chain(Category::ALL.into_iter().map(|c| CategoryTab {
        slug: c.slug(),
        label: c.label(),
        active: active == Some(c),
    }))
    .collect()
}

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

impl CatalogQuery {
    /// Parse the category filter. Missing, empty, or `all` means no filter.
    fn category(&self) -> Result<Option<Category>> {
        match self.category.as_deref().map(str::trim) {
            None | Some("" | "all") => Ok(None),
            Some(slug) => slug
                .parse::<Category>()
                .map(Some)
                .map_err(|e| AppError::BadRequest(e.to_string())),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub tabs: Vec<CategoryTab>,
    pub active_slug: &'static str,
    pub query: String,
    pub cart_count: u32,
    pub nonce: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
    pub share_links: Vec<ShareLink>,
    pub cart_count: u32,
    pub nonce: String,
}

/// Display product listing page.
#[instrument(skip(state, session, nonce))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<ProductsIndexTemplate> {
    let category = query.category()?;
    let search = query.q.clone().unwrap_or_default();

    let products = state
        .catalog()
        .search(category, &search)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductsIndexTemplate {
        products,
        tabs: category_tabs(category),
        active_slug: category.map_or("all", |c| c.slug()),
        query: search,
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}

/// Display product detail page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    CspNonce(nonce): CspNonce,
) -> Result<ProductShowTemplate> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    crate::error::add_breadcrumb(
        "navigation",
        "Viewed product page",
        Some(&[("product_id", id.as_str())]),
    );

    let related_products = state
        .catalog()
        .related(product, RELATED_LIMIT)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductShowTemplate {
        product: ProductView::from(product),
        related_products,
        share_links: share_links(&state.config().base_url, product),
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::routes::test_support::{app, body_text, get, send};

    #[test]
    fn test_category_query_parsing() {
        let parse = |c: Option<&str>| {
            CatalogQuery {
                category: c.map(str::to_string),
                q: None,
            }
            .category()
        };
        assert_eq!(parse(None).unwrap(), None);
        assert_eq!(parse(Some("all")).unwrap(), None);
        assert_eq!(parse(Some("")).unwrap(), None);
        assert_eq!(parse(Some("kits")).unwrap(), Some(Category::Kits));
        assert!(matches!(parse(Some("windmills")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_tabs_mark_active_category() {
        let tabs = category_tabs(Some(Category::Batteries));
        assert_eq!(tabs.len(), 5);
        let active: Vec<&str> = tabs.iter().filter(|t| t.active).map(|t| t.slug).collect();
        assert_eq!(active, ["batteries"]);
        assert!(category_tabs(None).first().unwrap().active);
    }

    #[tokio::test]
    async fn test_index_lists_all_products() {
        let response = send(&app(None), get("/products")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("EcoPower 450W Monocrystalline"));
        assert!(body.contains("Compact Portable Solar 100W"));
        assert!(body.contains("$5,499.00"));
    }

    #[tokio::test]
    async fn test_index_filters_by_category_and_query() {
        let response = send(&app(None), get("/products?category=panels&q=bifacial")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("MaxEfficiency 550W Bifacial"));
        assert!(!body.contains("EcoPower 450W Monocrystalline"));
        assert!(!body.contains("SunGuardian Battery 10kWh"));
    }

    #[tokio::test]
    async fn test_index_empty_state() {
        let response = send(&app(None), get("/products?q=windmill")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No products match"));
    }

    #[tokio::test]
    async fn test_index_unknown_category_is_bad_request() {
        let response = send(&app(None), get("/products?category=windmills")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_show_renders_detail() {
        let response = send(&app(None), get("/products/p3")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let csp = response
            .headers()
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_text(response).await;
        assert!(body.contains("SmartFlow Hybrid Inverter 5kW"));
        assert!(body.contains("97.6%"));
        assert!(body.contains("itemprop=\"priceCurrency\" content=\"USD\""));
        assert!(body.contains("12 Years"));
        assert!(body.contains("name=\"product_id\" value=\"p3\""));
        assert!(body.contains("https://www.facebook.com/sharer/sharer.php?u="));
        assert!(csp.contains("'nonce-"));
    }

    #[tokio::test]
    async fn test_show_unknown_product_is_not_found() {
        let response = send(&app(None), get("/products/p99")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
