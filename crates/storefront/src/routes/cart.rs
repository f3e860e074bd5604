//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation is a plain form
//! POST that loads the cart, applies one `Cart` operation, stores it back and
//! redirects to `/cart`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use solar_direct_core::{Cart, CartEntry, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session::{load_cart, save_cart};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub category_label: &'static str,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.product.id.to_string(),
            name: entry.product.name.clone(),
            image: entry.product.image.clone(),
            category_label: entry.product.category.label(),
            quantity: entry.quantity,
            price: entry.product.price.display(),
            line_price: entry.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
    pub nonce: String,
}

/// Display cart page.
#[instrument(skip(session, nonce))]
pub async fn show(session: Session, CspNonce(nonce): CspNonce) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        cart_count: cart.count(),
        cart: CartView::from(&cart),
        nonce,
    })
}

/// Add one unit of a product to the cart.
///
/// Unknown products are rejected with 404 before the session is touched.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut cart = load_cart(&session).await?;
    cart.add(product);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added product", Some(&[("product_id", id.as_str())]));
    tracing::debug!(count = cart.count(), "Cart updated");

    Ok(Redirect::to("/cart"))
}

/// Change an entry's quantity by `delta` (never below 1).
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&ProductId::new(form.product_id), form.delta);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Remove an entry from the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse> {
    let id = ProductId::new(form.product_id);
    let mut cart = load_cart(&session).await?;
    if cart.remove(&id) {
        save_cart(&session, &cart).await?;
        add_breadcrumb("cart", "Removed product", Some(&[("product_id", id.as_str())]));
    }

    Ok(Redirect::to("/cart"))
}

/// Cart count as plain text, for the header badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<String> {
    Ok(load_cart(&session).await?.count().to_string())
}
