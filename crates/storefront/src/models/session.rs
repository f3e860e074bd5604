//! Session-related types.
//!
//! The visitor's cart and advisor identity live in the server-side session.
//! Nothing here outlives the session.

use solar_direct_core::Cart;
use tower_sessions::Session;
use uuid::Uuid;

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the per-visitor ID used to gate advisor requests.
    pub const VISITOR_ID: &str = "visitor_id";
}

/// Load the cart from the session, or an empty cart for a new visitor.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// The visitor's ID, assigned on first use.
///
/// A new ID is saved to the store straight away so that concurrent requests
/// carrying the same cookie see it before this request finishes.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn visitor_id(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(id) = session.get::<Uuid>(keys::VISITOR_ID).await? {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    session.insert(keys::VISITOR_ID, id).await?;
    session.save().await?;
    Ok(id)
}
