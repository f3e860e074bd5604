//! Company page route handlers: about, installation gallery and contact.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::gallery::{InstallKind, Installation, installations};
use crate::middleware::CspNonce;
use crate::routes::cart_badge;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub cart_count: u32,
    pub nonce: String,
}

/// Display the about page.
#[instrument(skip(session, nonce))]
pub async fn about(session: Session, CspNonce(nonce): CspNonce) -> Result<AboutTemplate> {
    Ok(AboutTemplate {
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}

/// A gallery filter tab.
#[derive(Clone)]
pub struct GalleryTab {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Gallery query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub kind: Option<String>,
}

impl GalleryQuery {
    /// Missing, empty, or `all` means every installation.
    fn kind(&self) -> Result<Option<InstallKind>> {
        match self.kind.as_deref().map(str::trim) {
            None | Some("" | "all") => Ok(None),
            Some(slug) => slug
                .parse::<InstallKind>()
                .map(Some)
                .map_err(|e| AppError::BadRequest(e.to_string())),
        }
    }
}

/// Gallery page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/gallery.html")]
pub struct GalleryTemplate {
    pub installations: Vec<&'static Installation>,
    pub tabs: Vec<GalleryTab>,
    pub cart_count: u32,
    pub nonce: String,
}

/// Display the installation gallery.
#[instrument(skip(session, nonce))]
pub async fn gallery(
    session: Session,
    Query(query): Query<GalleryQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<GalleryTemplate> {
    let kind = query.kind()?;

    let tabs = std::iter::once(GalleryTab {
        slug: "all",
        label: "All Projects",
        active: kind.is_none(),
    })
    .chain(InstallKind::ALL.into_iter().map(|k| GalleryTab {
        slug: k.slug(),
        label: k.label(),
        active: kind == Some(k),
    }))
    .collect();

    Ok(GalleryTemplate {
        installations: installations(kind),
        tabs,
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields, returning a message for the visitor.
    fn validate(&self) -> std::result::Result<(), &'static str> {
        if !is_valid_email(self.email.trim()) {
            return Err("Please enter a valid email address.");
        }
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err("Name and message are required.");
        }
        Ok(())
    }
}

/// Contact page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(default)]
    pub sent: bool,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub form: ContactForm,
    pub sent: bool,
    pub error: Option<&'static str>,
    pub cart_count: u32,
    pub nonce: String,
}

/// Display the contact page.
#[instrument(skip(session, nonce))]
pub async fn contact(
    session: Session,
    Query(query): Query<ContactQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<ContactTemplate> {
    Ok(ContactTemplate {
        form: ContactForm::default(),
        sent: query.sent,
        error: None,
        cart_count: cart_badge(&session).await?,
        nonce,
    })
}

/// Accept a contact message.
///
/// Messages are logged for the support team; there is no mail delivery.
#[instrument(skip(session, nonce, form))]
pub async fn contact_submit(
    session: Session,
    CspNonce(nonce): CspNonce,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    if let Err(message) = form.validate() {
        let template = ContactTemplate {
            form,
            sent: false,
            error: Some(message),
            cart_count: cart_badge(&session).await?,
            nonce,
        };
        return Ok((StatusCode::BAD_REQUEST, template).into_response());
    }

    tracing::info!(
        subject = %form.subject.trim(),
        message_len = form.message.trim().len(),
        "Contact message received"
    );
    add_breadcrumb("contact", "Sent contact message", None);

    Ok(Redirect::to("/contact?sent=true").into_response())
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
