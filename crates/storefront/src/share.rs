//! Social share links for product pages.

use solar_direct_core::Product;

/// A share target rendered as a link on the product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Network name shown to the visitor.
    pub network: &'static str,
    /// Fully encoded share URL.
    pub url: String,
}

/// Build Facebook, Twitter and Pinterest share links for `product`.
///
/// `base_url` is the public storefront origin without a trailing slash.
#[must_use]
pub fn share_links(base_url: &str, product: &Product) -> Vec<ShareLink> {
    let page = format!("{base_url}/products/{}", product.id);
    let page = urlencoding::encode(&page);
    let text = format!("Check out this amazing {} at SolarDirect!", product.name);
    let text = urlencoding::encode(&text);
    let media = urlencoding::encode(&product.image);

    vec![
        ShareLink {
            network: "Facebook",
            url: format!("https://www.facebook.com/sharer/sharer.php?u={page}"),
        },
        ShareLink {
            network: "Twitter",
            url: format!("https://twitter.com/intent/tweet?url={page}&text={text}"),
        },
        ShareLink {
            network: "Pinterest",
            url: format!(
                "https://pinterest.com/pin/create/button/?url={page}&media={media}&description={text}"
            ),
        },
    ]
}
