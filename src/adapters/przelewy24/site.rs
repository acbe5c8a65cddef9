//! Shop-side URLs and localized strings used by the integration.

use crate::domain::foundation::PaymentHash;
use crate::domain::payment::{LandingPage, PAYMENT_HASH_PARAM};

/// Path prefix of every shop-side route of this integration.
pub const ROUTE_PREFIX: &str = "commerce/przelewy";

/// Shop URLs the gateway and the buyer are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLinks {
    /// Absolute site URL, used for URLs the gateway calls.
    site_url: String,

    /// Base path or URL, used for buyer redirects.
    base_url: String,

    pub site_name: String,
}

impl SiteLinks {
    pub fn new(
        site_url: impl Into<String>,
        base_url: impl Into<String>,
        site_name: impl Into<String>,
    ) -> Self {
        Self {
            site_url: with_trailing_slash(site_url.into()),
            base_url: with_trailing_slash(base_url.into()),
            site_name: site_name.into(),
        }
    }

    /// Status URL registered with the gateway as both `urlReturn` and `urlStatus`.
    pub fn status_url(&self, hash: &PaymentHash) -> String {
        format!(
            "{}{}/payment-process?{}={}",
            self.site_url, ROUTE_PREFIX, PAYMENT_HASH_PARAM, hash
        )
    }

    /// Buyer-facing landing page URL.
    pub fn landing_url(&self, page: LandingPage, hash: &PaymentHash) -> String {
        format!(
            "{}{}/{}?{}={}",
            self.base_url,
            ROUTE_PREFIX,
            page.path(),
            PAYMENT_HASH_PARAM,
            hash
        )
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Localized strings. Templates use `[+name+]` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLexicon {
    /// Transaction description; receives `order_id` and `site_name`.
    pub payment_description: String,

    /// Shown at checkout when client credentials are missing.
    pub empty_client_credentials: String,
}

impl Default for PaymentLexicon {
    fn default() -> Self {
        Self {
            payment_description: "Payment for order #[+order_id+] on [+site_name+]".to_string(),
            empty_client_credentials:
                "Przelewy24: fill in merchant ID, POS ID and API key in the payment settings"
                    .to_string(),
        }
    }
}

/// Escapes text for embedding in HTML.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> PaymentHash {
        PaymentHash::new("abc123").unwrap()
    }

    #[test]
    fn status_url_uses_site_url() {
        let links = SiteLinks::new("https://shop.example.com", "/", "Shop");
        assert_eq!(
            links.status_url(&hash()),
            "https://shop.example.com/commerce/przelewy/payment-process?paymentHash=abc123"
        );
    }

    #[test]
    fn landing_urls_use_base_url() {
        let links = SiteLinks::new("https://shop.example.com/", "/shop", "Shop");
        assert_eq!(
            links.landing_url(LandingPage::Success, &hash()),
            "/shop/commerce/przelewy/payment-success?paymentHash=abc123"
        );
        assert_eq!(
            links.landing_url(LandingPage::Failed, &hash()),
            "/shop/commerce/przelewy/payment-failed?paymentHash=abc123"
        );
    }

    #[test]
    fn html_escape_covers_markup_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
    }
}
