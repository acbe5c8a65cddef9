//! Przelewy24 implementation of the `PaymentGateway` port.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{CallbackOutcome, CallbackRequest, MerchantSettings, PaymentError};
use crate::ports::{EventLog, GatewayClient, GatewayEndpoint, OrderProcessor, PaymentGateway, TemplateRenderer};

use super::callback_processor::CallbackProcessor;
use super::environment_base_url;
use super::request_builder::PaymentRequestBuilder;
use super::site::{html_escape, PaymentLexicon, SiteLinks};

/// Provider code.
pub const PROVIDER_CODE: &str = "przelewy24";

/// Collaborators shared by the gateway and its callback processor.
#[derive(Clone)]
pub struct Collaborators {
    pub orders: Arc<dyn OrderProcessor>,
    pub client: Arc<dyn GatewayClient>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub event_log: Arc<dyn EventLog>,
}

/// Przelewy24 payment gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = Przelewy24Gateway::new(settings, links, PaymentLexicon::default(), collaborators);
/// let url = gateway.payment_link(OrderId::new(42)).await?;
/// ```
pub struct Przelewy24Gateway {
    settings: MerchantSettings,
    lexicon: PaymentLexicon,
    orders: Arc<dyn OrderProcessor>,
    client: Arc<dyn GatewayClient>,
    builder: PaymentRequestBuilder,
    callbacks: CallbackProcessor,

    /// Root the buyer is redirected to, ending in `/`.
    base_url: String,
}

impl Przelewy24Gateway {
    pub fn new(
        settings: MerchantSettings,
        links: SiteLinks,
        lexicon: PaymentLexicon,
        collaborators: Collaborators,
    ) -> Self {
        let builder = PaymentRequestBuilder::new(
            settings.clone(),
            links.clone(),
            lexicon.clone(),
            collaborators.renderer,
        );
        let callbacks = CallbackProcessor::new(
            settings.clone(),
            links,
            collaborators.orders.clone(),
            collaborators.client.clone(),
            collaborators.event_log,
        );

        Self {
            base_url: environment_base_url(settings.is_sandbox()).to_string(),
            settings,
            lexicon,
            orders: collaborators.orders,
            client: collaborators.client,
            builder,
            callbacks,
        }
    }

    /// Set a custom redirect root (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }
}

#[async_trait]
impl PaymentGateway for Przelewy24Gateway {
    fn code(&self) -> &'static str {
        PROVIDER_CODE
    }

    fn markup(&self) -> String {
        if self.settings.missing_credentials().is_empty() {
            return String::new();
        }

        format!(
            r#"<span class="error" style="color: red;">{}</span>"#,
            html_escape(&self.lexicon.empty_client_credentials)
        )
    }

    async fn payment_link(&self, order_id: OrderId) -> Result<String, PaymentError> {
        self.settings.ensure_credentials()?;
        self.settings.merchant_id()?;
        self.settings.pos_id()?;

        let order = self.orders.get_order(order_id).await?;
        let cart = self.orders.get_cart(order_id).await?;
        let session = self.orders.create_payment(order.id, order.amount).await?;

        let request = self.builder.build(&order, &session, &cart)?;
        let payload =
            serde_json::to_value(&request).map_err(|e| PaymentError::InvalidRequest(e.to_string()))?;

        let response = self.client.call(GatewayEndpoint::Register, &payload).await?;

        let token = response
            .pointer("/data/token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::warn!(order_id = %order_id, payment_hash = %session.hash, "Registration returned no token");
                PaymentError::MissingToken
            })?;

        tracing::info!(order_id = %order_id, payment_hash = %session.hash, "Przelewy24 transaction registered");

        Ok(format!("{}trnRequest/{}", self.base_url, token))
    }

    async fn handle_callback(&self, request: CallbackRequest) -> CallbackOutcome {
        self.callbacks.process(&request).await
    }
}
