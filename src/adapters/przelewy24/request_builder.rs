//! Transaction registration payload.
//!
//! Field order of [`RegisterTransaction`] and [`CartLine`] is the order the
//! gateway documents and the order they are serialized in.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::Value;

use crate::domain::payment::signature::fields;
use crate::domain::payment::{
    prorate, CartItem, MerchantSettings, Order, PaymentError, PaymentSession, PricedLine,
    SignatureCodec,
};
use crate::ports::TemplateRenderer;

use super::site::{PaymentLexicon, SiteLinks};

/// Longest cart line name or description accepted by the gateway, in characters.
pub const MAX_LINE_TEXT: usize = 127;

/// Country sent when the order has none.
pub const DEFAULT_COUNTRY: &str = "PL";

/// Language sent when the order has none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Seller category attached to every cart line.
pub const SELLER_CATEGORY: &str = "default";

/// Body of `transaction/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTransaction {
    pub merchant_id: i64,
    pub pos_id: i64,
    pub session_id: String,
    /// Minor units.
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub client: String,
    pub email: String,
    pub country: String,
    pub language: String,
    pub url_return: String,
    pub url_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub cart: Vec<CartLine>,
    pub sign: String,
}

/// One cart line of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub seller_id: i64,
    pub seller_category: String,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    /// Unit price in minor units.
    pub price: i64,
    /// 1-based position, as a string.
    pub number: String,
}

/// Builds signed registration payloads.
pub struct PaymentRequestBuilder {
    settings: MerchantSettings,
    codec: SignatureCodec,
    links: SiteLinks,
    lexicon: PaymentLexicon,
    renderer: Arc<dyn TemplateRenderer>,
}

impl PaymentRequestBuilder {
    pub fn new(
        settings: MerchantSettings,
        links: SiteLinks,
        lexicon: PaymentLexicon,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            codec: SignatureCodec::new(settings.crc().clone()),
            settings,
            links,
            lexicon,
            renderer,
        }
    }

    /// Builds the registration for a freshly created session.
    ///
    /// When the session covers only part of the order, cart lines are
    /// prorated so that they sum to the session amount.
    pub fn build(
        &self,
        order: &Order,
        session: &PaymentSession,
        cart: &[CartItem],
    ) -> Result<RegisterTransaction, PaymentError> {
        let merchant_id = self.settings.merchant_id()?;
        let pos_id = self.settings.pos_id()?;
        let amount = to_minor_units("amount", session.amount)?;
        let session_id = session.hash.as_str().to_string();

        let mut lines = cart
            .iter()
            .map(priced_line)
            .collect::<Result<Vec<_>, _>>()?;
        if session.is_partial_of(order.amount) {
            lines = prorate(&lines, amount);
        }

        let cart = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let text = clip(&line.name);
                CartLine {
                    seller_id: pos_id,
                    seller_category: SELLER_CATEGORY.to_string(),
                    name: text.clone(),
                    description: text,
                    quantity: line.quantity,
                    price: line.unit_price,
                    number: (i + 1).to_string(),
                }
            })
            .collect();

        let sign = self.codec.sign(fields([
            ("sessionId", Value::from(session_id.clone())),
            ("merchantId", Value::from(merchant_id)),
            ("amount", Value::from(amount)),
            ("currency", Value::from(order.currency.clone())),
        ]));

        let status_url = self.links.status_url(&session.hash);

        Ok(RegisterTransaction {
            merchant_id,
            pos_id,
            session_id,
            amount,
            currency: order.currency.clone(),
            description: self.description(order),
            client: order.name.clone(),
            email: order.email.clone(),
            country: order.fields.country().unwrap_or(DEFAULT_COUNTRY).to_string(),
            language: order.fields.lang().unwrap_or(DEFAULT_LANGUAGE).to_string(),
            url_return: status_url.clone(),
            url_status: status_url,
            address: order.fields.address().map(str::to_string),
            zip: order.fields.zip().map(str::to_string),
            city: order.fields.city().map(str::to_string),
            phone: order.fields.phone().map(str::to_string),
            cart,
            sign,
        })
    }

    fn description(&self, order: &Order) -> String {
        let mut vars = HashMap::new();
        vars.insert("order_id", order.id.to_string());
        vars.insert("site_name", self.links.site_name.clone());
        self.renderer.render(&self.lexicon.payment_description, &vars)
    }
}

fn priced_line(item: &CartItem) -> Result<PricedLine, PaymentError> {
    let quantity = item.quantity.trunc().to_i64().ok_or_else(|| {
        PaymentError::InvalidRequest(format!("quantity of '{}' is out of range", item.name))
    })?;
    let unit_price = to_minor_units("price", item.unit_price)?;
    Ok(PricedLine::new(item.name.clone(), unit_price, quantity))
}

/// Converts a major-unit amount to minor units, rounding half away from zero.
pub fn to_minor_units(field: &str, amount: Decimal) -> Result<i64, PaymentError> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| PaymentError::InvalidRequest(format!("{} {} is out of range", field, amount)))
}

fn clip(text: &str) -> String {
    text.chars().take(MAX_LINE_TEXT).collect()
}
