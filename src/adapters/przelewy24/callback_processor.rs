//! Status URL handling.
//!
//! A request on the status URL is either the buyer's browser coming back
//! (empty body) or the gateway's server-to-server notification (JSON body).
//!
//! Notifications pass these gates in order, and each gate stops processing
//! on failure:
//!
//! 1. payment hash in the query is well formed
//! 2. all required notification fields are present
//! 3. the notification signature matches
//! 4. the notification belongs to the session named by the hash
//! 5. the gateway confirms the transaction through `transaction/verify`
//! 6. the order collaborator applies the payment
//!
//! A notification is never applied before the gateway has confirmed it.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::PaymentHash;
use crate::domain::payment::signature::{fields, SIGN_FIELD};
use crate::domain::payment::{
    CallbackError, CallbackOutcome, CallbackRequest, LandingPage, MerchantSettings, Notification,
    SignatureCodec,
};
use crate::ports::{EventLog, GatewayClient, GatewayEndpoint, OrderProcessor, PaymentApplied, Severity};

use super::site::{html_escape, SiteLinks};
use super::{CALLBACK_START_CONTEXT, EVENT_CONTEXT};

/// Status reported by `transaction/verify` for a confirmed transaction.
pub const VERIFIED_STATUS: &str = "success";

/// Runs the callback state machine.
pub struct CallbackProcessor {
    settings: MerchantSettings,
    codec: SignatureCodec,
    links: SiteLinks,
    orders: Arc<dyn OrderProcessor>,
    client: Arc<dyn GatewayClient>,
    event_log: Arc<dyn EventLog>,
}

impl CallbackProcessor {
    pub fn new(
        settings: MerchantSettings,
        links: SiteLinks,
        orders: Arc<dyn OrderProcessor>,
        client: Arc<dyn GatewayClient>,
        event_log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            codec: SignatureCodec::new(settings.crc().clone()),
            settings,
            links,
            orders,
            client,
            event_log,
        }
    }

    /// Processes one request on the status URL.
    ///
    /// Never fails: every error ends in [`CallbackOutcome::Rejected`].
    pub async fn process(&self, request: &CallbackRequest) -> CallbackOutcome {
        let hash = match request.payment_hash() {
            Ok(hash) => hash,
            Err(err) => return self.reject(None, err),
        };

        if self.settings.is_debug() {
            let body = String::from_utf8_lossy(request.raw_body());
            self.event_log.log_event(
                Severity::Info,
                &format!("Callback data: <pre>{}</pre>", html_escape(&body)),
                CALLBACK_START_CONTEXT,
            );
        }

        let result = if request.is_synchronous_return() {
            self.synchronous_return(&hash).await
        } else {
            self.notification(&hash, request.raw_body()).await
        };

        match result {
            Ok(page) => CallbackOutcome::Redirect {
                page,
                location: self.links.landing_url(page, &hash),
            },
            Err(err) => self.reject(Some(&hash), err),
        }
    }

    /// The buyer returned; show success only for a session already paid.
    async fn synchronous_return(&self, hash: &PaymentHash) -> Result<LandingPage, CallbackError> {
        let session = self.orders.load_payment_by_hash(hash).await?;

        tracing::debug!(payment_hash = %hash, paid = session.paid, "Buyer returned from gateway");

        Ok(if session.paid {
            LandingPage::Success
        } else {
            LandingPage::Failed
        })
    }

    async fn notification(&self, hash: &PaymentHash, body: &[u8]) -> Result<LandingPage, CallbackError> {
        let notification = Notification::parse(body)?;

        if !self.codec.verify(notification.fields()) {
            return Err(CallbackError::SignatureMismatch);
        }

        if notification.session_id() != Some(hash.as_str()) {
            return Err(CallbackError::malformed("sessionId does not match paymentHash"));
        }

        let amount = notification.amount()?;

        self.verify_with_gateway(&notification).await?;

        let session = self.orders.load_payment_by_hash(hash).await?;

        let applied = self
            .orders
            .process_payment(&session, amount)
            .await
            .map_err(|e| CallbackError::ProcessingFailed(e.to_string()))?;

        match applied {
            PaymentApplied::Applied => {
                tracing::info!(payment_hash = %hash, amount = %amount, "Przelewy24 payment confirmed");
            }
            PaymentApplied::AlreadyPaid => {
                tracing::info!(payment_hash = %hash, "Duplicate Przelewy24 notification");
            }
        }

        Ok(LandingPage::Success)
    }

    /// Asks the gateway to confirm the notified transaction.
    async fn verify_with_gateway(&self, notification: &Notification) -> Result<(), CallbackError> {
        let field = |name: &str| notification.get(name).cloned().unwrap_or(Value::Null);

        let sign = self.codec.sign(fields([
            ("sessionId", field("sessionId")),
            ("orderId", field("orderId")),
            ("amount", field("amount")),
            ("currency", field("currency")),
        ]));

        let mut payload = fields([
            ("merchantId", field("merchantId")),
            ("posId", field("posId")),
            ("sessionId", field("sessionId")),
            ("amount", field("amount")),
            ("currency", field("currency")),
            ("orderId", field("orderId")),
        ]);
        payload.insert(SIGN_FIELD.to_string(), Value::String(sign));

        let response = self
            .client
            .call(GatewayEndpoint::Verify, &Value::Object(payload))
            .await?;

        let status = response.pointer("/data/status").and_then(Value::as_str);
        if status == Some(VERIFIED_STATUS) {
            Ok(())
        } else {
            Err(CallbackError::GatewayVerificationFailed {
                status: status.map(str::to_string),
            })
        }
    }

    fn reject(&self, hash: Option<&PaymentHash>, err: CallbackError) -> CallbackOutcome {
        let payment_hash = hash.map(PaymentHash::as_str).unwrap_or_default();

        match &err {
            CallbackError::SessionNotFound(_) => {
                tracing::error!(payment_hash, kind = err.kind(), error = %err, "Callback rejected");
                self.event_log.log_event(
                    Severity::Error,
                    &format!("Payment process failed: {}", err),
                    EVENT_CONTEXT,
                );
            }
            CallbackError::ProcessingFailed(_) => {
                tracing::error!(payment_hash, kind = err.kind(), error = %err, "Callback rejected");
                self.event_log
                    .log_event(Severity::Error, &err.to_string(), EVENT_CONTEXT);
            }
            _ => {
                tracing::warn!(payment_hash, kind = err.kind(), error = %err, "Callback rejected");
            }
        }

        CallbackOutcome::Rejected(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::RecordingEventLog;
    use crate::adapters::memory::InMemoryOrderProcessor;
    use crate::adapters::przelewy24::MockGatewayClient;
    use crate::domain::foundation::OrderId;
    use crate::domain::payment::PaymentSession;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::HashMap;

    const CRC: &str = "crc-secret";

    struct Fixture {
        processor: CallbackProcessor,
        orders: Arc<InMemoryOrderProcessor>,
        client: Arc<MockGatewayClient>,
        log: Arc<RecordingEventLog>,
    }

    async fn fixture(debug: bool) -> Fixture {
        let orders = Arc::new(InMemoryOrderProcessor::new());
        orders
            .insert_session(PaymentSession::new(
                OrderId::new(5),
                PaymentHash::new("h1").unwrap(),
                dec!(12.34),
            ))
            .await;

        let client = Arc::new(MockGatewayClient::new());
        client.respond(GatewayEndpoint::Verify, json!({"data": {"status": "success"}}));
        let log = Arc::new(RecordingEventLog::new());

        let settings = MerchantSettings::new("1000", "1000", "key", CRC).with_debug(debug);
        let processor = CallbackProcessor::new(
            settings,
            SiteLinks::new("https://shop.example.com/", "/", "Shop"),
            orders.clone(),
            client.clone(),
            log.clone(),
        );

        Fixture {
            processor,
            orders,
            client,
            log,
        }
    }

    fn signed_notification(session_id: &str) -> Value {
        let codec = SignatureCodec::new(secrecy::SecretString::new(CRC.to_string()));
        let mut body = fields([
            ("merchantId", json!(1000)),
            ("posId", json!(1000)),
            ("sessionId", json!(session_id)),
            ("amount", json!(1234)),
            ("originAmount", json!(1234)),
            ("currency", json!("PLN")),
            ("orderId", json!(777)),
            ("methodId", json!(25)),
            ("statement", json!("p24-A1-B2")),
        ]);
        let sign = codec.sign(body.clone());
        body.insert("sign".to_string(), json!(sign));
        Value::Object(body)
    }

    fn request(hash: &str, body: &[u8]) -> CallbackRequest {
        let mut query = HashMap::new();
        query.insert("paymentHash".to_string(), hash.to_string());
        CallbackRequest::new(query, body.to_vec())
    }

    fn notify(hash: &str, body: &Value) -> CallbackRequest {
        request(hash, body.to_string().as_bytes())
    }

    #[tokio::test]
    async fn verified_notification_is_applied() {
        let f = fixture(false).await;

        let outcome = f.processor.process(&notify("h1", &signed_notification("h1"))).await;

        assert_eq!(
            outcome.redirect_location(),
            Some("/commerce/przelewy/payment-success?paymentHash=h1")
        );
        assert_eq!(f.orders.paid_total(OrderId::new(5)).await, dec!(12.34));
    }

    #[tokio::test]
    async fn verify_call_carries_signed_confirmation() {
        let f = fixture(false).await;

        f.processor.process(&notify("h1", &signed_notification("h1"))).await;

        let calls = f.client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].endpoint, GatewayEndpoint::Verify);

        let payload = calls[0].payload.as_object().unwrap();
        let keys: Vec<_> = payload.keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["merchantId", "posId", "sessionId", "amount", "currency", "orderId", "sign"]
        );

        let expected = crate::domain::payment::signature::sign(fields([
            ("sessionId", json!("h1")),
            ("orderId", json!(777)),
            ("amount", json!(1234)),
            ("currency", json!("PLN")),
            ("crc", json!(CRC)),
        ]));
        assert_eq!(payload["sign"], json!(expected));
    }

    #[tokio::test]
    async fn synchronous_return_reflects_paid_state() {
        let f = fixture(false).await;

        let before = f.processor.process(&request("h1", b"")).await;
        f.processor.process(&notify("h1", &signed_notification("h1"))).await;
        let after = f.processor.process(&request("h1", b"")).await;

        assert_eq!(
            before.redirect_location(),
            Some("/commerce/przelewy/payment-failed?paymentHash=h1")
        );
        assert_eq!(
            after.redirect_location(),
            Some("/commerce/przelewy/payment-success?paymentHash=h1")
        );
    }

    #[tokio::test]
    async fn unknown_session_on_return_is_logged_as_error() {
        let f = fixture(false).await;

        let outcome = f.processor.process(&request("zzz", b"")).await;

        assert!(matches!(outcome, CallbackOutcome::Rejected(CallbackError::SessionNotFound(_))));
        let errors = f.log.events_with(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context, EVENT_CONTEXT);
    }

    #[tokio::test]
    async fn mismatched_session_id_is_rejected_before_verify() {
        let f = fixture(false).await;

        let outcome = f.processor.process(&notify("h1", &signed_notification("other"))).await;

        assert!(matches!(outcome, CallbackOutcome::Rejected(CallbackError::MalformedCallback(_))));
        assert!(f.client.calls().is_empty());
    }

    #[tokio::test]
    async fn gateway_status_other_than_success_rejects() {
        let f = fixture(false).await;
        f.client.respond(GatewayEndpoint::Verify, json!({"data": {"status": "error"}}));

        let outcome = f.processor.process(&notify("h1", &signed_notification("h1"))).await;

        assert!(matches!(
            outcome,
            CallbackOutcome::Rejected(CallbackError::GatewayVerificationFailed { status: Some(ref s) }) if s == "error"
        ));
        assert!(!f.orders.session(&PaymentHash::new("h1").unwrap()).await.unwrap().paid);
    }

    #[tokio::test]
    async fn debug_mode_logs_raw_callback_body() {
        let f = fixture(true).await;

        f.processor.process(&request("h1", b"<script>")).await;

        let start: Vec<_> = f
            .log
            .events()
            .into_iter()
            .filter(|e| e.context == CALLBACK_START_CONTEXT)
            .collect();
        assert_eq!(start.len(), 1);
        assert!(start[0].message.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn bad_hash_is_rejected_without_logging_body() {
        let f = fixture(true).await;

        let outcome = f.processor.process(&request("../etc", b"{}")).await;

        assert!(matches!(outcome, CallbackOutcome::Rejected(CallbackError::MalformedCallback(_))));
        assert!(f.log.is_empty());
    }
}
