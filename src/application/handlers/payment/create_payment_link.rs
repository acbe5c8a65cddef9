//! CreatePaymentLinkHandler - Command handler for starting a gateway payment.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::payment::PaymentError;
use crate::ports::PaymentGateway;

/// Command to start paying an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentLinkCommand {
    pub order_id: OrderId,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentLinkResult {
    pub order_id: OrderId,
    /// Provider code of the gateway that issued the link.
    pub provider: &'static str,
    /// URL the buyer must be redirected to.
    pub url: String,
}

/// Handler for creating payment links.
pub struct CreatePaymentLinkHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentLinkHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentLinkCommand,
    ) -> Result<CreatePaymentLinkResult, PaymentError> {
        let url = self.gateway.payment_link(cmd.order_id).await.map_err(|e| {
            tracing::warn!(order_id = %cmd.order_id, error = %e, "Payment link unavailable");
            e
        })?;

        Ok(CreatePaymentLinkResult {
            order_id: cmd.order_id,
            provider: self.gateway.code(),
            url,
        })
    }
}
