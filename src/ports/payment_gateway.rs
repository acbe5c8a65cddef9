//! Payment gateway port - the capability every payment provider offers.
//!
//! Each provider integration implements this trait once. The rest of the shop
//! only ever talks to `dyn PaymentGateway`.

use async_trait::async_trait;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{CallbackOutcome, CallbackRequest, PaymentError};

/// Port for a payment provider integration.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Short provider identifier, e.g. `przelewy24`.
    fn code(&self) -> &'static str;

    /// Markup shown next to the payment method at checkout.
    ///
    /// Empty when the provider is usable; an error message when it is
    /// not configured.
    fn markup(&self) -> String;

    /// Create a payment attempt for the order and return the URL the buyer
    /// must be redirected to.
    async fn payment_link(&self, order_id: OrderId) -> Result<String, PaymentError>;

    /// Process a request on the status URL.
    async fn handle_callback(&self, request: CallbackRequest) -> CallbackOutcome;
}
