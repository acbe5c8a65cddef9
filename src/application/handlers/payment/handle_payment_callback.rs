//! HandlePaymentCallbackHandler - Command handler for requests on the status URL.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::payment::{CallbackOutcome, CallbackRequest};
use crate::ports::PaymentGateway;

/// A request that reached the status URL.
#[derive(Debug, Clone)]
pub struct HandlePaymentCallbackCommand {
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Handler for gateway callbacks and buyer returns.
///
/// Infallible by contract: failures are carried in [`CallbackOutcome::Rejected`].
pub struct HandlePaymentCallbackHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl HandlePaymentCallbackHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: HandlePaymentCallbackCommand) -> CallbackOutcome {
        let request = CallbackRequest::new(cmd.query, cmd.body);
        self.gateway.handle_callback(request).await
    }
}
