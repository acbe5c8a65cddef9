//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to the payment command handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::application::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, HandlePaymentCallbackCommand,
    HandlePaymentCallbackHandler,
};
use crate::domain::foundation::{ErrorCode, OrderId};
use crate::domain::payment::{CallbackOutcome, PaymentError};
use crate::ports::PaymentGateway;

use super::dto::{ErrorResponse, PaymentLinkResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for payment routes.
#[derive(Clone)]
pub struct PaymentAppState {
    pub gateway: Arc<dyn PaymentGateway>,
}

impl PaymentAppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub fn create_payment_link_handler(&self) -> CreatePaymentLinkHandler {
        CreatePaymentLinkHandler::new(self.gateway.clone())
    }

    pub fn callback_handler(&self) -> HandlePaymentCallbackHandler {
        HandlePaymentCallbackHandler::new(self.gateway.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET|POST /commerce/przelewy/payment-process - Status URL
///
/// Redirects to a landing page, or answers 200 with an empty body when the
/// request is rejected.
pub async fn payment_process(
    State(state): State<PaymentAppState>,
    query: Option<Query<HashMap<String, String>>>,
    body: Bytes,
) -> Response {
    let cmd = HandlePaymentCallbackCommand {
        query: query.map(|Query(q)| q).unwrap_or_default(),
        body: body.to_vec(),
    };

    match state.callback_handler().handle(cmd).await {
        CallbackOutcome::Redirect { location, .. } => Redirect::to(&location).into_response(),
        CallbackOutcome::Rejected(_) => StatusCode::OK.into_response(),
    }
}

/// POST /commerce/przelewy/orders/:order_id/payment-link - Start a payment
pub async fn create_payment_link(
    State(state): State<PaymentAppState>,
    Path(order_id): Path<u64>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let handler = state.create_payment_link_handler();
    let cmd = CreatePaymentLinkCommand {
        order_id: OrderId::new(order_id),
    };

    let result = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(PaymentLinkResponse::from(result))))
}

/// GET /commerce/przelewy/markup - Checkout markup for the payment method
pub async fn checkout_markup(State(state): State<PaymentAppState>) -> Html<String> {
    Html(state.gateway.markup())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
#[derive(Debug)]
pub struct PaymentApiError(PaymentError);

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            PaymentError::MissingCredentials(_) | PaymentError::InvalidSetting { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "PAYMENT_NOT_CONFIGURED")
            }
            PaymentError::Order(err) => match err.code {
                ErrorCode::OrderNotFound => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
                ErrorCode::ValidationFailed => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
            PaymentError::InvalidRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ORDER_DATA"),
            PaymentError::Gateway(_) | PaymentError::MissingToken => {
                (StatusCode::BAD_GATEWAY, "PAYMENT_LINK_UNAVAILABLE")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use crate::domain::payment::GatewayError;

    #[test]
    fn configuration_errors_map_to_503() {
        let response = PaymentApiError(PaymentError::MissingCredentials(vec!["posId"])).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn unknown_order_maps_to_404() {
        let err = PaymentError::Order(DomainError::new(ErrorCode::OrderNotFound, "missing"));
        assert_eq!(PaymentApiError(err).into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn gateway_failures_map_to_502() {
        let err = PaymentError::Gateway(GatewayError::Transport("refused".to_string()));
        assert_eq!(PaymentApiError(err).into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            PaymentApiError(PaymentError::MissingToken).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
