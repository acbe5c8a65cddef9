//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{checkout_markup, create_payment_link, payment_process, PaymentAppState};

/// Create the payment router.
///
/// # Routes
///
/// ## Gateway Endpoints (no auth, signature verified)
/// - `GET|POST /commerce/przelewy/payment-process` - Status URL
///
/// ## Checkout Endpoints
/// - `POST /commerce/przelewy/orders/:order_id/payment-link` - Start a payment
/// - `GET /commerce/przelewy/markup` - Checkout markup
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new()
        .route(
            "/commerce/przelewy/payment-process",
            get(payment_process).post(payment_process),
        )
        .route(
            "/commerce/przelewy/orders/:order_id/payment-link",
            post(create_payment_link),
        )
        .route("/commerce/przelewy/markup", get(checkout_markup))
}
