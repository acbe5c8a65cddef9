//! HTTP adapter for payment endpoints.
//!
//! - `GET|POST /commerce/przelewy/payment-process` - Status URL (buyer return and gateway notification)
//! - `POST /commerce/przelewy/orders/:order_id/payment-link` - Register a transaction
//! - `GET /commerce/przelewy/markup` - Checkout markup

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, PaymentLinkResponse};
pub use handlers::{PaymentApiError, PaymentAppState};
pub use routes::payment_router;
