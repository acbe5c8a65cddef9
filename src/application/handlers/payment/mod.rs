//! Payment command handlers.

mod create_payment_link;
mod handle_payment_callback;

pub use create_payment_link::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, CreatePaymentLinkResult,
};
pub use handle_payment_callback::{HandlePaymentCallbackCommand, HandlePaymentCallbackHandler};
