//! Application handlers.
//!
//! Command handlers that orchestrate the payment gateway port.

pub mod payment;

pub use payment::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, CreatePaymentLinkResult,
    HandlePaymentCallbackCommand, HandlePaymentCallbackHandler,
};
