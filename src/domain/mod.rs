//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `payment` - Orders, payment sessions, request signing, proration and
//!   the callback vocabulary

pub mod foundation;
pub mod payment;
