//! Order processor port - the order subsystem as seen by the payment integration.
//!
//! The order subsystem owns orders, carts and payment sessions. This port
//! exposes only what payment link creation and callback handling need.
//!
//! ## Idempotence
//!
//! Gateways deliver notifications at least once, and a replayed notification
//! may race the buyer's synchronous return. `process_payment` must therefore
//! have at-most-once effect per session: applying an already-paid session is
//! a no-op reported as `AlreadyPaid`, never a second credit. Implementations
//! typically use a compare-and-set on the paid flag or a session-scoped lock.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::foundation::{DomainError, OrderId, PaymentHash};
use crate::domain::payment::{CartItem, LookupError, Order, PaymentSession};

/// Result of applying a payment to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentApplied {
    /// The session transitioned from unpaid to paid.
    Applied,

    /// The session was already paid; nothing changed.
    AlreadyPaid,
}

/// Port for the order subsystem.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    /// Load an order.
    async fn get_order(&self, order_id: OrderId) -> Result<Order, DomainError>;

    /// Load the cart snapshot of an order.
    async fn get_cart(&self, order_id: OrderId) -> Result<Vec<CartItem>, DomainError>;

    /// Create a new unpaid payment session for an order.
    async fn create_payment(
        &self,
        order_id: OrderId,
        amount: Decimal,
    ) -> Result<PaymentSession, DomainError>;

    /// Load a payment session by its hash.
    async fn load_payment_by_hash(&self, hash: &PaymentHash)
        -> Result<PaymentSession, LookupError>;

    /// Mark a session paid with the given amount in major units.
    ///
    /// Must be idempotent, see module docs.
    async fn process_payment(
        &self,
        session: &PaymentSession,
        amount: Decimal,
    ) -> Result<PaymentApplied, DomainError>;
}
