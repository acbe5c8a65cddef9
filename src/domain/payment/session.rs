//! Payment session - one payment attempt against an order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, PaymentHash};

/// A single payment attempt, created by the order subsystem.
///
/// `paid` is monotonic: once true it never returns to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub order_id: OrderId,

    /// Session identifier shared with the gateway.
    pub hash: PaymentHash,

    /// Amount requested in this attempt, major units. May be below the order total.
    pub amount: Decimal,

    pub paid: bool,

    /// Amount credited when the session was applied.
    pub paid_amount: Option<Decimal>,

    pub paid_at: Option<DateTime<Utc>>,
}

impl PaymentSession {
    /// Creates an unpaid session.
    pub fn new(order_id: OrderId, hash: PaymentHash, amount: Decimal) -> Self {
        Self {
            order_id,
            hash,
            amount,
            paid: false,
            paid_amount: None,
            paid_at: None,
        }
    }

    /// Whether this attempt covers only part of the order total.
    pub fn is_partial_of(&self, order_total: Decimal) -> bool {
        self.amount < order_total
    }

    /// Transitions the session to paid.
    ///
    /// Returns `false` and leaves the session untouched when it is already paid.
    pub fn mark_paid(&mut self, amount: Decimal, at: DateTime<Utc>) -> bool {
        if self.paid {
            return false;
        }
        self.paid = true;
        self.paid_amount = Some(amount);
        self.paid_at = Some(at);
        true
    }
}
