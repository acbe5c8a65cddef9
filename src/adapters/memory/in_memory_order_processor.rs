//! In-memory order processor.
//!
//! Holds orders, carts and payment sessions in process memory. Used by the
//! demo binary and tests; persistence is the order subsystem's concern.
//!
//! Applying a payment is a compare-and-set on the session's paid flag under
//! the write lock, so concurrent duplicate callbacks credit a session once.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, PaymentHash};
use crate::domain::payment::{CartItem, LookupError, Order, PaymentSession};
use crate::ports::{OrderProcessor, PaymentApplied};

#[derive(Default)]
struct Store {
    orders: HashMap<OrderId, Order>,
    carts: HashMap<OrderId, Vec<CartItem>>,
    sessions: HashMap<PaymentHash, PaymentSession>,

    /// Sum of applied payments per order.
    paid_totals: HashMap<OrderId, Decimal>,

    /// Number of successful `process_payment` transitions.
    applied_count: usize,
}

/// In-memory `OrderProcessor`.
#[derive(Default)]
pub struct InMemoryOrderProcessor {
    store: RwLock<Store>,
}

impl InMemoryOrderProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an order together with its cart.
    pub async fn insert_order(&self, order: Order, cart: Vec<CartItem>) {
        let mut store = self.store.write().await;
        store.carts.insert(order.id, cart);
        store.orders.insert(order.id, order);
    }

    /// Adds or replaces a payment session.
    pub async fn insert_session(&self, session: PaymentSession) {
        self.store
            .write()
            .await
            .sessions
            .insert(session.hash.clone(), session);
    }

    /// Current state of a session.
    pub async fn session(&self, hash: &PaymentHash) -> Option<PaymentSession> {
        self.store.read().await.sessions.get(hash).cloned()
    }

    /// Total applied to an order so far.
    pub async fn paid_total(&self, order_id: OrderId) -> Decimal {
        self.store
            .read()
            .await
            .paid_totals
            .get(&order_id)
            .copied()
            .unwrap_or_default()
    }

    /// Number of unpaid-to-paid transitions performed.
    pub async fn applied_count(&self) -> usize {
        self.store.read().await.applied_count
    }
}

#[async_trait]
impl OrderProcessor for InMemoryOrderProcessor {
    async fn get_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.store
            .read()
            .await
            .orders
            .get(&order_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OrderNotFound,
                    format!("Order {} not found", order_id),
                )
            })
    }

    async fn get_cart(&self, order_id: OrderId) -> Result<Vec<CartItem>, DomainError> {
        let store = self.store.read().await;
        if !store.orders.contains_key(&order_id) {
            return Err(DomainError::new(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", order_id),
            ));
        }
        Ok(store.carts.get(&order_id).cloned().unwrap_or_default())
    }

    async fn create_payment(
        &self,
        order_id: OrderId,
        amount: Decimal,
    ) -> Result<PaymentSession, DomainError> {
        let mut store = self.store.write().await;
        if !store.orders.contains_key(&order_id) {
            return Err(DomainError::new(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", order_id),
            ));
        }

        let session = PaymentSession::new(order_id, PaymentHash::generate(), amount);
        store.sessions.insert(session.hash.clone(), session.clone());

        tracing::debug!(order_id = %order_id, payment_hash = %session.hash, "Payment session created");
        Ok(session)
    }

    async fn load_payment_by_hash(
        &self,
        hash: &PaymentHash,
    ) -> Result<PaymentSession, LookupError> {
        self.store
            .read()
            .await
            .sessions
            .get(hash)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(hash.clone()))
    }

    async fn process_payment(
        &self,
        session: &PaymentSession,
        amount: Decimal,
    ) -> Result<PaymentApplied, DomainError> {
        let mut store = self.store.write().await;

        let stored = store.sessions.get_mut(&session.hash).ok_or_else(|| {
            DomainError::new(
                ErrorCode::PaymentNotFound,
                format!("Payment \"{}\" not found", session.hash),
            )
        })?;

        if !stored.mark_paid(amount, Utc::now()) {
            tracing::info!(payment_hash = %session.hash, "Payment already applied, skipping");
            return Ok(PaymentApplied::AlreadyPaid);
        }

        let order_id = stored.order_id;
        *store.paid_totals.entry(order_id).or_default() += amount;
        store.applied_count += 1;

        tracing::info!(
            payment_hash = %session.hash,
            order_id = %order_id,
            amount = %amount,
            "Payment applied"
        );
        Ok(PaymentApplied::Applied)
    }
}
