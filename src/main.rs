//! przelewy24-gateway - payment gateway service
//!
//! Serves the status URL and the payment-link endpoint over HTTP, backed by
//! an in-memory order store.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use przelewy24_gateway::adapters::http::{payment_router, PaymentAppState};
use przelewy24_gateway::adapters::przelewy24::{
    Collaborators, HttpGatewayClient, HttpGatewayConfig, Przelewy24Gateway,
};
use przelewy24_gateway::adapters::{InMemoryOrderProcessor, PlaceholderRenderer, TracingEventLog};
use przelewy24_gateway::config::{AppConfig, ConfigSettingsStore, Environment, LogFormat};
use przelewy24_gateway::domain::foundation::OrderId;
use przelewy24_gateway::domain::payment::{CartItem, Order, OrderFields};
use przelewy24_gateway::ports::{load_merchant_settings, EventLog, PaymentGateway};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        sandbox = config.przelewy24.sandbox,
        "Starting przelewy24-gateway"
    );

    let settings = load_merchant_settings(&ConfigSettingsStore::new(config.przelewy24.clone()));
    let missing = settings.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Przelewy24 credentials incomplete, payments disabled");
    }

    let event_log: Arc<dyn EventLog> = Arc::new(TracingEventLog::new());

    let mut client_config =
        HttpGatewayConfig::from_settings(&settings).with_timeout(config.przelewy24.request_timeout());
    if let Some(url) = &config.przelewy24.base_url {
        client_config = client_config.with_base_url(url);
    }
    let client = Arc::new(HttpGatewayClient::new(client_config, event_log.clone())?);

    let orders = Arc::new(InMemoryOrderProcessor::new());
    if config.server.environment == Environment::Development {
        seed_demo_order(&orders).await;
    }

    let mut gateway = Przelewy24Gateway::new(
        settings,
        config.site.links(),
        config.lexicon.lexicon(),
        Collaborators {
            orders,
            client,
            renderer: Arc::new(PlaceholderRenderer::new()),
            event_log,
        },
    );
    if let Some(url) = &config.przelewy24.base_url {
        gateway = gateway.with_base_url(url);
    }
    let gateway: Arc<dyn PaymentGateway> = Arc::new(gateway);

    let app = payment_router()
        .with_state(PaymentAppState::new(gateway))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                ))),
        );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("przelewy24-gateway listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    match config.server.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Order #1 so the payment-link endpoint can be tried against the sandbox.
async fn seed_demo_order(orders: &InMemoryOrderProcessor) {
    let order = Order {
        id: OrderId::new(1),
        amount: Decimal::new(4999, 2),
        currency: "PLN".to_string(),
        name: "Demo Buyer".to_string(),
        email: "buyer@example.com".to_string(),
        fields: OrderFields::default(),
    };
    let cart = vec![CartItem::new("Demo item", Decimal::new(4999, 2), Decimal::ONE)];
    orders.insert_order(order, cart).await;
    tracing::debug!("Seeded demo order 1");
}
