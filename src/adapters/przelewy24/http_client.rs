//! Przelewy24 REST client.
//!
//! Every call goes to `{base}/api/v1/{operation}` with HTTP Basic auth
//! (POS id as user, API key as password). Register is a POST and verify a
//! PUT, both carrying a JSON body; anything else is a bodiless GET.
//!
//! With debug enabled, each exchange is written to the event log with the
//! URL, request headers, request data, response and error, HTML-escaped.
//! The Authorization header is never part of the trace.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::domain::payment::{GatewayError, MerchantSettings};
use crate::ports::{EventLog, GatewayClient, GatewayEndpoint, Severity};

use super::site::html_escape;
use super::{environment_base_url, DEBUG_CONTEXT};

/// Default timeout for a single gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpGatewayClient`].
#[derive(Clone)]
pub struct HttpGatewayConfig {
    /// Gateway root, always ending in `/`.
    base_url: String,

    pos_id: String,
    secret_id: SecretString,
    timeout: Duration,
    debug: bool,
}

impl HttpGatewayConfig {
    /// Derives the connection settings from the merchant settings.
    pub fn from_settings(settings: &MerchantSettings) -> Self {
        Self {
            base_url: environment_base_url(settings.is_sandbox()).to_string(),
            pos_id: settings.pos_id_raw().to_string(),
            secret_id: settings.secret_id().clone(),
            timeout: DEFAULT_TIMEOUT,
            debug: settings.is_debug(),
        }
    }

    /// Set a custom gateway root (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for HttpGatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGatewayConfig")
            .field("base_url", &self.base_url)
            .field("pos_id", &self.pos_id)
            .field("secret_id", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .finish()
    }
}

/// `GatewayClient` over HTTPS.
pub struct HttpGatewayClient {
    config: HttpGatewayConfig,
    http_client: reqwest::Client,
    event_log: Arc<dyn EventLog>,
}

impl HttpGatewayClient {
    pub fn new(config: HttpGatewayConfig, event_log: Arc<dyn EventLog>) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
            event_log,
        })
    }

    fn url(&self, endpoint: &GatewayEndpoint) -> String {
        format!("{}api/v1/{}", self.config.base_url, endpoint.path())
    }

    fn request(&self, endpoint: &GatewayEndpoint, url: &str, payload: &Value) -> reqwest::RequestBuilder {
        let builder = match endpoint {
            GatewayEndpoint::Register => self.http_client.post(url).json(payload),
            GatewayEndpoint::Verify => self.http_client.put(url).json(payload),
            GatewayEndpoint::Other(_) => self
                .http_client
                .get(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json"),
        };

        builder.basic_auth(
            &self.config.pos_id,
            Some(self.config.secret_id.expose_secret()),
        )
    }

    /// Performs the exchange; yields the status and raw body.
    async fn exchange(
        &self,
        endpoint: &GatewayEndpoint,
        url: &str,
        payload: &Value,
    ) -> Result<(reqwest::StatusCode, String), GatewayError> {
        let response = self
            .request(endpoint, url, payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok((status, body))
    }

    fn trace(
        &self,
        endpoint: &GatewayEndpoint,
        url: &str,
        payload: &Value,
        result: &Result<(reqwest::StatusCode, String), GatewayError>,
    ) {
        let request_data = match endpoint {
            GatewayEndpoint::Other(_) => String::new(),
            _ => serde_json::to_string_pretty(payload).unwrap_or_default(),
        };

        let (response_data, error) = match result {
            Ok((status, body)) if status.is_success() => (body.clone(), None),
            Ok((status, body)) => (body.clone(), Some(format!("HTTP {}", status.as_u16()))),
            Err(e) => (String::new(), Some(e.to_string())),
        };

        let mut message = format!(
            "URL: <pre>{}</pre>\n\nHeaders: <pre>{}</pre>\n\nRequest data: <pre>{}</pre>\n\nResponse data: <pre>{}</pre>",
            html_escape(url),
            html_escape("Content-Type: application/json"),
            html_escape(&request_data),
            html_escape(&response_data),
        );
        if let Some(error) = error {
            message.push_str(&format!("\n\nError: <pre>{}</pre>", html_escape(&error)));
        }

        self.event_log
            .log_event(Severity::Info, &message, &format!("{}: {}", DEBUG_CONTEXT, endpoint));
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn call(&self, endpoint: GatewayEndpoint, payload: &Value) -> Result<Value, GatewayError> {
        let url = self.url(&endpoint);

        let result = self.exchange(&endpoint, &url, payload).await;

        if self.config.debug {
            self.trace(&endpoint, &url, payload, &result);
        }

        let (status, body) = result.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Przelewy24 request failed");
            e
        })?;

        if !status.is_success() {
            tracing::error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                "Przelewy24 returned an error status"
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Failed to parse Przelewy24 response");
            GatewayError::MalformedResponse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::RecordingEventLog;

    fn settings() -> MerchantSettings {
        MerchantSettings::new("1000", "2000", "secret", "crc")
    }

    fn client(config: HttpGatewayConfig) -> HttpGatewayClient {
        HttpGatewayClient::new(config, Arc::new(RecordingEventLog::new())).unwrap()
    }

    #[test]
    fn production_settings_target_secure_host() {
        let config = HttpGatewayConfig::from_settings(&settings());
        assert_eq!(config.base_url(), "https://secure.przelewy24.pl/");
    }

    #[test]
    fn sandbox_settings_target_sandbox_host() {
        let config = HttpGatewayConfig::from_settings(&settings().with_sandbox(true));
        assert_eq!(config.base_url(), "https://sandbox.przelewy24.pl/");
    }

    #[test]
    fn urls_are_built_under_api_v1() {
        let client = client(
            HttpGatewayConfig::from_settings(&settings()).with_base_url("http://127.0.0.1:9999"),
        );

        assert_eq!(
            client.url(&GatewayEndpoint::Register),
            "http://127.0.0.1:9999/api/v1/transaction/register"
        );
        assert_eq!(
            client.url(&GatewayEndpoint::Other("testAccess".to_string())),
            "http://127.0.0.1:9999/api/v1/testAccess"
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = HttpGatewayConfig::from_settings(&settings());
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret\""));
    }

    #[tokio::test]
    async fn unreachable_gateway_is_a_transport_error() {
        let client = client(
            HttpGatewayConfig::from_settings(&settings())
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(Duration::from_secs(2)),
        );

        let result = client
            .call(GatewayEndpoint::Verify, &serde_json::json!({}))
            .await;

        assert!(matches!(result, Err(GatewayError::Transport(_))));
    }
}
