//! Payment gateway port and HTTPS adapter
//!
//! The adapter opens orders with a Razorpay-style processor over its REST
//! API. Only order creation talks to the network; verification is a local
//! HMAC check. Transient failures are retried with exponential backoff up
//! to a small bounded count; rejections are surfaced immediately.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use core_kernel::DomainPort;
use crate::error::PaymentError;
use crate::order::{CreateOrderRequest, GatewayOrder};

/// Port for the external payment processor
#[async_trait]
pub trait PaymentGateway: DomainPort {
    /// Opens an order for the given amount and receipt
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<GatewayOrder, PaymentError>;
}

/// Configuration for the gateway adapter
///
/// # Example
///
/// ```rust
/// use domain_payment::GatewayConfig;
/// use std::time::Duration;
///
/// let config = GatewayConfig::new("rzp_test_key", "secret")
///     .request_timeout(Duration::from_secs(10))
///     .max_retries(2);
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Merchant key id (basic-auth username)
    pub key_id: String,
    /// Merchant key secret (basic-auth password, also signs callbacks)
    pub key_secret: String,
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Maximum retry attempts for transient failures
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub retry_delay: Duration,
}

impl GatewayConfig {
    /// Creates a configuration with sensible defaults
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            base_url: "https://api.razorpay.com".to_string(),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }

    /// Overrides the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-request timeout (default: 30s)
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the maximum retry attempts for transient failures (default: 3)
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the backoff base delay (default: 500ms)
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

/// HTTPS adapter for the payment processor's order API
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Creates an adapter with the given configuration
    pub fn new(config: GatewayConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn try_create(&self, request: &CreateOrderRequest) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PaymentError::GatewayUnavailable(format!(
                "gateway returned {}",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::GatewayRejected(format!(
                "{}: {}",
                status, body
            )));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| PaymentError::GatewayRejected(format!("malformed order response: {}", e)))
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<GatewayOrder, PaymentError> {
        let mut attempt: u32 = 0;
        loop {
            match self.try_create(request).await {
                Ok(order) => {
                    debug!(order_id = %order.id, receipt = %request.receipt, "gateway order opened");
                    return Ok(order);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_delay * 2_u32.saturating_pow(attempt - 1);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient gateway failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl DomainPort for HttpGateway {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = GatewayConfig::new("key", "secret")
            .base_url("http://localhost:9000")
            .request_timeout(Duration::from_secs(5))
            .max_retries(1);

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
    }
}
