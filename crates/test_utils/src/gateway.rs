//! Scripted in-process payment gateway
//!
//! Stands in for the external processor in tests: issues deterministic
//! order ids without any network and can be scripted to fail.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::DomainPort;
use domain_payment::{
    signature, CreateOrderRequest, GatewayOrder, PaymentError, PaymentGateway,
};

/// Behavior the scripted gateway should exhibit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayScript {
    /// Every order creation succeeds
    Succeed,
    /// Every order creation fails with a transient error
    Unavailable,
    /// Every order creation is rejected
    Reject,
}

/// In-process gateway for tests
pub struct MockGateway {
    script: GatewayScript,
    counter: Arc<AtomicU64>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_script(GatewayScript::Succeed)
    }

    pub fn with_script(script: GatewayScript) -> Self {
        Self {
            script,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of orders opened so far
    pub fn orders_opened(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPort for MockGateway {}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<GatewayOrder, PaymentError> {
        match self.script {
            GatewayScript::Succeed => {
                let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(GatewayOrder {
                    id: format!("order_test_{}", n),
                    amount: request.amount,
                    currency: request.currency.clone(),
                    receipt: request.receipt.clone(),
                    status: "created".to_string(),
                })
            }
            GatewayScript::Unavailable => Err(PaymentError::GatewayUnavailable(
                "scripted outage".to_string(),
            )),
            GatewayScript::Reject => Err(PaymentError::GatewayRejected(
                "scripted rejection".to_string(),
            )),
        }
    }
}

/// Builds a valid success-callback signature for an order/payment pair
pub fn sign_callback(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    signature::expected_signature(key_secret, order_id, payment_id)
}
