//! Stripe client wrapper

use crate::error::{BillingError, BillingResult};

/// Stripe configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
}

impl StripeConfig {
    /// Load Stripe configuration from environment variables
    pub fn from_env() -> BillingResult<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| BillingError::Config("STRIPE_SECRET_KEY not configured".to_string()))?;

        Ok(Self { secret_key })
    }
}

/// Shared Stripe API client
#[derive(Clone)]
pub struct StripeClient {
    client: stripe::Client,
    config: StripeConfig,
}

impl StripeClient {
    /// Create a client from environment variables
    pub fn from_env() -> BillingResult<Self> {
        Ok(Self::new(StripeConfig::from_env()?))
    }

    /// Create a client with explicit config
    pub fn new(config: StripeConfig) -> Self {
        let client = stripe::Client::new(config.secret_key.clone());
        Self { client, config }
    }

    /// Access the underlying Stripe client for API calls
    pub fn inner(&self) -> &stripe::Client {
        &self.client
    }

    /// Access the configuration
    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_config_accessible() {
        let client = StripeClient::new(StripeConfig {
            secret_key: "sk_test_123".to_string(),
        });
        assert_eq!(client.config().secret_key, "sk_test_123");
    }
}
