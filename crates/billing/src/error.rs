//! Billing error types

use thiserror::Error;

/// Errors produced by the billing crates
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Stripe API error: {0}")]
    StripeApi(String),

    #[error("Invalid tier: {0}")]
    InvalidTier(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result alias for billing operations
pub type BillingResult<T> = Result<T, BillingError>;

impl From<sqlx::Error> for BillingError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<stripe::StripeError> for BillingError {
    fn from(err: stripe::StripeError) -> Self {
        Self::StripeApi(err.to_string())
    }
}

impl From<redis::RedisError> for BillingError {
    fn from(err: redis::RedisError) -> Self {
        Self::Cache(err.to_string())
    }
}

impl From<time::error::Parse> for BillingError {
    fn from(err: time::error::Parse) -> Self {
        Self::InvalidTimestamp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failing_subsystem() {
        let err = BillingError::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");

        let err = BillingError::InvalidTier("self_hosted_plus".to_string());
        assert_eq!(err.to_string(), "Invalid tier: self_hosted_plus");
    }

    #[test]
    fn test_time_parse_error_converts_to_invalid_timestamp() {
        let parse_err = time::OffsetDateTime::parse(
            "not-a-timestamp",
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap_err();
        let err = BillingError::from(parse_err);
        assert!(matches!(err, BillingError::InvalidTimestamp(_)));
    }
}
