//! Payment-provider integration
//!
//! The seeder only needs four provider calls: create a customer, create a
//! card payment method from a token, attach it, and make it the default.
//! [`PaymentProvider`] captures that contract; [`StripePaymentProvider`] is
//! the Stripe-backed implementation.

use std::future::Future;

use stripe::{
    AttachPaymentMethod, CreateCustomer, CreatePaymentMethod, CreatePaymentMethodCardUnion,
    Customer, CustomerId, CustomerInvoiceSettings, PaymentMethod, PaymentMethodId,
    PaymentMethodTypeFilter, TokenParams, UpdateCustomer,
};

use crate::client::StripeClient;
use crate::error::{BillingError, BillingResult};

/// Payment-provider operations the seeder depends on
pub trait PaymentProvider: Send + Sync {
    /// Create a provider-side customer for a realm, returning the provider's
    /// customer id
    fn create_customer(
        &self,
        realm: &str,
        email: &str,
    ) -> impl Future<Output = BillingResult<String>> + Send;

    /// Create a card payment method from a tokenized card, returning the
    /// payment method id
    fn create_card_payment_method(
        &self,
        token: &str,
    ) -> impl Future<Output = BillingResult<String>> + Send;

    fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> impl Future<Output = BillingResult<()>> + Send;

    fn set_default_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> impl Future<Output = BillingResult<()>> + Send;
}

/// Stripe-backed payment provider
#[derive(Clone)]
pub struct StripePaymentProvider {
    stripe: StripeClient,
}

impl StripePaymentProvider {
    pub fn new(stripe: StripeClient) -> Self {
        Self { stripe }
    }
}

impl PaymentProvider for StripePaymentProvider {
    async fn create_customer(&self, realm: &str, email: &str) -> BillingResult<String> {
        let mut metadata = std::collections::HashMap::new();
        metadata.insert("realm".to_string(), realm.to_string());

        let params = CreateCustomer {
            email: Some(email),
            description: Some(realm),
            metadata: Some(metadata),
            ..Default::default()
        };

        let customer = Customer::create(self.stripe.inner(), params).await?;

        tracing::info!(
            realm = %realm,
            customer_id = %customer.id,
            "Created Stripe customer"
        );

        Ok(customer.id.to_string())
    }

    async fn create_card_payment_method(&self, token: &str) -> BillingResult<String> {
        let params = CreatePaymentMethod {
            type_: Some(PaymentMethodTypeFilter::Card),
            card: Some(CreatePaymentMethodCardUnion::TokenParams(TokenParams {
                token: token.to_string(),
            })),
            ..Default::default()
        };

        let payment_method = PaymentMethod::create(self.stripe.inner(), params).await?;

        Ok(payment_method.id.to_string())
    }

    async fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> BillingResult<()> {
        let customer_id = customer_id
            .parse::<CustomerId>()
            .map_err(|e| BillingError::StripeApi(format!("Invalid customer ID: {}", e)))?;
        let payment_method_id = payment_method_id
            .parse::<PaymentMethodId>()
            .map_err(|e| BillingError::StripeApi(format!("Invalid payment method ID: {}", e)))?;

        PaymentMethod::attach(
            self.stripe.inner(),
            &payment_method_id,
            AttachPaymentMethod {
                customer: customer_id,
            },
        )
        .await?;

        Ok(())
    }

    async fn set_default_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> BillingResult<()> {
        let customer_id_parsed = customer_id
            .parse::<CustomerId>()
            .map_err(|e| BillingError::StripeApi(format!("Invalid customer ID: {}", e)))?;

        let mut update = UpdateCustomer::new();
        update.invoice_settings = Some(CustomerInvoiceSettings {
            default_payment_method: Some(payment_method_id.to_string()),
            ..Default::default()
        });

        Customer::update(self.stripe.inner(), &customer_id_parsed, update).await?;

        tracing::info!(
            customer_id = %customer_id,
            payment_method_id = %payment_method_id,
            "Set default payment method"
        );

        Ok(())
    }
}
