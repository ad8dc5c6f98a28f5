// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Parlor Billing
//!
//! Stripe integration and billing-data plumbing shared by the fixture
//! tooling.
//!
//! ## Features
//!
//! - **Collaborator traits**: `Datastore`, `PaymentProvider`, and
//!   `CacheInvalidator` seams with production implementations over
//!   Postgres, Stripe, and Redis
//! - **Plan construction**: paid and legacy plan builders with cycle-aware
//!   invoice dates
//! - **Date arithmetic**: calendar-month addition with day clamping, plus
//!   the textual timestamp wire format
//! - **Stripe client**: thin wrapper with environment-driven configuration

pub mod cache;
pub mod client;
pub mod error;
pub mod payments;
pub mod plans;
pub mod schedule;
pub mod store;

#[cfg(test)]
mod edge_case_tests;

// Cache
pub use cache::{CacheInvalidator, RedisCache};

// Client
pub use client::{StripeClient, StripeConfig};

// Error
pub use error::{BillingError, BillingResult};

// Payments
pub use payments::{PaymentProvider, StripePaymentProvider};

// Plans
pub use plans::{initial_license_ledger, legacy_plan, paid_plan, LegacyPlanParams, PaidPlanParams};

// Schedule
pub use schedule::{add_months, format_timestamp, next_invoice_date, parse_timestamp};

// Store
pub use store::{Datastore, PgDatastore};
