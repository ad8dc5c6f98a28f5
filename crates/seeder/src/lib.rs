// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Parlor Billing Fixture Seeder
//!
//! Populates a development database with realms and remote-server
//! registrations covering every billing state the billing UI and jobs need
//! to handle.
//!
//! ## Features
//!
//! - **Profile catalog**: the fixed, ordered list of fixture billing states
//! - **Provisioning**: realm and remote-server setup driven through the
//!   `Datastore`, `PaymentProvider`, and `CacheInvalidator` seams
//! - **Credential report**: prints the generated server identities and API
//!   keys for pasting into a local deployment

pub mod catalog;
pub mod report;
pub mod seeder;

// Catalog
pub use catalog::{customer_profiles, CustomerProfile, ProfileKind};

// Report
pub use report::ServerCredentials;

// Seeder
pub use seeder::{SeedOptions, Seeder};
