//! Shared domain types for Parlor billing tooling.
//!
//! Everything here mirrors columns owned by the main application schema;
//! this crate only describes them so the billing crates and the fixture
//! seeder agree on shapes.

pub mod types;

pub use types::*;
