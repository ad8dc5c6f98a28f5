//! Common types used across Parlor billing tooling

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Invoicing cadence for a billing plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BillingSchedule {
    Annual,
    Monthly,
}

impl Default for BillingSchedule {
    fn default() -> Self {
        Self::Annual
    }
}

impl BillingSchedule {
    /// Calendar months covered by one billing cycle
    pub fn months_per_cycle(&self) -> u32 {
        match self {
            Self::Annual => 12,
            Self::Monthly => 1,
        }
    }
}

impl std::fmt::Display for BillingSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annual => write!(f, "annual"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// Pricing tier a customer pays for, across hosted and self-hosted products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    CloudStandard,
    CloudPlus,
    SelfHostedLegacy,
    SelfHostedBusiness,
    SelfHostedPlus,
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CloudStandard => write!(f, "cloud_standard"),
            Self::CloudPlus => write!(f, "cloud_plus"),
            Self::SelfHostedLegacy => write!(f, "self_hosted_legacy"),
            Self::SelfHostedBusiness => write!(f, "self_hosted_business"),
            Self::SelfHostedPlus => write!(f, "self_hosted_plus"),
        }
    }
}

/// Lifecycle status of a billing plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Active,
    DowngradeAtEndOfCycle,
    FreeTrial,
    SwitchToAnnualAtEndOfCycle,
    SwitchPlanTierAtPlanEnd,
}

impl Default for PlanStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::DowngradeAtEndOfCycle => write!(f, "downgrade_at_end_of_cycle"),
            Self::FreeTrial => write!(f, "free_trial"),
            Self::SwitchToAnnualAtEndOfCycle => write!(f, "switch_to_annual_at_end_of_cycle"),
            Self::SwitchPlanTierAtPlanEnd => write!(f, "switch_plan_tier_at_plan_end"),
        }
    }
}

/// Plan classification stored on a realm itself.
///
/// This is the realm-level summary of what the customer pays for, distinct
/// from the [`PlanTier`] on the billing plan: sponsored realms get standard
/// features while their plan data says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RealmPlanType {
    Limited,
    Standard,
    StandardFree,
    Plus,
}

impl RealmPlanType {
    /// Human-facing plan name, used for fixture admin account naming
    pub fn plan_name(&self) -> &'static str {
        match self {
            Self::Limited => "limited-plan",
            Self::Standard => "standard-plan",
            Self::StandardFree => "standard-free-plan",
            Self::Plus => "plus-plan",
        }
    }
}

impl std::fmt::Display for RealmPlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited => write!(f, "limited"),
            Self::Standard => write!(f, "standard"),
            Self::StandardFree => write!(f, "standard_free"),
            Self::Plus => write!(f, "plus"),
        }
    }
}

/// Plan classification stored on a remote server registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServerPlanType {
    SelfHosted,
    Business,
}

impl std::fmt::Display for ServerPlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfHosted => write!(f, "self_hosted"),
            Self::Business => write!(f, "business"),
        }
    }
}

/// User role within a realm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Owner,
    Admin,
    Member,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Member
    }
}

// =============================================================================
// Database Models
// =============================================================================

/// Realm (tenant organization) model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Realm {
    pub id: Uuid,
    /// Unique short identifier, doubles as the subdomain
    pub string_id: String,
    pub name: String,
    pub description: String,
    pub plan_type: RealmPlanType,
    pub created_at: OffsetDateTime,
}

/// User model (only the columns the billing tooling touches)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RealmUser {
    pub id: Uuid,
    pub realm_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: OffsetDateTime,
}

/// Named channel within a realm
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: Uuid,
    pub realm_id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Billing identity, linked one-to-one to a realm or a remote server
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub realm_id: Option<Uuid>,
    pub remote_server_id: Option<Uuid>,
    pub stripe_customer_id: Option<String>,
    pub sponsorship_pending: bool,
    pub created_at: OffsetDateTime,
}

/// Billing plan attached to a customer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BillingPlan {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub tier: PlanTier,
    pub billing_schedule: BillingSchedule,
    pub status: PlanStatus,
    pub billing_cycle_anchor: OffsetDateTime,
    pub next_invoice_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
    /// Per-seat price in cents
    pub price_per_license: i64,
    pub automanage_licenses: bool,
    pub charge_automatically: bool,
    pub created_at: OffsetDateTime,
}

/// License-count snapshot for a plan at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LicenseLedgerEntry {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub event_time: OffsetDateTime,
    pub licenses: i32,
    pub licenses_at_next_renewal: i32,
    pub is_renewal: bool,
}

/// Self-hosted deployment registered with the hosted service
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RemoteServer {
    /// Generated identity; the registration protocol knows servers by this value
    pub id: Uuid,
    pub api_key: String,
    pub hostname: String,
    pub contact_email: String,
    pub plan_type: ServerPlanType,
    pub created_at: OffsetDateTime,
}

// =============================================================================
// Insert Records
// =============================================================================

/// Input for creating a realm
#[derive(Debug, Clone)]
pub struct NewRealm {
    pub string_id: String,
    pub name: String,
    pub description: String,
    pub plan_type: RealmPlanType,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewRealmUser {
    pub realm_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Input for creating a customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub realm_id: Option<Uuid>,
    pub remote_server_id: Option<Uuid>,
    pub stripe_customer_id: Option<String>,
    pub sponsorship_pending: bool,
}

impl NewCustomer {
    /// Customer owned by a hosted realm
    pub fn for_realm(realm_id: Uuid) -> Self {
        Self {
            realm_id: Some(realm_id),
            remote_server_id: None,
            stripe_customer_id: None,
            sponsorship_pending: false,
        }
    }

    /// Customer owned by a remote server registration
    pub fn for_remote_server(remote_server_id: Uuid) -> Self {
        Self {
            realm_id: None,
            remote_server_id: Some(remote_server_id),
            stripe_customer_id: None,
            sponsorship_pending: false,
        }
    }
}

/// Input for creating a billing plan
#[derive(Debug, Clone)]
pub struct NewBillingPlan {
    pub customer_id: Uuid,
    pub tier: PlanTier,
    pub billing_schedule: BillingSchedule,
    pub status: PlanStatus,
    pub billing_cycle_anchor: OffsetDateTime,
    pub next_invoice_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
    pub price_per_license: i64,
    pub automanage_licenses: bool,
    pub charge_automatically: bool,
}

/// Input for creating a license ledger entry
#[derive(Debug, Clone)]
pub struct NewLicenseLedgerEntry {
    pub plan_id: Uuid,
    pub event_time: OffsetDateTime,
    pub licenses: i32,
    pub licenses_at_next_renewal: i32,
    pub is_renewal: bool,
}

/// Input for creating a remote server registration.
///
/// The id is supplied by the caller rather than generated by the store: the
/// registration's identity and API key are issued together.
#[derive(Debug, Clone)]
pub struct NewRemoteServer {
    pub id: Uuid,
    pub api_key: String,
    pub hostname: String,
    pub contact_email: String,
    pub plan_type: ServerPlanType,
}

// =============================================================================
// Tests
// =============================================================================
