//! Fixture profile catalog
//!
//! The ordered list of billing states the seeder provisions, plus the
//! decision tables mapping a profile's tier onto the realm- and server-level
//! plan classifications.

use time::OffsetDateTime;

use parlor_billing::{format_timestamp, BillingError, BillingResult};
use parlor_shared::{BillingSchedule, PlanStatus, PlanTier, RealmPlanType, ServerPlanType};

/// What kind of fixture a profile provisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Realm,
    RemoteServer,
}

/// One fixture billing state
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    /// Unique identifier; doubles as the realm `string_id` or the server
    /// hostname stem
    pub unique_id: String,
    pub kind: ProfileKind,
    pub billing_schedule: BillingSchedule,
    pub tier: Option<PlanTier>,
    /// Tier a scheduled plan switch will move to
    pub successor_tier: Option<PlanTier>,
    pub automanage_licenses: bool,
    pub status: PlanStatus,
    pub sponsorship_pending: bool,
    pub is_sponsored: bool,
    /// Payment-method token; empty means no stored card
    pub card: String,
    pub charge_automatically: bool,
    /// Plan window start, in the wire timestamp format
    pub renewal_date: String,
    /// Plan window end, in the wire timestamp format
    pub end_date: String,
}

const DEFAULT_END_DATE: &str = "2030-10-10-01-10-10";

/// The full fixture catalog, in provisioning order.
///
/// `now` seeds the default renewal timestamp so one run shares a single
/// window start.
pub fn customer_profiles(now: OffsetDateTime) -> BillingResult<Vec<CustomerProfile>> {
    let base = CustomerProfile {
        unique_id: String::new(),
        kind: ProfileKind::Realm,
        billing_schedule: BillingSchedule::Annual,
        tier: None,
        successor_tier: None,
        automanage_licenses: false,
        status: PlanStatus::Active,
        sponsorship_pending: false,
        is_sponsored: false,
        card: String::new(),
        charge_automatically: true,
        renewal_date: format_timestamp(now)?,
        end_date: DEFAULT_END_DATE.to_string(),
    };

    Ok(vec![
        CustomerProfile {
            unique_id: "sponsorship-pending".to_string(),
            sponsorship_pending: true,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "annual-free".to_string(),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "annual-standard".to_string(),
            tier: Some(PlanTier::CloudStandard),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "annual-plus".to_string(),
            tier: Some(PlanTier::CloudPlus),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "monthly-free".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "monthly-standard".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "monthly-plus".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudPlus),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "downgrade-end-of-cycle".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            status: PlanStatus::DowngradeAtEndOfCycle,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "standard-automanage-licenses".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            automanage_licenses: true,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "standard-automatic-card".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            card: "pm_card_visa".to_string(),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "standard-invoice-payment".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            charge_automatically: false,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "standard-switch-to-annual-eoc".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            status: PlanStatus::SwitchToAnnualAtEndOfCycle,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "sponsored".to_string(),
            billing_schedule: BillingSchedule::Monthly,
            tier: Some(PlanTier::CloudStandard),
            is_sponsored: true,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "free-trial".to_string(),
            tier: Some(PlanTier::CloudStandard),
            status: PlanStatus::FreeTrial,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "legacy-server".to_string(),
            kind: ProfileKind::RemoteServer,
            tier: Some(PlanTier::SelfHostedLegacy),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "legacy-server-upgrade-scheduled".to_string(),
            kind: ProfileKind::RemoteServer,
            tier: Some(PlanTier::SelfHostedLegacy),
            successor_tier: Some(PlanTier::SelfHostedPlus),
            status: PlanStatus::SwitchPlanTierAtPlanEnd,
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "business-server".to_string(),
            kind: ProfileKind::RemoteServer,
            tier: Some(PlanTier::SelfHostedBusiness),
            ..base.clone()
        },
        CustomerProfile {
            unique_id: "business-server-payment-starts-in-future".to_string(),
            kind: ProfileKind::RemoteServer,
            tier: Some(PlanTier::SelfHostedBusiness),
            ..base
        },
    ])
}

/// Realm plan classification from a profile's tier and sponsorship flag
pub fn realm_plan_type(
    tier: Option<PlanTier>,
    is_sponsored: bool,
) -> BillingResult<RealmPlanType> {
    match tier {
        None => Ok(RealmPlanType::Limited),
        Some(PlanTier::CloudStandard) if is_sponsored => Ok(RealmPlanType::StandardFree),
        Some(PlanTier::CloudStandard) => Ok(RealmPlanType::Standard),
        Some(PlanTier::CloudPlus) => Ok(RealmPlanType::Plus),
        Some(other) => Err(BillingError::InvalidTier(format!(
            "Unexpected tier {} for a realm profile",
            other
        ))),
    }
}

/// Remote-server plan classification from a profile's tier
pub fn server_plan_type(tier: Option<PlanTier>) -> BillingResult<ServerPlanType> {
    match tier {
        Some(PlanTier::SelfHostedLegacy) => Ok(ServerPlanType::SelfHosted),
        Some(PlanTier::SelfHostedBusiness) => Ok(ServerPlanType::Business),
        other => {
            let label = other
                .map(|tier| tier.to_string())
                .unwrap_or_else(|| "none".to_string());
            Err(BillingError::InvalidTier(format!(
                "Unexpected tier {} for a remote server profile",
                label
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::macros::datetime;

    fn profiles() -> Vec<CustomerProfile> {
        customer_profiles(datetime!(2026-01-15 12:00:00 UTC)).unwrap()
    }

    #[test]
    fn test_catalog_identifiers_are_unique_and_short() {
        let profiles = profiles();
        let ids: HashSet<&str> = profiles.iter().map(|p| p.unique_id.as_str()).collect();

        assert_eq!(ids.len(), profiles.len());
        for profile in &profiles {
            assert!(
                profile.unique_id.len() < 40,
                "identifier too long: {}",
                profile.unique_id
            );
        }
    }

    #[test]
    fn test_catalog_kind_split() {
        let profiles = profiles();
        let realms = profiles
            .iter()
            .filter(|p| p.kind == ProfileKind::Realm)
            .count();
        let servers = profiles
            .iter()
            .filter(|p| p.kind == ProfileKind::RemoteServer)
            .count();

        assert_eq!(realms, 14);
        assert_eq!(servers, 4);
        assert_eq!(profiles.len(), 18);
    }

    #[test]
    fn test_defaults_flow_from_base_profile() {
        let profiles = profiles();
        let annual_free = profiles
            .iter()
            .find(|p| p.unique_id == "annual-free")
            .unwrap();

        assert_eq!(annual_free.billing_schedule, BillingSchedule::Annual);
        assert_eq!(annual_free.tier, None);
        assert_eq!(annual_free.status, PlanStatus::Active);
        assert!(annual_free.charge_automatically);
        assert!(annual_free.card.is_empty());
        assert_eq!(annual_free.renewal_date, "2026-01-15-12-00-00");
        assert_eq!(annual_free.end_date, "2030-10-10-01-10-10");
    }

    #[test]
    fn test_upgrade_scheduled_server_carries_successor_tier() {
        let profiles = profiles();
        let upgrade = profiles
            .iter()
            .find(|p| p.unique_id == "legacy-server-upgrade-scheduled")
            .unwrap();

        assert_eq!(upgrade.kind, ProfileKind::RemoteServer);
        assert_eq!(upgrade.tier, Some(PlanTier::SelfHostedLegacy));
        assert_eq!(upgrade.successor_tier, Some(PlanTier::SelfHostedPlus));
        assert_eq!(upgrade.status, PlanStatus::SwitchPlanTierAtPlanEnd);
    }

    #[test]
    fn test_realm_plan_type_decision_table() {
        assert_eq!(realm_plan_type(None, false).unwrap(), RealmPlanType::Limited);
        assert_eq!(
            realm_plan_type(Some(PlanTier::CloudStandard), true).unwrap(),
            RealmPlanType::StandardFree
        );
        assert_eq!(
            realm_plan_type(Some(PlanTier::CloudStandard), false).unwrap(),
            RealmPlanType::Standard
        );
        assert_eq!(
            realm_plan_type(Some(PlanTier::CloudPlus), false).unwrap(),
            RealmPlanType::Plus
        );
    }

    #[test]
    fn test_realm_plan_type_rejects_self_hosted_tiers() {
        let err = realm_plan_type(Some(PlanTier::SelfHostedLegacy), false).unwrap_err();
        assert!(matches!(err, BillingError::InvalidTier(_)));
    }

    #[test]
    fn test_server_plan_type_decision_table() {
        assert_eq!(
            server_plan_type(Some(PlanTier::SelfHostedLegacy)).unwrap(),
            ServerPlanType::SelfHosted
        );
        assert_eq!(
            server_plan_type(Some(PlanTier::SelfHostedBusiness)).unwrap(),
            ServerPlanType::Business
        );
    }

    #[test]
    fn test_server_plan_type_rejects_cloud_and_missing_tiers() {
        assert!(matches!(
            server_plan_type(Some(PlanTier::CloudPlus)),
            Err(BillingError::InvalidTier(_))
        ));
        assert!(matches!(
            server_plan_type(None),
            Err(BillingError::InvalidTier(_))
        ));
    }
}
