//! Billing plan construction

use time::OffsetDateTime;
use uuid::Uuid;

use parlor_shared::{
    BillingSchedule, NewBillingPlan, NewLicenseLedgerEntry, PlanStatus, PlanTier,
};

use crate::error::BillingResult;
use crate::schedule;

/// Inputs for a paying customer's plan
#[derive(Debug, Clone)]
pub struct PaidPlanParams {
    pub customer_id: Uuid,
    pub tier: PlanTier,
    pub billing_schedule: BillingSchedule,
    pub status: PlanStatus,
    pub automanage_licenses: bool,
    pub charge_automatically: bool,
    /// Per-seat price in cents
    pub price_per_license: i64,
    pub billing_cycle_anchor: OffsetDateTime,
}

/// Build a plan for a paying customer, invoiced one billing cycle after the
/// anchor
pub fn paid_plan(params: PaidPlanParams) -> BillingResult<NewBillingPlan> {
    let next_invoice_date =
        schedule::next_invoice_date(params.billing_cycle_anchor, params.billing_schedule)?;

    Ok(NewBillingPlan {
        customer_id: params.customer_id,
        tier: params.tier,
        billing_schedule: params.billing_schedule,
        status: params.status,
        billing_cycle_anchor: params.billing_cycle_anchor,
        next_invoice_date: Some(next_invoice_date),
        end_date: None,
        price_per_license: params.price_per_license,
        automanage_licenses: params.automanage_licenses,
        charge_automatically: params.charge_automatically,
    })
}

/// Inputs for enrolling a self-hosted server on the legacy plan
#[derive(Debug, Clone)]
pub struct LegacyPlanParams {
    pub customer_id: Uuid,
    /// Start of the covered window
    pub renewal_date: OffsetDateTime,
    /// End of the covered window
    pub end_date: OffsetDateTime,
}

/// Build a time-bounded legacy plan for a self-hosted server.
///
/// Legacy plans are never invoiced: they carry a zero per-seat price, no next
/// invoice date, and expire at the end of their window.
pub fn legacy_plan(params: LegacyPlanParams) -> NewBillingPlan {
    NewBillingPlan {
        customer_id: params.customer_id,
        tier: PlanTier::SelfHostedLegacy,
        billing_schedule: BillingSchedule::Annual,
        status: PlanStatus::Active,
        billing_cycle_anchor: params.renewal_date,
        next_invoice_date: None,
        end_date: Some(params.end_date),
        price_per_license: 0,
        automanage_licenses: true,
        charge_automatically: false,
    }
}

/// Build the ledger entry recorded when a plan is first provisioned
pub fn initial_license_ledger(
    plan_id: Uuid,
    event_time: OffsetDateTime,
    licenses: i32,
) -> NewLicenseLedgerEntry {
    NewLicenseLedgerEntry {
        plan_id,
        event_time,
        licenses,
        licenses_at_next_renewal: licenses,
        is_renewal: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_paid_plan_monthly_invoices_one_month_out() {
        let anchor = datetime!(2025-05-20 09:00:00 UTC);
        let plan = paid_plan(PaidPlanParams {
            customer_id: Uuid::new_v4(),
            tier: PlanTier::CloudStandard,
            billing_schedule: BillingSchedule::Monthly,
            status: PlanStatus::Active,
            automanage_licenses: false,
            charge_automatically: true,
            price_per_license: 1200,
            billing_cycle_anchor: anchor,
        })
        .unwrap();

        assert_eq!(plan.billing_cycle_anchor, anchor);
        assert_eq!(
            plan.next_invoice_date,
            Some(datetime!(2025-06-20 09:00:00 UTC))
        );
        assert_eq!(plan.end_date, None);
    }

    #[test]
    fn test_paid_plan_annual_invoices_twelve_months_out() {
        let anchor = datetime!(2025-05-20 09:00:00 UTC);
        let plan = paid_plan(PaidPlanParams {
            customer_id: Uuid::new_v4(),
            tier: PlanTier::CloudPlus,
            billing_schedule: BillingSchedule::Annual,
            status: PlanStatus::Active,
            automanage_licenses: true,
            charge_automatically: true,
            price_per_license: 1200,
            billing_cycle_anchor: anchor,
        })
        .unwrap();

        assert_eq!(
            plan.next_invoice_date,
            Some(datetime!(2026-05-20 09:00:00 UTC))
        );
    }

    #[test]
    fn test_legacy_plan_covers_window_without_invoicing() {
        let customer_id = Uuid::new_v4();
        let renewal = datetime!(2025-08-01 00:00:00 UTC);
        let end = datetime!(2030-10-10 01:10:10 UTC);

        let plan = legacy_plan(LegacyPlanParams {
            customer_id,
            renewal_date: renewal,
            end_date: end,
        });

        assert_eq!(plan.customer_id, customer_id);
        assert_eq!(plan.tier, PlanTier::SelfHostedLegacy);
        assert_eq!(plan.status, PlanStatus::Active);
        assert_eq!(plan.billing_cycle_anchor, renewal);
        assert_eq!(plan.end_date, Some(end));
        assert_eq!(plan.next_invoice_date, None);
        assert_eq!(plan.price_per_license, 0);
        assert!(plan.automanage_licenses);
        assert!(!plan.charge_automatically);
    }

    #[test]
    fn test_initial_ledger_mirrors_license_count() {
        let entry = initial_license_ledger(
            Uuid::new_v4(),
            datetime!(2025-08-01 00:00:00 UTC),
            10,
        );
        assert_eq!(entry.licenses, 10);
        assert_eq!(entry.licenses_at_next_renewal, 10);
        assert!(entry.is_renewal);
    }
}
