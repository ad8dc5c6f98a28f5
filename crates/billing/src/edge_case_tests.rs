// Test file - these are expected patterns in test code
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Edge Case Tests for Billing Date Arithmetic and Plan Construction
//!
//! Boundary conditions around month-end clamping, leap years, and plan
//! windows built from parsed wire timestamps.

#[cfg(test)]
mod schedule_tests {
    use crate::schedule::{add_months, parse_timestamp};
    use time::macros::datetime;

    // =========================================================================
    // Leap day plus a year clamps back to Feb 28
    // =========================================================================
    #[test]
    fn test_leap_day_plus_twelve_months_clamps() {
        let leap_day = datetime!(2024-02-29 06:00:00 UTC);
        assert_eq!(
            add_months(leap_day, 12).unwrap(),
            datetime!(2025-02-28 06:00:00 UTC)
        );
    }

    // =========================================================================
    // Clamping applies per jump, not cumulatively: one two-month jump from
    // Oct 31 keeps day 31, while two one-month hops land on Dec 30
    // =========================================================================
    #[test]
    fn test_clamping_is_per_jump() {
        let oct31 = datetime!(2025-10-31 00:00:00 UTC);

        assert_eq!(
            add_months(oct31, 2).unwrap(),
            datetime!(2025-12-31 00:00:00 UTC)
        );

        let nov30 = add_months(oct31, 1).unwrap();
        assert_eq!(nov30, datetime!(2025-11-30 00:00:00 UTC));
        assert_eq!(
            add_months(nov30, 1).unwrap(),
            datetime!(2025-12-30 00:00:00 UTC)
        );
    }

    // =========================================================================
    // Large month counts cross several year boundaries
    // =========================================================================
    #[test]
    fn test_many_months_cross_years() {
        let start = datetime!(2025-01-15 12:00:00 UTC);
        assert_eq!(
            add_months(start, 25).unwrap(),
            datetime!(2027-02-15 12:00:00 UTC)
        );
    }

    // =========================================================================
    // Wire timestamps reject partial and padded forms
    // =========================================================================
    #[test]
    fn test_wire_format_is_strict() {
        assert!(parse_timestamp("2030-10-10-01-10").is_err());
        assert!(parse_timestamp("2030-10-10-01-10-10-00").is_err());
        assert!(parse_timestamp(" 2030-10-10-01-10-10").is_err());
    }
}

#[cfg(test)]
mod plan_tests {
    use crate::plans::{legacy_plan, paid_plan, LegacyPlanParams, PaidPlanParams};
    use crate::schedule::parse_timestamp;
    use parlor_shared::{BillingSchedule, PlanStatus, PlanTier};
    use time::macros::datetime;
    use uuid::Uuid;

    // =========================================================================
    // A monthly plan anchored on Jan 31 invoices on the clamped Feb 28
    // =========================================================================
    #[test]
    fn test_month_end_anchor_invoices_on_clamped_day() {
        let plan = paid_plan(PaidPlanParams {
            customer_id: Uuid::new_v4(),
            tier: PlanTier::CloudStandard,
            billing_schedule: BillingSchedule::Monthly,
            status: PlanStatus::Active,
            automanage_licenses: false,
            charge_automatically: true,
            price_per_license: 1200,
            billing_cycle_anchor: datetime!(2025-01-31 18:45:00 UTC),
        })
        .unwrap();

        assert_eq!(
            plan.next_invoice_date,
            Some(datetime!(2025-02-28 18:45:00 UTC))
        );
    }

    // =========================================================================
    // A legacy plan window built from wire timestamps keeps both endpoints
    // =========================================================================
    #[test]
    fn test_legacy_window_from_wire_timestamps() {
        let renewal = parse_timestamp("2025-08-23-10-00-00").unwrap();
        let end = parse_timestamp("2030-10-10-01-10-10").unwrap();

        let plan = legacy_plan(LegacyPlanParams {
            customer_id: Uuid::new_v4(),
            renewal_date: renewal,
            end_date: end,
        });

        assert_eq!(plan.billing_cycle_anchor, datetime!(2025-08-23 10:00:00 UTC));
        assert_eq!(plan.end_date, Some(datetime!(2030-10-10 01:10:10 UTC)));
        assert_eq!(plan.next_invoice_date, None);
    }
}
