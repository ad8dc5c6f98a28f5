//! Billing-cycle date arithmetic
//!
//! Plan windows and invoice dates move in calendar months, not fixed-length
//! durations: adding a month to Jan 31 gives the last day of February. The
//! textual timestamp format here is shared with the host product's tooling.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use parlor_shared::BillingSchedule;

use crate::error::{BillingError, BillingResult};

/// Wire format for plan window timestamps: `YYYY-MM-DD-hh-mm-ss`, UTC
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]-[hour]-[minute]-[second]");

/// Parse a timestamp in the wire format, assuming UTC
pub fn parse_timestamp(value: &str) -> BillingResult<OffsetDateTime> {
    let parsed = PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT).map_err(|e| {
        BillingError::InvalidTimestamp(format!("Invalid timestamp '{}': {}", value, e))
    })?;

    Ok(parsed.assume_utc())
}

/// Format a timestamp in the wire format, normalized to UTC
pub fn format_timestamp(value: OffsetDateTime) -> BillingResult<String> {
    value
        .to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| BillingError::InvalidTimestamp(format!("Unformattable timestamp: {}", e)))
}

/// Add calendar months, clamping the day to the target month's length.
///
/// Adding 12 months lands on the same calendar day a year later; Jan 31 plus
/// one month is Feb 28 (29 in leap years). The time of day is preserved.
pub fn add_months(value: OffsetDateTime, months: u32) -> BillingResult<OffsetDateTime> {
    let zero_based = u32::from(u8::from(value.month())) - 1 + months;
    let year = value.year() + (zero_based / 12) as i32;
    let month = Month::try_from((zero_based % 12 + 1) as u8)
        .map_err(|e| BillingError::InvalidTimestamp(e.to_string()))?;
    let day = value.day().min(days_in_month(year, month));

    let date = Date::from_calendar_date(year, month, day)
        .map_err(|e| BillingError::InvalidTimestamp(e.to_string()))?;

    Ok(PrimitiveDateTime::new(date, value.time()).assume_offset(value.offset()))
}

/// Date of the first invoice after a billing-cycle anchor
pub fn next_invoice_date(
    anchor: OffsetDateTime,
    schedule: BillingSchedule,
) -> BillingResult<OffsetDateTime> {
    add_months(anchor, schedule.months_per_cycle())
}

fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if time::util::is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}
