//! Synthetic earnings generator.
//!
//! For each of four fiscal-quarter anchors the generator jitters the report date,
//! drops dates later than "today", and simulates a price reaction around a base
//! price derived from the ticker's first character. All randomness comes from the
//! caller-supplied [`Rng`], so a seeded generator yields reproducible output.

use chrono::NaiveDate;
use ertrag_core::{EarningsEvent, ReportType};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Nominal `(month, day)` report dates, one per fiscal quarter.
pub const QUARTER_ANCHORS: [(u32, u32); 4] = [(3, 15), (6, 15), (9, 15), (12, 5)];

/// Largest jitter, in days, applied to an anchor in either direction.
pub const MAX_DAY_OFFSET: i32 = 5;

/// Zero-based anchor index whose report is the annual one.
const ANNUAL_QUARTER: u32 = 3;

/// Base price for `symbol`: `30 + (first UTF-16 unit mod 5) * 40`.
///
/// Returns `None` for an empty symbol.
#[must_use]
pub fn base_price(symbol: &str) -> Option<f64> {
    let code = symbol.encode_utf16().next()?;
    Some(30.0 + f64::from(code % 5) * 40.0)
}

/// Generate the earnings events of `symbol` for `year` as seen on `today`.
///
/// Quarters whose jittered date lies after `today` are skipped without affecting
/// later quarters. Never fails: an empty symbol or a year chrono cannot represent
/// yields fewer (possibly zero) events.
pub fn generate<R: Rng>(
    rng: &mut R,
    symbol: &str,
    year: i32,
    today: NaiveDate,
) -> Vec<EarningsEvent> {
    let Some(base) = base_price(symbol) else {
        #[cfg(feature = "tracing")]
        tracing::debug!(year, "empty symbol; no earnings generated");
        return Vec::new();
    };

    let mut out = Vec::with_capacity(QUARTER_ANCHORS.len());
    for (index, (month, anchor_day)) in (0u32..).zip(QUARTER_ANCHORS) {
        let offset = rng.random_range(-MAX_DAY_OFFSET..=MAX_DAY_OFFSET);
        let day = anchor_day.saturating_add_signed(offset).clamp(1, 28);
        let Some(report_date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        if report_date > today {
            #[cfg(feature = "tracing")]
            tracing::debug!(%report_date, %today, quarter = index, "skipping future report");
            continue;
        }
        if let Some(event) = simulate_reaction(rng, base, index, report_date) {
            out.push(event);
        }
    }
    out
}

/// [`generate`] with the thread-local RNG and the local calendar date.
#[must_use]
pub fn generate_now(symbol: &str, year: i32) -> Vec<EarningsEvent> {
    generate(
        &mut rand::rng(),
        symbol,
        year,
        chrono::Local::now().date_naive(),
    )
}

fn simulate_reaction<R: Rng>(
    rng: &mut R,
    base: f64,
    quarter: u32,
    report_date: NaiveDate,
) -> Option<EarningsEvent> {
    let volatility = 0.02 + rng.random::<f64>() * 0.03;
    // mild upward drift through the year
    let drift = f64::from(quarter) * 0.05;
    let previous_close = base * (1.0 + rng.random::<f64>() * 0.4 - 0.2 + drift);

    let positive = rng.random::<f64>() > 0.5;
    let swing = rng.random::<f64>() * volatility * 3.0;
    let reaction = if positive { 1.0 + swing } else { 1.0 - swing };
    let day_close = previous_close * reaction;

    let day_high = previous_close.max(day_close) * (1.0 + rng.random::<f64>() * 0.02);
    let day_low = previous_close.min(day_close) * (1.0 - rng.random::<f64>() * 0.02);

    let report_type = if quarter == ANNUAL_QUARTER {
        ReportType::Annual
    } else {
        ReportType::Quarterly
    };

    let built = EarningsEvent::new(
        report_date,
        report_type,
        Decimal::from_f64(previous_close)?,
        Decimal::from_f64(day_close)?,
        Decimal::from_f64(day_high)?,
        Decimal::from_f64(day_low)?,
    );
    match built {
        Ok(event) => Some(event),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, %report_date, "discarding generated event");
            None
        }
    }
}
