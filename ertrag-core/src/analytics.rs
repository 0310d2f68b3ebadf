use rust_decimal::Decimal;

use crate::{EarningsEvent, percent_change};

// Every `EarningsEvent` carries a strictly positive previous close, so the
// divisions below cannot fail; the zero fallback is unreachable.

/// Absolute move of the close: `day_close - previous_close`.
#[must_use]
pub fn price_change(e: &EarningsEvent) -> Decimal {
    e.day_close() - e.previous_close()
}

/// `(day_close - previous_close) / previous_close * 100`.
#[must_use]
pub fn price_change_percent(e: &EarningsEvent) -> Decimal {
    percent_change(e.previous_close(), e.day_close()).unwrap_or_default()
}

/// `(day_high - previous_close) / previous_close * 100`. Never negative.
#[must_use]
pub fn high_change_percent(e: &EarningsEvent) -> Decimal {
    percent_change(e.previous_close(), e.day_high()).unwrap_or_default()
}

/// `(day_low - previous_close) / previous_close * 100`. Never positive.
#[must_use]
pub fn low_change_percent(e: &EarningsEvent) -> Decimal {
    percent_change(e.previous_close(), e.day_low()).unwrap_or_default()
}
