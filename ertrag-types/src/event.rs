//! Earnings event record and its classification enums.

use core::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ErtragError;

/// Number of decimal places carried by every price figure.
pub const PRICE_SCALE: u32 = 2;

/// Round a price to [`PRICE_SCALE`] decimals, midpoints away from zero.
#[must_use]
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage change from `base` to `value`, i.e. `(value - base) / base * 100`.
///
/// Returns `None` when `base` is zero.
#[must_use]
pub fn percent_change(base: Decimal, value: Decimal) -> Option<Decimal> {
    (value - base)
        .checked_div(base)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
}

/// Kind of financial report an earnings event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Interim quarterly report.
    Quarterly,
    /// Full-year report (the December slot).
    Annual,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quarterly => f.write_str("Quarterly"),
            Self::Annual => f.write_str("Annual"),
        }
    }
}

/// Three-way classification of the market reaction to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Close moved up by more than [`Sentiment::THRESHOLD_PERCENT`].
    Positive,
    /// Close moved down by more than [`Sentiment::THRESHOLD_PERCENT`].
    Negative,
    /// Anything in between, bounds included.
    Neutral,
}

impl Sentiment {
    /// Magnitude (in percent) a move must exceed to count as positive or negative.
    pub const THRESHOLD_PERCENT: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

    /// Classify a percentage change of the close against the previous close.
    #[must_use]
    pub fn from_change_percent(percent: Decimal) -> Self {
        if percent > Self::THRESHOLD_PERCENT {
            Self::Positive
        } else if percent < -Self::THRESHOLD_PERCENT {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Numeric score used for charting: `+1`, `0` or `-1`.
    #[must_use]
    pub const fn score(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Neutral => 0,
            Self::Negative => -1,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("Positive"),
            Self::Negative => f.write_str("Negative"),
            Self::Neutral => f.write_str("Neutral"),
        }
    }
}

/// Price reaction around a single earnings report.
///
/// Instances can only be built through [`EarningsEvent::new`], which rounds every
/// price to two decimals and rejects records whose day range does not contain both
/// the previous close and the day close. The sentiment is always derived from the
/// stored prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventFields")]
pub struct EarningsEvent {
    report_date: NaiveDate,
    report_type: ReportType,
    previous_close: Decimal,
    day_close: Decimal,
    day_high: Decimal,
    day_low: Decimal,
    sentiment: Sentiment,
}

impl EarningsEvent {
    /// Build a validated event.
    ///
    /// # Errors
    /// Returns `InvalidArg` if any price is not strictly positive after rounding,
    /// or if `day_high`/`day_low` do not bound both closes.
    pub fn new(
        report_date: NaiveDate,
        report_type: ReportType,
        previous_close: Decimal,
        day_close: Decimal,
        day_high: Decimal,
        day_low: Decimal,
    ) -> Result<Self, ErtragError> {
        let previous_close = round_price(previous_close);
        let day_close = round_price(day_close);
        let day_high = round_price(day_high);
        let day_low = round_price(day_low);

        for (label, v) in [
            ("previous close", previous_close),
            ("day close", day_close),
            ("day high", day_high),
            ("day low", day_low),
        ] {
            if v <= Decimal::ZERO {
                return Err(ErtragError::invalid_arg(format!(
                    "{label} must be positive, got {v}"
                )));
            }
        }
        if day_high < previous_close.max(day_close) {
            return Err(ErtragError::invalid_arg(format!(
                "day high {day_high} below closes {previous_close}/{day_close}"
            )));
        }
        if day_low > previous_close.min(day_close) {
            return Err(ErtragError::invalid_arg(format!(
                "day low {day_low} above closes {previous_close}/{day_close}"
            )));
        }

        // previous_close > 0 was checked above
        let change = percent_change(previous_close, day_close).unwrap_or_default();
        Ok(Self {
            report_date,
            report_type,
            previous_close,
            day_close,
            day_high,
            day_low,
            sentiment: Sentiment::from_change_percent(change),
        })
    }

    /// Date the report was published.
    #[must_use]
    pub const fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    /// Quarterly or annual report.
    #[must_use]
    pub const fn report_type(&self) -> ReportType {
        self.report_type
    }

    /// Close of the trading day before the report.
    #[must_use]
    pub const fn previous_close(&self) -> Decimal {
        self.previous_close
    }

    /// Close on the report day.
    #[must_use]
    pub const fn day_close(&self) -> Decimal {
        self.day_close
    }

    /// Intraday high on the report day.
    #[must_use]
    pub const fn day_high(&self) -> Decimal {
        self.day_high
    }

    /// Intraday low on the report day.
    #[must_use]
    pub const fn day_low(&self) -> Decimal {
        self.day_low
    }

    /// Market reaction classification.
    #[must_use]
    pub const fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventFields {
    report_date: NaiveDate,
    report_type: ReportType,
    previous_close: Decimal,
    day_close: Decimal,
    day_high: Decimal,
    day_low: Decimal,
}

impl TryFrom<EventFields> for EarningsEvent {
    type Error = ErtragError;

    fn try_from(f: EventFields) -> Result<Self, Self::Error> {
        Self::new(
            f.report_date,
            f.report_type,
            f.previous_close,
            f.day_close,
            f.day_high,
            f.day_low,
        )
    }
}
