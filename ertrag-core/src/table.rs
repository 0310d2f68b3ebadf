use serde::Serialize;

use crate::analytics::{high_change_percent, low_change_percent, price_change, price_change_percent};
use crate::export::fixed2;
use crate::{Decimal, EarningsEvent, ReportType, Sentiment};

/// Display layout of report dates in tables and chart labels (`Mar 5, 2021`).
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Currency prefix used for price cells.
pub const CURRENCY_SYMBOL: &str = "€";

/// Direction of a price move, used for coloring and arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Strictly positive move.
    Up,
    /// Strictly negative move.
    Down,
    /// No move.
    Flat,
}

impl Direction {
    /// Classify the sign of `delta`.
    #[must_use]
    pub fn of(delta: Decimal) -> Self {
        if delta > Decimal::ZERO {
            Self::Up
        } else if delta < Decimal::ZERO {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Report date, e.g. `Mar 15, 2021`.
    pub report_date: String,
    /// Report type, kept typed for badge styling.
    pub report_type: ReportType,
    /// Sentiment, kept typed for icon styling.
    pub sentiment: Sentiment,
    /// `€`-prefixed previous close.
    pub previous_close: String,
    /// `€`-prefixed day close.
    pub day_close: String,
    /// `€`-prefixed day high.
    pub day_high: String,
    /// `€`-prefixed day low.
    pub day_low: String,
    /// Absolute and relative close move, e.g. `-1.20 (-1.71%)`.
    pub price_change: String,
    /// Direction of the close move.
    pub direction: Direction,
    /// High vs previous close, e.g. `2.05%`.
    pub high_change: String,
    /// Low vs previous close, e.g. `-0.88%`.
    pub low_change: String,
}

impl From<&EarningsEvent> for TableRow {
    fn from(e: &EarningsEvent) -> Self {
        let change = price_change(e);
        Self {
            report_date: e.report_date().format(DISPLAY_DATE_FORMAT).to_string(),
            report_type: e.report_type(),
            sentiment: e.sentiment(),
            previous_close: money(e.previous_close()),
            day_close: money(e.day_close()),
            day_high: money(e.day_high()),
            day_low: money(e.day_low()),
            price_change: format!("{} ({}%)", fixed2(change), fixed2(price_change_percent(e))),
            direction: Direction::of(change),
            high_change: format!("{}%", fixed2(high_change_percent(e))),
            low_change: format!("{}%", fixed2(low_change_percent(e))),
        }
    }
}

/// Format rows for every event, preserving order.
#[must_use]
pub fn rows(events: &[EarningsEvent]) -> Vec<TableRow> {
    events.iter().map(TableRow::from).collect()
}

fn money(v: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", fixed2(v))
}
