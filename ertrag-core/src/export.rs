use serde::Serialize;

use crate::analytics::{high_change_percent, low_change_percent, price_change_percent};
use crate::{Decimal, EarningsEvent, ErtragError, PRICE_SCALE, round_price};

/// Column headers of the exported table, in order.
pub const HEADERS: [&str; 10] = [
    "Report Date",
    "Report Type",
    "Sentiment",
    "Previous Close",
    "Day Close",
    "Day High",
    "Day Low",
    "Price Change %",
    "High Change %",
    "Low Change %",
];

/// Date layout of the first column (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A ready-to-save CSV document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    /// Suggested download name, `{SYMBOL}_{year}_earnings.csv`.
    pub file_name: String,
    /// CSV text, `\n`-separated, without a trailing newline.
    pub content: String,
}

impl CsvExport {
    /// Export `events` for `symbol`/`year`; `None` when there is nothing to export.
    ///
    /// # Errors
    /// Returns `Data` if the CSV writer fails.
    pub fn build(
        symbol: &str,
        year: i32,
        events: &[EarningsEvent],
    ) -> Result<Option<Self>, ErtragError> {
        Ok(to_csv(events)?.map(|content| Self {
            file_name: file_name(symbol, year),
            content,
        }))
    }
}

/// Suggested file name for an export.
#[must_use]
pub fn file_name(symbol: &str, year: i32) -> String {
    format!("{symbol}_{year}_earnings.csv")
}

/// Format a value with exactly two decimals, rounding midpoints away from zero.
#[must_use]
pub fn fixed2(value: Decimal) -> String {
    let mut v = round_price(value);
    v.rescale(PRICE_SCALE);
    v.to_string()
}

/// The ten cells of one exported row.
#[must_use]
pub fn row(e: &EarningsEvent) -> [String; 10] {
    [
        e.report_date().format(DATE_FORMAT).to_string(),
        e.report_type().to_string(),
        e.sentiment().to_string(),
        fixed2(e.previous_close()),
        fixed2(e.day_close()),
        fixed2(e.day_high()),
        fixed2(e.day_low()),
        fixed2(price_change_percent(e)),
        fixed2(high_change_percent(e)),
        fixed2(low_change_percent(e)),
    ]
}

/// Render `events` as CSV text with a header row.
///
/// Returns `Ok(None)` for an empty slice: exporting nothing is a no-op.
///
/// # Errors
/// Returns `Data` if the CSV writer fails.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "ertrag_core::export::to_csv", skip(events), fields(rows = events.len()))
)]
pub fn to_csv(events: &[EarningsEvent]) -> Result<Option<String>, ErtragError> {
    if events.is_empty() {
        return Ok(None);
    }
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    w.write_record(HEADERS).map_err(csv_error)?;
    for e in events {
        w.write_record(row(e)).map_err(csv_error)?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| ErtragError::Data(format!("csv flush: {e}")))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| ErtragError::Data(format!("csv utf-8: {e}")))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(Some(text))
}

fn csv_error(e: csv::Error) -> ErtragError {
    ErtragError::Data(format!("csv: {e}"))
}
