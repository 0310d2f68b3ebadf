use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::analytics::{high_change_percent, low_change_percent, price_change_percent};
use crate::table::DISPLAY_DATE_FORMAT;
use crate::{Decimal, EarningsEvent, Sentiment};

/// Which bar chart to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ChartKind {
    /// Close vs previous close, one bar per report.
    #[default]
    PriceChange,
    /// High and low vs previous close, two bars per report.
    HighLow,
    /// Sentiment score (+1/0/-1) per report.
    Sentiment,
}

impl ChartKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 3] = [Self::PriceChange, Self::HighLow, Self::Sentiment];

    /// One-line explanation shown next to the chart.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PriceChange => {
                "Percentage change between the previous day close and the earnings day close price."
            }
            Self::HighLow => {
                "Percentage change between the previous day close and the day high/low prices on earnings dates."
            }
            Self::Sentiment => "Sentiment of each earnings report based on market reaction.",
        }
    }

    fn title(self, company_name: &str) -> String {
        match self {
            Self::PriceChange => format!("{company_name} Price Change % on Earnings Dates"),
            Self::HighLow => format!("{company_name} High/Low Change % on Earnings Dates"),
            Self::Sentiment => format!("{company_name} Earnings Report Sentiment"),
        }
    }

    const fn y_axis(self) -> &'static str {
        match self {
            Self::Sentiment => "Sentiment",
            Self::PriceChange | Self::HighLow => "Change (%)",
        }
    }
}

/// Coloring hint for a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarTone {
    /// Rising or positive.
    Gain,
    /// Falling or negative.
    Loss,
    /// Neither.
    Neutral,
    /// Day-high series.
    High,
    /// Day-low series.
    Low,
}

/// One labelled series of bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Legend label.
    pub label: String,
    /// One value per chart label.
    pub values: Vec<f64>,
    /// One tone per value.
    pub tones: Vec<BarTone>,
}

/// Bar chart view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Which chart this is.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// Y-axis caption.
    pub y_axis: &'static str,
    /// X-axis labels (report dates), oldest first.
    pub labels: Vec<String>,
    /// Series to draw.
    pub datasets: Vec<Dataset>,
}

impl Chart {
    /// Build a chart of `kind` for `events`, sorted by report date.
    #[must_use]
    pub fn build(kind: ChartKind, company_name: &str, events: &[EarningsEvent]) -> Self {
        let mut sorted: Vec<&EarningsEvent> = events.iter().collect();
        sorted.sort_by_key(|e| e.report_date());

        let labels = sorted
            .iter()
            .map(|e| e.report_date().format(DISPLAY_DATE_FORMAT).to_string())
            .collect();

        let datasets = match kind {
            ChartKind::PriceChange => vec![Dataset {
                label: "Price Change %".into(),
                values: sorted.iter().map(|e| as_f64(price_change_percent(e))).collect(),
                tones: sorted
                    .iter()
                    .map(|e| {
                        if e.day_close() >= e.previous_close() {
                            BarTone::Gain
                        } else {
                            BarTone::Loss
                        }
                    })
                    .collect(),
            }],
            ChartKind::HighLow => vec![
                Dataset {
                    label: "Day High Change %".into(),
                    values: sorted.iter().map(|e| as_f64(high_change_percent(e))).collect(),
                    tones: vec![BarTone::High; sorted.len()],
                },
                Dataset {
                    label: "Day Low Change %".into(),
                    values: sorted.iter().map(|e| as_f64(low_change_percent(e))).collect(),
                    tones: vec![BarTone::Low; sorted.len()],
                },
            ],
            ChartKind::Sentiment => vec![Dataset {
                label: "Earnings Sentiment".into(),
                values: sorted
                    .iter()
                    .map(|e| f64::from(e.sentiment().score()))
                    .collect(),
                tones: sorted
                    .iter()
                    .map(|e| match e.sentiment() {
                        Sentiment::Positive => BarTone::Gain,
                        Sentiment::Negative => BarTone::Loss,
                        Sentiment::Neutral => BarTone::Neutral,
                    })
                    .collect(),
            }],
        };

        Self {
            kind,
            title: kind.title(company_name),
            y_axis: kind.y_axis(),
            labels,
            datasets,
        }
    }
}

fn as_f64(v: Decimal) -> f64 {
    v.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NaiveDate, ReportType};

    fn ev(m: u32, prev: i64, close: i64) -> EarningsEvent {
        EarningsEvent::new(
            NaiveDate::from_ymd_opt(2019, m, 10).unwrap(),
            ReportType::Quarterly,
            Decimal::new(prev, 2),
            Decimal::new(close, 2),
            Decimal::new(prev.max(close) + 100, 2),
            Decimal::new(prev.min(close) - 100, 2),
        )
        .unwrap()
    }

    #[test]
    fn price_change_chart_sorts_and_tones() {
        let events = [ev(9, 10_000, 9_000), ev(3, 10_000, 10_500)];
        let chart = Chart::build(ChartKind::PriceChange, "SAP", &events);
        assert_eq!(chart.title, "SAP Price Change % on Earnings Dates");
        assert_eq!(chart.labels, vec!["Mar 10, 2019", "Sep 10, 2019"]);
        let ds = &chart.datasets[0];
        assert_eq!(ds.tones, vec![BarTone::Gain, BarTone::Loss]);
        assert!((ds.values[0] - 5.0).abs() < 1e-9);
        assert!((ds.values[1] + 10.0).abs() < 1e-9);
    }

    #[test]
    fn high_low_chart_has_two_series() {
        let chart = Chart::build(ChartKind::HighLow, "BMW", &[ev(6, 10_000, 10_100)]);
        assert_eq!(chart.datasets.len(), 2);
        assert!(chart.datasets[0].values[0] > 0.0);
        assert!(chart.datasets[1].values[0] < 0.0);
        assert_eq!(chart.y_axis, "Change (%)");
    }

    #[test]
    fn sentiment_chart_scores() {
        let events = [ev(3, 10_000, 10_500), ev(6, 10_000, 10_000), ev(9, 10_000, 9_000)];
        let chart = Chart::build(ChartKind::Sentiment, "BASF", &events);
        assert_eq!(chart.datasets[0].values, vec![1.0, 0.0, -1.0]);
        assert_eq!(chart.y_axis, "Sentiment");
    }
}
