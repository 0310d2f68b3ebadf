//! One company/year analysis and its load lifecycle.
//!
//! A session starts in [`SessionState::Loading`] and resolves to `Failed`,
//! `Empty` or `Loaded` once [`EarningsSession::load`] completes. From any
//! resolved state [`EarningsSession::retry`] fetches again, bypassing the cache.
//! The presentation helpers (`table`, `chart`, `export_csv`) only produce output
//! for a loaded, non-empty session.

use ertrag_core::chart::{Chart, ChartKind};
use ertrag_core::export::CsvExport;
use ertrag_core::table::{self, TableRow};
use ertrag_core::{Company, EarningsEvent, EarningsResponse, ErtragError};

use crate::core::Ertrag;

/// Where a session is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A fetch is pending.
    Loading,
    /// The last fetch failed; `retry` is available.
    Failed(ErtragError),
    /// The fetch succeeded but there are no reports for the year.
    Empty,
    /// At least one report was loaded, in chronological order.
    Loaded(Vec<EarningsEvent>),
}

impl SessionState {
    fn from_result(res: Result<EarningsResponse, ErtragError>) -> Self {
        match res {
            Ok(resp) if resp.is_empty() => Self::Empty,
            Ok(resp) => Self::Loaded(resp.earnings),
            Err(e) => Self::Failed(e),
        }
    }

    /// True while a fetch is pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error of a failed session.
    #[must_use]
    pub const fn error(&self) -> Option<&ErtragError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Earnings analysis of one company for one year.
pub struct EarningsSession<'a> {
    ertrag: &'a Ertrag,
    company: Company,
    year: i32,
    state: SessionState,
}

impl<'a> EarningsSession<'a> {
    /// A session in the `Loading` state; call [`load`](Self::load) to resolve it.
    #[must_use]
    pub const fn new(ertrag: &'a Ertrag, company: Company, year: i32) -> Self {
        Self {
            ertrag,
            company,
            year,
            state: SessionState::Loading,
        }
    }

    /// Selected company.
    #[must_use]
    pub const fn company(&self) -> &Company {
        &self.company
    }

    /// Selected year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Loaded events; empty unless the session is `Loaded`.
    #[must_use]
    pub fn events(&self) -> &[EarningsEvent] {
        match &self.state {
            SessionState::Loaded(events) => events,
            _ => &[],
        }
    }

    /// Resolve a pending load. Does nothing once the session has resolved.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ertrag::session::load",
            skip(self),
            fields(symbol = %self.company.symbol, year = self.year),
        )
    )]
    pub async fn load(&mut self) -> &SessionState {
        if self.state.is_loading() {
            let res = self.ertrag.earnings(&self.company.symbol, self.year).await;
            self.state = SessionState::from_result(res);
            #[cfg(feature = "tracing")]
            tracing::debug!(state = self.state_label(), "session resolved");
        }
        &self.state
    }

    /// Fetch again from the providers, replacing any cached entry.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ertrag::session::retry",
            skip(self),
            fields(symbol = %self.company.symbol, year = self.year),
        )
    )]
    pub async fn retry(&mut self) -> &SessionState {
        self.state = SessionState::Loading;
        let res = self.ertrag.refetch(&self.company.symbol, self.year).await;
        self.state = SessionState::from_result(res);
        &self.state
    }

    /// Switch to another company and/or year and load it.
    pub async fn select(&mut self, company: Company, year: i32) -> &SessionState {
        self.company = company;
        self.year = year;
        self.state = SessionState::Loading;
        self.load().await
    }

    #[cfg(feature = "tracing")]
    const fn state_label(&self) -> &'static str {
        match self.state {
            SessionState::Loading => "loading",
            SessionState::Failed(_) => "failed",
            SessionState::Empty => "empty",
            SessionState::Loaded(_) => "loaded",
        }
    }

    /// Table rows for the loaded events.
    #[must_use]
    pub fn table(&self) -> Vec<TableRow> {
        table::rows(self.events())
    }

    /// Bar chart of `kind`, or `None` unless the session is loaded.
    #[must_use]
    pub fn chart(&self, kind: ChartKind) -> Option<Chart> {
        match &self.state {
            SessionState::Loaded(events) => Some(Chart::build(kind, &self.company.name, events)),
            _ => None,
        }
    }

    /// CSV export of the loaded events.
    ///
    /// Returns `Ok(None)` when there is nothing to export: the session is still
    /// loading, failed, or has no events.
    ///
    /// # Errors
    /// Returns `Data` if the CSV writer fails.
    pub fn export_csv(&self) -> Result<Option<CsvExport>, ErtragError> {
        CsvExport::build(&self.company.symbol, self.year, self.events())
    }
}
