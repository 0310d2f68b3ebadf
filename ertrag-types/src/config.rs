//! Configuration types shared by the orchestrator and the middleware.

use std::time::Duration;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Inclusive range of selectable financial years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// Earliest selectable year.
    pub min: i32,
    /// Latest selectable year.
    pub max: i32,
}

impl YearRange {
    /// Earliest year offered by default.
    pub const DEFAULT_MIN: i32 = 2000;

    /// Explicit range; `min > max` yields an empty range.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `2000..=current year`, with the current year taken from the local clock.
    #[must_use]
    pub fn up_to_current_year() -> Self {
        Self::new(Self::DEFAULT_MIN, chrono::Local::now().year())
    }

    /// Whether `year` is selectable.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Selectable years, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = i32> {
        (self.min..=self.max).rev()
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::up_to_current_year()
    }
}

/// Cache configuration for earnings lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Staleness window in milliseconds; `0` disables caching.
    pub ttl_ms: u64,
    /// Maximum number of `(symbol, year)` entries kept.
    pub max_entries: u64,
}

impl CacheConfig {
    /// Five minutes.
    pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

    /// Longest staleness window honored: 365 days. Larger values are clamped.
    pub const MAX_TTL_MS: u64 = 365 * 24 * 60 * 60 * 1000;

    /// Staleness window as a `Duration`, or `None` when caching is disabled.
    ///
    /// Never exceeds [`CacheConfig::MAX_TTL_MS`].
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 {
            None
        } else if self.ttl_ms > Self::MAX_TTL_MS {
            Some(Duration::from_millis(Self::MAX_TTL_MS))
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }

    /// Same config with a different staleness window.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: Self::DEFAULT_TTL_MS,
            max_entries: 1024,
        }
    }
}

/// Global configuration for the `Ertrag` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErtragConfig {
    /// Years a caller may request; anything outside is rejected with `InvalidArg`.
    pub years: YearRange,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Cache settings; `None` disables the orchestrator-owned cache.
    pub cache: Option<CacheConfig>,
}

impl Default for ErtragConfig {
    fn default() -> Self {
        Self {
            years: YearRange::default(),
            provider_timeout: Duration::from_secs(5),
            cache: Some(CacheConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_lists_every_year_descending() {
        let years: Vec<i32> = YearRange::new(2020, 2023).newest_first().collect();
        assert_eq!(years, vec![2023, 2022, 2021, 2020]);
        assert_eq!(YearRange::new(2024, 2024).newest_first().count(), 1);
        assert_eq!(YearRange::new(2025, 2024).newest_first().count(), 0);
    }

    #[test]
    fn default_years_start_in_2000() {
        let years = YearRange::default();
        assert_eq!(years.newest_first().last(), Some(YearRange::DEFAULT_MIN));
        assert_eq!(years.newest_first().next(), Some(years.max));
        assert!(years.contains(2000) && !years.contains(1999));
    }

    #[test]
    fn ttl_is_clamped_to_max() {
        let huge = CacheConfig::default().with_ttl(Duration::MAX);
        assert_eq!(huge.ttl_ms, u64::MAX);
        assert_eq!(
            huge.ttl(),
            Some(Duration::from_millis(CacheConfig::MAX_TTL_MS))
        );
        assert_eq!(
            CacheConfig::default().ttl(),
            Some(Duration::from_secs(300))
        );
        assert_eq!(CacheConfig::default().with_ttl(Duration::ZERO).ttl(), None);
    }
}
