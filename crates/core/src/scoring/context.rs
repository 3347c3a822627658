//! Baseline context: the rolling window of prior readings fed to the scorer.

use chrono::Duration;

use crate::scoring::config::ScoringConfig;
use crate::types::Timestamp;

/// Pollutant channels of a single prior reading, as stored.
///
/// Absent sensor channels stay `None`; the context never imputes values.
#[derive(Debug, Clone, Copy)]
pub struct PriorReading {
    pub ts: Timestamp,
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
}

/// A device's recent history strictly before the reading being scored,
/// most-recent-first.
///
/// This is a read-time projection over the measurement store, not a persisted
/// entity — it is rebuilt from committed rows on every ingestion, so replicas
/// share no in-process state.
#[derive(Debug, Clone, Default)]
pub struct BaselineContext {
    readings: Vec<PriorReading>,
}

impl BaselineContext {
    /// Context for a device with no usable history. The scorer falls back to
    /// absolute thresholds only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a context from store rows ordered most-recent-first.
    ///
    /// Rows at or after `at` are dropped (derived fields must never depend on
    /// data from the reading's own timestamp onward), as are rows older than
    /// the configured maximum age. At most `baseline_window` rows are kept.
    pub fn from_rows<I>(rows: I, at: Timestamp, config: &ScoringConfig) -> Self
    where
        I: IntoIterator<Item = PriorReading>,
    {
        let oldest = at - Duration::seconds(config.baseline_max_age_secs);
        let readings = rows
            .into_iter()
            .filter(|r| r.ts < at && r.ts >= oldest)
            .take(config.baseline_window)
            .collect();
        Self { readings }
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Finite TVOC values in the window, most-recent-first.
    pub fn tvoc_values(&self) -> Vec<f64> {
        self.channel_values(|r| r.tvoc_ppb)
    }

    /// Finite eCO2 values in the window, most-recent-first.
    pub fn eco2_values(&self) -> Vec<f64> {
        self.channel_values(|r| r.eco2_ppm)
    }

    fn channel_values<F>(&self, channel: F) -> Vec<f64>
    where
        F: Fn(&PriorReading) -> Option<f64>,
    {
        self.readings
            .iter()
            .filter_map(|r| channel(r).filter(|v| v.is_finite()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
