//! Tunable constants for the scoring and classification engine.

/// Configuration for the risk scorer and alert classifier.
///
/// Defaults mirror the field nodes' sensor calibration: the eCO2 channel
/// ramps from clean at 450 ppm to saturated at 2000 ppm, TVOC from 100 ppb
/// to 1000 ppb, with eCO2 weighted 0.6 against TVOC 0.4. Thresholds and
/// trend weighting are deployment knobs, overridable from the environment
/// in the API layer.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// eCO2 concentration (ppm) at or below which the channel contributes no risk.
    pub eco2_clean_ppm: f64,
    /// eCO2 concentration (ppm) at or above which the channel risk saturates.
    pub eco2_saturation_ppm: f64,
    /// TVOC concentration (ppb) at or below which the channel contributes no risk.
    pub tvoc_clean_ppb: f64,
    /// TVOC concentration (ppb) at or above which the channel risk saturates.
    pub tvoc_saturation_ppb: f64,
    /// Relative weight of the eCO2 channel in the combined score.
    pub eco2_weight: f64,
    /// Relative weight of the TVOC channel in the combined score.
    pub tvoc_weight: f64,
    /// Maximum score points the trend term can add on top of the absolute score.
    pub trend_gain: f64,
    /// Number of prior readings considered for trend detection.
    pub baseline_window: usize,
    /// Prior readings older than this (relative to the reading being scored)
    /// are ignored even if they fall within the window count.
    pub baseline_max_age_secs: i64,
    /// Scores at or above this classify as WARN.
    pub warn_threshold: f64,
    /// Scores at or above this classify as HIGH.
    pub high_threshold: f64,
    /// Points a score must clear a band boundary by before the status flips
    /// away from the device's previous status.
    pub hysteresis_margin: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            eco2_clean_ppm: 450.0,
            eco2_saturation_ppm: 2000.0,
            tvoc_clean_ppb: 100.0,
            tvoc_saturation_ppb: 1000.0,
            eco2_weight: 0.6,
            tvoc_weight: 0.4,
            trend_gain: 30.0,
            baseline_window: 5,
            baseline_max_age_secs: 1800,
            warn_threshold: 50.0,
            high_threshold: 90.0,
            hysteresis_margin: 5.0,
        }
    }
}
