//! Risk scorer: maps a pollutant reading plus baseline context to [0, 100].
//!
//! The function is total over its input domain: any combination of missing
//! or garbage channel values produces a defined, clamped score.

use crate::scoring::config::ScoringConfig;
use crate::scoring::context::BaselineContext;

/// Pollutant channels of the reading being scored.
///
/// Channels the device did not report are `None`, never zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollutantReading {
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
}

/// Compute the normalized air-quality risk score for one reading.
///
/// The score is the weighted absolute risk of the reported pollutant
/// channels, lifted by a trend term when the reading sits above the device's
/// recent baseline. With an empty context the result depends on absolute
/// thresholds alone. Deterministic: no clock or randomness beyond the inputs.
pub fn score(reading: &PollutantReading, context: &BaselineContext, config: &ScoringConfig) -> f64 {
    let tvoc = finite(reading.tvoc_ppb);
    let eco2 = finite(reading.eco2_ppm);

    // Absolute contribution: per-channel linear ramps, weights renormalized
    // over the channels that actually reported. Both channels absent means
    // insufficient signal — neutral baseline, not an error.
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    if let Some(v) = eco2 {
        weighted += config.eco2_weight
            * ramp01(v, config.eco2_clean_ppm, config.eco2_saturation_ppm);
        weight_sum += config.eco2_weight;
    }
    if let Some(v) = tvoc {
        weighted += config.tvoc_weight
            * ramp01(v, config.tvoc_clean_ppb, config.tvoc_saturation_ppb);
        weight_sum += config.tvoc_weight;
    }
    let absolute = if weight_sum > 0.0 {
        weighted / weight_sum
    } else {
        0.0
    };

    // Trend contribution: how far each channel sits above its recent mean,
    // normalized by the channel's ramp span. Falling or flat history clamps
    // to zero, so trend only ever pushes the score up.
    let mut rise_weighted = 0.0;
    let mut rise_weight_sum = 0.0;
    if let Some(v) = eco2 {
        if let Some(rise) = channel_rise(
            v,
            &context.eco2_values(),
            config.eco2_saturation_ppm - config.eco2_clean_ppm,
        ) {
            rise_weighted += config.eco2_weight * rise;
            rise_weight_sum += config.eco2_weight;
        }
    }
    if let Some(v) = tvoc {
        if let Some(rise) = channel_rise(
            v,
            &context.tvoc_values(),
            config.tvoc_saturation_ppb - config.tvoc_clean_ppb,
        ) {
            rise_weighted += config.tvoc_weight * rise;
            rise_weight_sum += config.tvoc_weight;
        }
    }
    let trend = if rise_weight_sum > 0.0 {
        rise_weighted / rise_weight_sum
    } else {
        0.0
    };

    (100.0 * absolute + config.trend_gain * trend).clamp(0.0, 100.0)
}

/// Linear ramp from 0 at `clean` to 1 at `saturation`, clamped.
fn ramp01(value: f64, clean: f64, saturation: f64) -> f64 {
    if saturation <= clean {
        // Degenerate configuration: treat as a hard step at the saturation point.
        return if value >= saturation { 1.0 } else { 0.0 };
    }
    ((value - clean) / (saturation - clean)).clamp(0.0, 1.0)
}

/// Normalized rise of the current value above the mean of prior values.
///
/// `None` when there is no prior data for the channel, so the caller can
/// renormalize weights instead of diluting the trend with silence.
fn channel_rise(current: f64, prior: &[f64], span: f64) -> Option<f64> {
    if prior.is_empty() || span <= 0.0 {
        return None;
    }
    let mean = prior.iter().sum::<f64>() / prior.len() as f64;
    Some(((current - mean) / span).clamp(0.0, 1.0))
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::scoring::context::PriorReading;
    use crate::types::Timestamp;

    use super::*;

    fn at() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn reading(tvoc: Option<f64>, eco2: Option<f64>) -> PollutantReading {
        PollutantReading {
            tvoc_ppb: tvoc,
            eco2_ppm: eco2,
        }
    }

    /// Build a context from eCO2 values given oldest-first, one minute apart.
    fn eco2_context(values_oldest_first: &[f64]) -> BaselineContext {
        let n = values_oldest_first.len() as i64;
        let rows: Vec<_> = values_oldest_first
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &v)| PriorReading {
                ts: at() - Duration::minutes(n - i as i64),
                tvoc_ppb: None,
                eco2_ppm: Some(v),
            })
            .collect();
        BaselineContext::from_rows(rows, at(), &ScoringConfig::default())
    }

    #[test]
    fn clean_reading_scores_near_zero() {
        let config = ScoringConfig::default();
        let s = score(
            &reading(Some(50.0), Some(400.0)),
            &BaselineContext::empty(),
            &config,
        );
        assert_eq!(s, 0.0);
    }

    #[test]
    fn missing_both_pollutant_channels_yields_neutral_score() {
        let config = ScoringConfig::default();
        let s = score(&reading(None, None), &BaselineContext::empty(), &config);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn extreme_inputs_clamp_into_bounds() {
        let config = ScoringConfig::default();
        for (tvoc, eco2) in [
            (Some(1e9), Some(1e9)),
            (Some(f64::MAX), None),
            (Some(-1e9), Some(-1e9)),
            (Some(f64::NAN), Some(f64::INFINITY)),
        ] {
            let s = score(&reading(tvoc, eco2), &BaselineContext::empty(), &config);
            assert!((0.0..=100.0).contains(&s), "score {s} out of bounds");
        }
    }

    #[test]
    fn monotonic_in_each_channel() {
        let config = ScoringConfig::default();
        let ctx = BaselineContext::empty();
        let mut last = -1.0;
        for eco2 in [300.0, 450.0, 800.0, 1200.0, 2000.0, 5000.0] {
            let s = score(&reading(Some(200.0), Some(eco2)), &ctx, &config);
            assert!(s >= last, "eco2={eco2}: {s} < {last}");
            last = s;
        }
        last = -1.0;
        for tvoc in [0.0, 100.0, 300.0, 700.0, 1000.0, 1e6] {
            let s = score(&reading(Some(tvoc), Some(600.0)), &ctx, &config);
            assert!(s >= last, "tvoc={tvoc}: {s} < {last}");
            last = s;
        }
    }

    #[test]
    fn rising_context_scores_at_least_flat_context() {
        let config = ScoringConfig::default();
        let current = reading(None, Some(1200.0));
        let rising = score(&current, &eco2_context(&[600.0, 800.0, 1000.0]), &config);
        let flat = score(&current, &eco2_context(&[1200.0, 1200.0, 1200.0]), &config);
        let falling = score(&current, &eco2_context(&[1600.0, 1500.0, 1400.0]), &config);
        assert!(rising >= flat);
        assert!(flat >= falling);
    }

    #[test]
    fn empty_context_depends_on_absolute_thresholds_only() {
        let config = ScoringConfig::default();
        let current = reading(None, Some(1200.0));
        let absolute_only = score(&current, &BaselineContext::empty(), &config);
        // (1200 - 450) / 1550 of the way up the ramp.
        let expected = 100.0 * (1200.0 - 450.0) / 1550.0;
        assert!((absolute_only - expected).abs() < 1e-9);
    }

    #[test]
    fn trend_lifts_a_spike_above_its_absolute_score() {
        let config = ScoringConfig::default();
        let current = reading(None, Some(1800.0));
        let absolute_only = score(&current, &BaselineContext::empty(), &config);
        let with_spike = score(&current, &eco2_context(&[400.0, 750.0, 1100.0, 1450.0]), &config);
        assert!(with_spike > absolute_only);
        assert!(with_spike <= 100.0);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let config = ScoringConfig::default();
        let current = reading(Some(420.0), Some(980.0));
        let ctx = eco2_context(&[500.0, 700.0, 900.0]);
        assert_eq!(
            score(&current, &ctx, &config),
            score(&current, &ctx, &config)
        );
    }

    #[test]
    fn single_channel_reading_uses_that_channel_alone() {
        let config = ScoringConfig::default();
        let ctx = BaselineContext::empty();
        // eCO2 at saturation with TVOC absent must reach the full 100, not
        // a weight-diluted 60.
        let s = score(&reading(None, Some(2000.0)), &ctx, &config);
        assert_eq!(s, 100.0);
    }
}
