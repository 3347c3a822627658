//! Alert classifier: maps a risk score to a discrete status band.

use crate::scoring::config::ScoringConfig;
use crate::status::AlertStatus;

/// Classify a score into its band.
///
/// The thresholds partition [0, 100] into three contiguous bands:
/// OK `[0, warn)`, WARN `[warn, high)`, HIGH `[high, 100]`. Total over all
/// finite scores; a non-finite score (a scorer defect, rejected upstream)
/// defensively maps to OK.
pub fn classify(score: f64, config: &ScoringConfig) -> AlertStatus {
    if !score.is_finite() {
        return AlertStatus::Ok;
    }
    if score >= config.high_threshold {
        AlertStatus::High
    } else if score >= config.warn_threshold {
        AlertStatus::Warn
    } else {
        AlertStatus::Ok
    }
}

/// Classify with hysteresis against the device's previous persisted status.
///
/// When the raw band differs from the previous status, the score must clear
/// the boundary of the previous band by `hysteresis_margin` in the direction
/// of movement; otherwise the previous status is retained. This keeps a score
/// oscillating around a boundary from flapping between adjacent states.
///
/// The previous status comes from the newest stored row before the reading
/// being classified, so the classifier itself stays stateless and replicas
/// need no coordination.
pub fn classify_with_previous(
    score: f64,
    previous: Option<AlertStatus>,
    config: &ScoringConfig,
) -> AlertStatus {
    let raw = classify(score, config);
    let Some(prev) = previous else {
        return raw;
    };
    if raw == prev {
        return raw;
    }

    if raw.severity() > prev.severity() {
        // Escalating: clear the upper boundary of the previous band.
        let boundary = match prev {
            AlertStatus::Ok => config.warn_threshold,
            AlertStatus::Warn => config.high_threshold,
            AlertStatus::High => return raw, // unreachable: nothing above HIGH
        };
        if score >= boundary + config.hysteresis_margin {
            raw
        } else {
            prev
        }
    } else {
        // Recovering: clear the lower boundary of the previous band.
        let boundary = match prev {
            AlertStatus::High => config.high_threshold,
            AlertStatus::Warn => config.warn_threshold,
            AlertStatus::Ok => return raw, // unreachable: nothing below OK
        };
        if score <= boundary - config.hysteresis_margin {
            raw
        } else {
            prev
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
