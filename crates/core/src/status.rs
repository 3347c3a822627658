//! Alert status vocabulary for scored measurements.

use serde::Serialize;

/// Discrete alert state derived from a risk score.
///
/// Stored as TEXT in the measurements table; the string forms are part of the
/// API contract consumed by dashboards and map overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    Ok,
    Warn,
    High,
}

impl AlertStatus {
    /// Canonical wire/storage form (`"OK"`, `"WARN"`, `"HIGH"`).
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Ok => "OK",
            AlertStatus::Warn => "WARN",
            AlertStatus::High => "HIGH",
        }
    }

    /// Parse a stored status string. Returns `None` for anything outside the
    /// closed set rather than guessing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(AlertStatus::Ok),
            "WARN" => Some(AlertStatus::Warn),
            "HIGH" => Some(AlertStatus::High),
            _ => None,
        }
    }

    /// Ordinal used to compare band severity (OK < WARN < HIGH).
    pub(crate) fn severity(self) -> u8 {
        match self {
            AlertStatus::Ok => 0,
            AlertStatus::Warn => 1,
            AlertStatus::High => 2,
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
