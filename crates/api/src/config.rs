use aqsense_core::scoring::ScoringConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared secret expected in the `x-api-key` header on mutating routes.
    /// `None` (unset or empty) disables the check, for local development.
    pub api_key: Option<String>,
    /// Scoring and classification knobs.
    pub scoring: ScoringConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `8000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `API_KEY`                  | unset (auth disabled)      |
    /// | `AQ_WARN_THRESHOLD`        | `50`                       |
    /// | `AQ_HIGH_THRESHOLD`        | `90`                       |
    /// | `AQ_TREND_GAIN`            | `30`                       |
    /// | `AQ_BASELINE_WINDOW`       | `5`                        |
    /// | `AQ_BASELINE_MAX_AGE_SECS` | `1800`                     |
    /// | `AQ_HYSTERESIS_MARGIN`     | `5`                        |
    ///
    /// Panics on malformed values or `AQ_WARN_THRESHOLD >= AQ_HIGH_THRESHOLD`
    /// — misconfiguration should fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let api_key = std::env::var("API_KEY").ok().filter(|s| !s.is_empty());

        let scoring = scoring_from_env();
        assert!(
            scoring.warn_threshold < scoring.high_threshold,
            "AQ_WARN_THRESHOLD must be less than AQ_HIGH_THRESHOLD"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_key,
            scoring,
        }
    }
}

/// Build the scoring configuration from environment overrides on top of the
/// calibrated defaults. The ramp anchors and channel weights are part of the
/// sensor calibration and are not exposed as deployment knobs.
fn scoring_from_env() -> ScoringConfig {
    let defaults = ScoringConfig::default();
    ScoringConfig {
        warn_threshold: env_f64("AQ_WARN_THRESHOLD", defaults.warn_threshold),
        high_threshold: env_f64("AQ_HIGH_THRESHOLD", defaults.high_threshold),
        trend_gain: env_f64("AQ_TREND_GAIN", defaults.trend_gain),
        baseline_window: env_usize("AQ_BASELINE_WINDOW", defaults.baseline_window),
        baseline_max_age_secs: env_i64("AQ_BASELINE_MAX_AGE_SECS", defaults.baseline_max_age_secs),
        hysteresis_margin: env_f64("AQ_HYSTERESIS_MARGIN", defaults.hysteresis_margin),
        ..defaults
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid number")),
        Err(_) => default,
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid integer")),
        Err(_) => default,
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid non-negative integer")),
        Err(_) => default,
    }
}
