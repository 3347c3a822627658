//! Risk scoring and alert classification engine.
//!
//! Pure logic — no database access. The caller is responsible for fetching
//! a device's recent history from the store and passing it in as a
//! [`BaselineContext`].

pub mod classify;
pub mod config;
pub mod context;
pub mod engine;

pub use classify::{classify, classify_with_previous};
pub use config::ScoringConfig;
pub use context::{BaselineContext, PriorReading};
pub use engine::{score, PollutantReading};
