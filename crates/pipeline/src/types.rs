//! Shared value types for the Scribe pipeline domain.
//!
//! Unlike the identifiers in [`crate::identifiers`], these types carry values
//! with invariants (sampling parameters stay inside the ranges the model
//! service accepts) and participate in domain computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ModelId;

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Parameters controlling the randomness of a model call.
///
/// Lower temperatures are used for research and editing, a moderate one for
/// drafting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
}

impl SamplingConfig {
    /// Creates a [`SamplingConfig`].
    ///
    /// Returns `None` unless `temperature` is in `[0.0, 2.0]`, `top_p` is in
    /// `(0.0, 1.0]` and `top_k` is at least 1.
    #[must_use]
    pub fn new(temperature: f64, top_p: f64, top_k: u32) -> Option<Self> {
        let temperature_ok = temperature.is_finite() && (0.0..=2.0).contains(&temperature);
        let top_p_ok = top_p.is_finite() && top_p > 0.0 && top_p <= 1.0;
        if temperature_ok && top_p_ok && top_k >= 1 {
            Some(Self {
                temperature,
                top_p,
                top_k,
            })
        } else {
            None
        }
    }

    /// Built-in stage profiles only; values are known to be in range.
    pub(crate) const fn builtin(temperature: f64, top_p: f64, top_k: u32) -> Self {
        Self {
            temperature,
            top_p,
            top_k,
        }
    }

    /// Returns the sampling temperature.
    pub fn temperature(self) -> f64 {
        self.temperature
    }

    /// Returns the nucleus-sampling probability mass.
    pub fn top_p(self) -> f64 {
        self.top_p
    }

    /// Returns the number of highest-probability tokens considered.
    pub fn top_k(self) -> u32 {
        self.top_k
    }
}

impl std::fmt::Display for SamplingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "temperature={} top_p={} top_k={}",
            self.temperature, self.top_p, self.top_k
        )
    }
}

// ---------------------------------------------------------------------------

/// The model and sampling configuration a stage calls with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Model to invoke.
    pub model: ModelId,
    /// Sampling parameters sent with every call.
    pub sampling: SamplingConfig,
}

impl ModelProfile {
    /// Creates a new [`ModelProfile`].
    pub fn new(model: ModelId, sampling: SamplingConfig) -> Self {
        Self { model, sampling }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Time of day, `HH:MM:SS`.
    pub fn clock(self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    /// Date and time for human readers, `YYYY-mm-dd HH:MM:SS`.
    pub fn human(self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Compact form safe for file names, `YYYYmmdd_HHMMSS`.
    pub fn file_stamp(self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
