//! Threshold configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Default maximum rank used for a threshold.
pub const DEFAULT_CAP: usize = 200;

/// Default fraction of files a threshold category aims to match.
pub const DEFAULT_PERCENTILE: f64 = 0.1;

/// Tunables for threshold-based categories (largest, newest, oldest).
///
/// The threshold is the value at rank `min(cap, ceil(percentile * count))`
/// among all files, so small trees match a fraction of their files and huge
/// trees match roughly `cap` of them. Ties at the boundary all match.
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "ClassifyError"))]
pub struct ThresholdConfig {
    /// Upper bound on the rank of the threshold value.
    #[builder(default = "DEFAULT_CAP")]
    #[serde(default = "default_cap")]
    pub cap: usize,

    /// Fraction of files in `(0, 1]` used to derive the rank.
    #[builder(default = "DEFAULT_PERCENTILE")]
    #[serde(default = "default_percentile")]
    pub percentile: f64,
}

fn default_cap() -> usize {
    DEFAULT_CAP
}

fn default_percentile() -> f64 {
    DEFAULT_PERCENTILE
}

impl From<derive_builder::UninitializedFieldError> for ClassifyError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        ClassifyError::invalid_config(err.to_string())
    }
}

impl ThresholdConfigBuilder {
    fn validate(&self) -> Result<(), ClassifyError> {
        if let Some(cap) = self.cap {
            check_cap(cap)?;
        }
        if let Some(percentile) = self.percentile {
            check_percentile(percentile)?;
        }
        Ok(())
    }
}

fn check_cap(cap: usize) -> Result<(), ClassifyError> {
    if cap == 0 {
        return Err(ClassifyError::invalid_config("cap must be at least 1"));
    }
    Ok(())
}

fn check_percentile(percentile: f64) -> Result<(), ClassifyError> {
    if !percentile.is_finite() || percentile <= 0.0 || percentile > 1.0 {
        return Err(ClassifyError::invalid_config(format!(
            "percentile must be in (0, 1], got {percentile}"
        )));
    }
    Ok(())
}

impl ThresholdConfig {
    /// Create a new config builder.
    pub fn builder() -> ThresholdConfigBuilder {
        ThresholdConfigBuilder::default()
    }

    /// Create a validated config.
    pub fn new(cap: usize, percentile: f64) -> Result<Self, ClassifyError> {
        check_cap(cap)?;
        check_percentile(percentile)?;
        Ok(Self { cap, percentile })
    }

    /// Validate a config obtained without the builder, e.g. deserialized.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        check_cap(self.cap)?;
        check_percentile(self.percentile)
    }

    /// Rank of the threshold value among `count` values, 1-based.
    ///
    /// Zero means no value qualifies.
    pub fn rank(&self, count: usize) -> usize {
        let scaled = (self.percentile * count as f64).ceil() as usize;
        scaled.min(self.cap).min(count)
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            percentile: DEFAULT_PERCENTILE,
        }
    }
}
