//! Configuration for per-level Bloom filters.
//!
//! [`FilterOptions`] is what a storage engine reads from its own settings.
//! [`FilterConfig`] is the immutable table derived from it once at startup and
//! shared by every filter build.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of storage levels (Level 0 through Level 6).
pub const DEFAULT_NUM_LEVELS: usize = 7;

/// Default bits per key for every level.
pub const DEFAULT_BITS_PER_KEY: usize = 10;

/// Largest probe count a filter may carry. Higher trailing bytes are reserved.
pub const MAX_PROBES: u8 = 30;

/// Smallest probe count a filter may carry.
pub const MIN_PROBES: u8 = 1;

/// Derive the probe count for a bits-per-key budget.
///
/// `0.69 ≈ ln(2)` minimizes the false positive rate. Rounding down trades a
/// slightly higher rate for fewer probes per lookup.
pub fn probes_for_bits_per_key(bits_per_key: usize) -> u8 {
    let k = (bits_per_key as f64 * 0.69) as usize;
    k.clamp(MIN_PROBES as usize, MAX_PROBES as usize) as u8
}

/// Caller-facing filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Target bits per key, one entry per storage level.
    /// Default: 10 for each of 7 levels
    pub bits_per_key_per_level: Vec<usize>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::uniform(DEFAULT_NUM_LEVELS, DEFAULT_BITS_PER_KEY)
    }
}

impl FilterOptions {
    /// Creates a new FilterOptions with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options using the same bits per key on every level.
    pub fn uniform(num_levels: usize, bits_per_key: usize) -> Self {
        Self {
            bits_per_key_per_level: vec![bits_per_key; num_levels],
        }
    }

    /// Sets the per-level bits per key.
    pub fn bits_per_key_per_level(mut self, bits: Vec<usize>) -> Self {
        self.bits_per_key_per_level = bits;
        self
    }

    /// Parses options from a JSON document.
    ///
    /// ```
    /// use levelbloom::FilterOptions;
    ///
    /// let opts = FilterOptions::from_json_str(r#"{"bits_per_key_per_level": [10, 8, 4]}"#).unwrap();
    /// assert_eq!(opts.bits_per_key_per_level, vec![10, 8, 4]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Serializes options to a JSON document.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.bits_per_key_per_level.is_empty() {
            return Err(Error::invalid_argument(
                "bits_per_key_per_level must name at least one level",
            ));
        }
        Ok(())
    }
}

/// Immutable per-level filter configuration.
///
/// Probe counts are derived once at construction. The table is never mutated
/// afterwards, so a `FilterConfig` can be shared across threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    bits_per_key: Vec<usize>,
    probes: Vec<u8>,
}

impl FilterConfig {
    /// Builds the configuration from one bits-per-key target per level.
    ///
    /// Never fails. A level with `0` bits per key still gets one probe.
    pub fn new(bits_per_key: Vec<usize>) -> Self {
        let probes: Vec<u8> = bits_per_key
            .iter()
            .map(|&bits| probes_for_bits_per_key(bits))
            .collect();

        for (level, (bits, k)) in bits_per_key.iter().zip(&probes).enumerate() {
            log::debug!("Level {} filter: {} bits per key, {} probes", level, bits, k);
        }

        Self { bits_per_key, probes }
    }

    /// Validates `options` and builds the configuration from them.
    pub fn from_options(options: &FilterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::new(options.bits_per_key_per_level.clone()))
    }

    /// Number of configured levels.
    pub fn num_levels(&self) -> usize {
        self.bits_per_key.len()
    }

    /// Bits per key for `level`, or `None` if the level is not configured.
    pub fn bits_per_key(&self, level: usize) -> Option<usize> {
        self.bits_per_key.get(level).copied()
    }

    /// Probe count for `level`, or `None` if the level is not configured.
    pub fn probes(&self, level: usize) -> Option<u8> {
        self.probes.get(level).copied()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(FilterOptions::default().bits_per_key_per_level)
    }
}
