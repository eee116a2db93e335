//! Configuration surface consumed from external widgets.
//!
//! Mistake-proofed through:
//! - Type-safe configuration structs
//! - Compile-time validation via serde
//! - Runtime semantic validation

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::error::{VizError, VizResult};

/// Allowed array lengths (slider bounds).
pub const SIZE_RANGE: RangeInclusive<usize> = 5..=200;

/// Allowed base tick delays in milliseconds (slider bounds).
pub const SPEED_RANGE_MS: RangeInclusive<u64> = 10..=1000;

/// Smallest generated bar value, inclusive.
pub const VALUE_MIN: u32 = 10;

/// Largest generated bar value, exclusive.
pub const VALUE_MAX: u32 = 410;

/// Search playback runs at this multiple of the base delay to keep the
/// bisection visually legible.
pub const SEARCH_CADENCE_FACTOR: u32 = 2;

/// Sorting algorithms the algorithm engine can trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Bubble sort.
    #[default]
    Bubble,
    /// Selection sort.
    Selection,
    /// Insertion sort.
    Insertion,
    /// Merge sort.
    Merge,
    /// Quick sort.
    Quick,
    /// Heap sort.
    Heap,
    /// Radix sort.
    Radix,
}

impl Algorithm {
    /// All algorithms, in display order.
    pub const ALL: [Self; 7] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
        Self::Radix,
    ];

    /// Wire name, as the algorithm engine expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
            Self::Radix => "radix",
        }
    }

    /// The next algorithm in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visualizer configuration.
///
/// Loaded from YAML files with schema validation, or built
/// programmatically via [`VizConfig::builder`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Array length.
    #[validate(range(min = 5, max = 200))]
    #[serde(default = "default_size")]
    pub size: usize,

    /// Base tick delay in milliseconds; search playback uses
    /// `SEARCH_CADENCE_FACTOR ×` this value.
    #[validate(range(min = 10, max = 1000))]
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,

    /// Which trace the algorithm engine should compute.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Master seed for array generation.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_size() -> usize {
    50
}

const fn default_speed_ms() -> u64 {
    50
}

const fn default_seed() -> u64 {
    42
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    ///
    /// # Errors
    ///
    /// Returns error if a value falls outside its slider bounds.
    pub fn validate_semantic(&self) -> VizResult<()> {
        if !SIZE_RANGE.contains(&self.size) {
            return Err(VizError::config(format!(
                "array size must be within {}..={}, got {}",
                SIZE_RANGE.start(),
                SIZE_RANGE.end(),
                self.size
            )));
        }

        if !SPEED_RANGE_MS.contains(&self.speed_ms) {
            return Err(VizError::config(format!(
                "speed must be within {}..={} ms, got {}",
                SPEED_RANGE_MS.start(),
                SPEED_RANGE_MS.end(),
                self.speed_ms
            )));
        }

        Ok(())
    }

    /// Tick delay for sort playback.
    #[must_use]
    pub const fn sort_cadence(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Tick delay for search playback (`SEARCH_CADENCE_FACTOR ×` base).
    #[must_use]
    pub const fn search_cadence(&self) -> Duration {
        Duration::from_millis(self.speed_ms * SEARCH_CADENCE_FACTOR as u64)
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            speed_ms: default_speed_ms(),
            algorithm: Algorithm::default(),
            seed: default_seed(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    size: Option<usize>,
    speed_ms: Option<u64>,
    algorithm: Option<Algorithm>,
    seed: Option<u64>,
}

impl VizConfigBuilder {
    /// Set the array length.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the base tick delay in milliseconds.
    #[must_use]
    pub const fn speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = Some(speed_ms);
        self
    }

    /// Set the algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(size) = self.size {
            config.size = size;
        }

        if let Some(speed_ms) = self.speed_ms {
            config.speed_ms = speed_ms;
        }

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VizConfig::default();
        assert!(config.validate_semantic().is_ok());
        assert_eq!(config.size, 50);
        assert_eq!(config.speed_ms, 50);
        assert_eq!(config.algorithm, Algorithm::Bubble);
    }

    #[test]
    fn test_builder() {
        let config = VizConfig::builder()
            .size(20)
            .speed_ms(100)
            .algorithm(Algorithm::Quick)
            .seed(7)
            .build();

        assert_eq!(config.size, 20);
        assert_eq!(config.speed_ms, 100);
        assert_eq!(config.algorithm, Algorithm::Quick);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_cadences() {
        let config = VizConfig::builder().speed_ms(80).build();
        assert_eq!(config.sort_cadence(), Duration::from_millis(80));
        assert_eq!(config.search_cadence(), Duration::from_millis(160));
    }

    #[test]
    fn test_semantic_validation_size() {
        let config = VizConfig::builder().size(3).build();
        let result = config.validate_semantic();
        assert!(result.is_err());

        let config = VizConfig::builder().size(1000).build();
        assert!(config.validate_semantic().is_err());
    }

    #[test]
    fn test_semantic_validation_speed() {
        let config = VizConfig::builder().speed_ms(5).build();
        assert!(config.validate_semantic().is_err());

        let config = VizConfig::builder().speed_ms(5000).build();
        assert!(config.validate_semantic().is_err());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
size: 32
speed_ms: 120
algorithm: quick
seed: 9
";
        let config = VizConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.size, 32);
        assert_eq!(config.algorithm, Algorithm::Quick);
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = VizConfig::from_yaml("{}");
        assert!(config.is_ok());
    }

    #[test]
    fn test_from_yaml_rejects_out_of_range() {
        let result = VizConfig::from_yaml("size: 2");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let result = VizConfig::from_yaml("colour: blue");
        assert!(result.is_err());
    }

    #[test]
    fn test_algorithm_wire_names() {
        assert_eq!(Algorithm::Bubble.as_str(), "bubble");
        assert_eq!(Algorithm::Radix.as_str(), "radix");

        let json = serde_json::to_string(&Algorithm::Selection).unwrap_or_default();
        assert_eq!(json, "\"selection\"");
    }

    #[test]
    fn test_algorithm_cycle_wraps() {
        let mut algorithm = Algorithm::Bubble;
        for _ in 0..Algorithm::ALL.len() {
            algorithm = algorithm.next();
        }
        assert_eq!(algorithm, Algorithm::Bubble);
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(Algorithm::Heap.to_string(), "heap");
    }
}
