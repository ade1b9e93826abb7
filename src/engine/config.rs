//! Engine options.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};

/// Largest accepted subcategory mismatch penalty. The difficulty scale
/// is a `u8`, so any penalty past the scale already dominates every
/// possible difficulty distance; this bound additionally keeps summed
/// pair costs well below the matcher's infeasibility sentinel.
pub const MAX_MISMATCH_PENALTY: u32 = 1_000_000;

/// Options for one assignment run.
///
/// # Examples
///
/// ```
/// use round_assign::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_subcategory_mismatch_penalty(2)
///     .with_shuffle_pairs(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Redistribute subcategory label positions within each round.
    pub shuffle_subcategory: bool,

    /// Permute (toss-up, bonus) pair order within each round.
    pub shuffle_pairs: bool,

    /// Permute slot order by difficulty within each round.
    pub shuffle_lod: bool,

    /// Random seed for reproducibility. Seeded runs permute the
    /// matcher's tie-break order and drive every shuffle pass from the
    /// same generator; unseeded runs draw from a process-local source
    /// with no reproducibility guarantee.
    pub seed: Option<u64>,

    /// Cost of a subcategory mismatch, in difficulty steps. With
    /// penalty `p`, a subcategory-wrong question at exact difficulty
    /// costs the same as a subcategory-right question `p` steps off.
    pub subcategory_mismatch_penalty: u32,

    /// When non-empty, questions by any other writer carry a small
    /// extra cost that only ever breaks otherwise-equal choices.
    pub preferred_writers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shuffle_subcategory: false,
            shuffle_pairs: false,
            shuffle_lod: false,
            seed: None,
            subcategory_mismatch_penalty: 1,
            preferred_writers: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn with_shuffle_subcategory(mut self, on: bool) -> Self {
        self.shuffle_subcategory = on;
        self
    }

    pub fn with_shuffle_pairs(mut self, on: bool) -> Self {
        self.shuffle_pairs = on;
        self
    }

    pub fn with_shuffle_lod(mut self, on: bool) -> Self {
        self.shuffle_lod = on;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_subcategory_mismatch_penalty(mut self, penalty: u32) -> Self {
        self.subcategory_mismatch_penalty = penalty;
        self
    }

    pub fn with_preferred_writers(mut self, writers: Vec<String>) -> Self {
        self.preferred_writers = writers;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.subcategory_mismatch_penalty == 0 {
            return Err(AssignError::Config(
                "subcategory_mismatch_penalty must be at least 1".into(),
            ));
        }
        if self.subcategory_mismatch_penalty > MAX_MISMATCH_PENALTY {
            return Err(AssignError::Config(format!(
                "subcategory_mismatch_penalty must be at most {MAX_MISMATCH_PENALTY}, got {}",
                self.subcategory_mismatch_penalty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.shuffle_subcategory);
        assert!(!config.shuffle_pairs);
        assert!(!config.shuffle_lod);
        assert_eq!(config.seed, None);
        assert_eq!(config.subcategory_mismatch_penalty, 1);
        assert!(config.preferred_writers.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_penalty() {
        let config = EngineConfig::default().with_subcategory_mismatch_penalty(0);
        assert!(matches!(
            config.validate().unwrap_err(),
            AssignError::Config(_)
        ));
    }

    #[test]
    fn test_validate_oversized_penalty() {
        let config =
            EngineConfig::default().with_subcategory_mismatch_penalty(MAX_MISMATCH_PENALTY + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders_chain() {
        let config = EngineConfig::default()
            .with_shuffle_subcategory(true)
            .with_shuffle_pairs(true)
            .with_shuffle_lod(true)
            .with_seed(7)
            .with_preferred_writers(vec!["Chen, Andrew".into()]);
        assert!(config.shuffle_subcategory && config.shuffle_pairs && config.shuffle_lod);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.preferred_writers, ["Chen, Andrew"]);
    }
}
