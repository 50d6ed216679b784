use serde::{Deserialize, Serialize};

use crate::config::traits::ConfigSection;
use crate::error::{CoursebidError, Result};
use crate::evolve::chromosome::ChromosomeEncoding;

/// Hyperparameters of the strategy optimizer. A flat record; every field has
/// a documented default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Chromosomes per bidder population. Must be even when crossover is
    /// enabled, since crossover pairs consecutive slots. Default 100.
    pub population_size: usize,
    /// Fixed generation budget; the only termination criterion. Default 30.
    pub generations: usize,
    /// Contestants drawn (with replacement) per tournament. Default 2.
    pub tournament_size: usize,
    /// Probability of accepting the current rank while walking a tournament
    /// ranking. Default 0.75.
    pub tournament_prob: f64,
    /// Per-pair probability of a single-point tail swap. Default 0.5.
    pub crossover_prob: f64,
    /// Per-gene mutation probability. Default 0.1.
    pub mutation_prob: f64,
    /// Slots overwritten with the generation's best chromosome. Default 1.
    pub elitism_copies: usize,
    /// Creep range as a fraction of the gene's magnitude. Default 0.3.
    pub creep_factor: f64,
    /// Floor of the creep range, so near-zero genes can still move.
    /// Default 0.01.
    pub min_creep: f64,
    /// Upper bound for initial genes (capped at the auction's max bid), and
    /// the polynomial bid budget when the auction's max bid is unbounded.
    /// Default 100.0.
    pub start_range: f64,
    /// Seed for the single random source. `None` seeds from entropy; a fixed
    /// seed makes runs byte-for-byte reproducible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// How chromosomes decode into strategies. Default: constant-bid.
    /// Kept last so a `polynomial` table serializes after the scalar fields.
    pub encoding: ChromosomeEncoding,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 30,
            tournament_size: 2,
            tournament_prob: 0.75,
            crossover_prob: 0.5,
            mutation_prob: 0.1,
            elitism_copies: 1,
            creep_factor: 0.3,
            min_creep: 0.01,
            start_range: 100.0,
            seed: None,
            encoding: ChromosomeEncoding::ConstantBid,
        }
    }
}

impl ConfigSection for OptimizerConfig {
    fn section_name() -> &'static str {
        "optimizer"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(CoursebidError::Configuration(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.crossover_prob > 0.0 && self.population_size % 2 != 0 {
            return Err(CoursebidError::Configuration(format!(
                "population_size must be even for pairwise crossover, got {}",
                self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(CoursebidError::Configuration(
                "tournament_size must be at least 1".to_string(),
            ));
        }
        for (name, prob) in [
            ("tournament_prob", self.tournament_prob),
            ("crossover_prob", self.crossover_prob),
            ("mutation_prob", self.mutation_prob),
        ] {
            if !(0.0..=1.0).contains(&prob) {
                return Err(CoursebidError::Configuration(format!(
                    "{name} must be in [0, 1], got {prob}"
                )));
            }
        }
        if self.elitism_copies > self.population_size {
            return Err(CoursebidError::Configuration(format!(
                "elitism_copies ({}) exceeds population_size ({})",
                self.elitism_copies, self.population_size
            )));
        }
        if self.creep_factor < 0.0 || self.min_creep < 0.0 {
            return Err(CoursebidError::Configuration(
                "creep_factor and min_creep must be non-negative".to_string(),
            ));
        }
        if !self.start_range.is_finite() || self.start_range < 0.0 {
            return Err(CoursebidError::Configuration(format!(
                "start_range must be finite and non-negative, got {}",
                self.start_range
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(OptimizerConfig::default().validate().is_ok());
    }

    #[test]
    fn odd_population_rejected_with_crossover() {
        let config = OptimizerConfig {
            population_size: 9,
            crossover_prob: 0.5,
            ..OptimizerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoursebidError::Configuration(_))
        ));

        // Odd is fine when crossover is off.
        let config = OptimizerConfig {
            population_size: 9,
            crossover_prob: 0.0,
            ..OptimizerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let config = OptimizerConfig {
            mutation_prob: 1.5,
            ..OptimizerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
