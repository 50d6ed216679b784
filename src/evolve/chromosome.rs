use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::auction::{ConstantBid, PolynomialResponse, Strategy};

/// An ordered vector of real-valued genes; the unit the genetic operators
/// work on. What the genes mean depends on the encoding.
pub type Chromosome = Vec<f64>;

/// How a chromosome decodes into a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromosomeEncoding {
    /// Gene `i` is the bid for item `i`; chromosome length must equal the
    /// item count.
    ConstantBid,
    /// Genes are polynomial coefficients in ascending degree order; the
    /// polynomial is evaluated at each item's utility and the raw bids are
    /// rescaled to the bid budget.
    Polynomial { degree: usize },
}

impl ChromosomeEncoding {
    /// Required chromosome length for an auction with `item_count` items.
    pub fn chromosome_len(&self, item_count: usize) -> usize {
        match self {
            ChromosomeEncoding::ConstantBid => item_count,
            ChromosomeEncoding::Polynomial { degree } => degree + 1,
        }
    }

    /// Decodes a chromosome into a concrete strategy. `budget` only matters
    /// for the polynomial encoding, where it is the sum the rescaled bids
    /// must reach.
    pub fn decode(&self, chromosome: &[f64], budget: f64) -> Box<dyn Strategy> {
        match self {
            ChromosomeEncoding::ConstantBid => Box::new(ConstantBid::new(chromosome.to_vec())),
            ChromosomeEncoding::Polynomial { .. } => {
                Box::new(PolynomialResponse::new(chromosome.to_vec(), budget))
            }
        }
    }
}

/// Genes drawn uniformly from `[0, start_range]`.
pub fn random_chromosome<R: Rng>(len: usize, start_range: f64, rng: &mut R) -> Chromosome {
    (0..len).map(|_| rng.gen::<f64>() * start_range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn chromosome_len_per_encoding() {
        assert_eq!(ChromosomeEncoding::ConstantBid.chromosome_len(5), 5);
        assert_eq!(ChromosomeEncoding::Polynomial { degree: 2 }.chromosome_len(5), 3);
    }

    #[test]
    fn random_chromosome_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let chromosome = random_chromosome(50, 100.0, &mut rng);
        assert_eq!(chromosome.len(), 50);
        assert!(chromosome.iter().all(|&g| (0.0..=100.0).contains(&g)));
    }
}
