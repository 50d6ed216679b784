use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::auction::Auction;
use crate::config::{ConfigSection, OptimizerConfig};
use crate::error::{CoursebidError, Result};
use crate::evolve::chromosome::{random_chromosome, Chromosome};
use crate::evolve::operators::{creep_mutation, crossover, elitism, tournament_selection};
use crate::evolve::progress::ProgressCallback;

/// Final state of one bidder's search: the best chromosome of the last
/// generation, its fitness, and the per-generation best-fitness trace.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolvedBidder {
    pub best_chromosome: Chromosome,
    pub best_fitness: f64,
    pub fitness_history: Vec<f64>,
}

/// Co-evolutionary search for bidding strategies.
///
/// One population per bidder. Populations take turns: within a generation,
/// each bidder's candidates are scored against the *committed* strategies of
/// every other bidder, then that bidder's population is transformed and its
/// best strategy committed before the next bidder's turn. Coordinate ascent,
/// not simultaneous evolution.
///
/// Termination is the fixed generation budget alone; there is deliberately
/// no convergence or stagnation detection, so reported fitness traces always
/// cover the full budget.
pub struct StrategyOptimizer {
    config: OptimizerConfig,
    rng: StdRng,
    seed_populations: Option<Vec<Vec<Chromosome>>>,
}

impl StrategyOptimizer {
    /// All randomness (clearing shuffles, tournaments, crossover points,
    /// mutation deltas, initialization) flows from the one RNG seeded here.
    pub fn new(config: OptimizerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            seed_populations: None,
        }
    }

    /// Warm-starts the search from caller-provided populations, one per
    /// bidder, instead of random initialization. Shapes are checked against
    /// the auction before the first generation.
    pub fn with_initial_populations(mut self, populations: Vec<Vec<Chromosome>>) -> Self {
        self.seed_populations = Some(populations);
        self
    }

    /// Runs the full generational loop over `auction`, committing each
    /// bidder's best strategy in place as it goes. Returns one summary per
    /// bidder, in bidder order.
    ///
    /// Setup problems (empty item or bidder lists, chromosome/item length
    /// mismatch, invalid hyperparameters) fail before the first generation.
    pub fn run<C: ProgressCallback>(
        &mut self,
        auction: &mut Auction,
        callback: &mut C,
    ) -> Result<Vec<EvolvedBidder>> {
        self.validate_setup(auction)?;

        let bidder_count = auction.bidders().len();
        let chromosome_len = self
            .config
            .encoding
            .chromosome_len(auction.items().len());
        let budget = self.bid_budget(auction);
        // Initial genes must already decode to in-range bids.
        let start_range = self.config.start_range.min(auction.max_bid());

        let mut populations: Vec<Vec<Chromosome>> = match self.seed_populations.take() {
            Some(seeded) => seeded,
            None => (0..bidder_count)
                .map(|_| {
                    (0..self.config.population_size)
                        .map(|_| random_chromosome(chromosome_len, start_range, &mut self.rng))
                        .collect()
                })
                .collect(),
        };

        let mut results: Vec<EvolvedBidder> = (0..bidder_count)
            .map(|_| EvolvedBidder {
                best_chromosome: Vec::new(),
                best_fitness: f64::NEG_INFINITY,
                fitness_history: Vec::with_capacity(self.config.generations),
            })
            .collect();

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            for bidder_idx in 0..bidder_count {
                let (best, best_fitness, fitnesses) =
                    self.evaluate_population(auction, &populations[bidder_idx], bidder_idx, budget)?;

                let next = tournament_selection(
                    &populations[bidder_idx],
                    &fitnesses,
                    self.config.tournament_size,
                    self.config.tournament_prob,
                    &mut self.rng,
                );
                let next = crossover(&next, self.config.crossover_prob, &mut self.rng);
                let next = creep_mutation(
                    &next,
                    self.config.mutation_prob,
                    self.config.creep_factor,
                    self.config.min_creep,
                    auction.max_bid(),
                    &mut self.rng,
                );
                let next = elitism(&next, &best, self.config.elitism_copies);
                populations[bidder_idx] = next;

                // Commit this bidder's best strategy before the next slot.
                auction.bidders_mut()[bidder_idx]
                    .set_strategy(self.config.encoding.decode(&best, budget));

                let result = &mut results[bidder_idx];
                result.best_chromosome = best;
                result.best_fitness = best_fitness;
                result.fitness_history.push(best_fitness);

                callback.on_bidder_complete(generation, bidder_idx, best_fitness);
            }

            callback.on_generation_complete(generation);
        }

        Ok(results)
    }

    /// Scores every chromosome of one bidder's population against the frozen
    /// strategies of the others: install the decoded candidate, run one full
    /// auction round, fitness = awarded utility minus payment.
    fn evaluate_population(
        &mut self,
        auction: &mut Auction,
        population: &[Chromosome],
        bidder_idx: usize,
        budget: f64,
    ) -> Result<(Chromosome, f64, Vec<f64>)> {
        let mut fitnesses = Vec::with_capacity(population.len());
        let mut best_idx = 0;
        let mut best_fitness = f64::NEG_INFINITY;

        for (candidate_idx, chromosome) in population.iter().enumerate() {
            let strategy = self.config.encoding.decode(chromosome, budget);
            auction.bidders_mut()[bidder_idx].set_strategy(strategy);

            let outcome = auction.run(&mut self.rng)?;
            let fitness = outcome.surplus(bidder_idx);
            if fitness > best_fitness {
                best_fitness = fitness;
                best_idx = candidate_idx;
            }
            fitnesses.push(fitness);
        }

        Ok((population[best_idx].clone(), best_fitness, fitnesses))
    }

    /// Polynomial bids are rescaled to this sum: the auction's bid ceiling,
    /// or the configured start range when the ceiling is unbounded.
    fn bid_budget(&self, auction: &Auction) -> f64 {
        if auction.max_bid().is_finite() {
            auction.max_bid()
        } else {
            self.config.start_range
        }
    }

    fn validate_setup(&self, auction: &Auction) -> Result<()> {
        self.config.validate()?;

        if auction.items().is_empty() {
            return Err(CoursebidError::Configuration(
                "cannot optimize over an auction with no items".to_string(),
            ));
        }
        if auction.bidders().is_empty() {
            return Err(CoursebidError::Configuration(
                "cannot optimize over an auction with no bidders".to_string(),
            ));
        }
        if let Some(seeded) = &self.seed_populations {
            let expected_len = self
                .config
                .encoding
                .chromosome_len(auction.items().len());
            if seeded.len() != auction.bidders().len() {
                return Err(CoursebidError::Configuration(format!(
                    "{} seed populations for {} bidders",
                    seeded.len(),
                    auction.bidders().len()
                )));
            }
            for (bidder_idx, population) in seeded.iter().enumerate() {
                if population.is_empty() {
                    return Err(CoursebidError::Configuration(format!(
                        "seed population for bidder {bidder_idx} is empty"
                    )));
                }
                if population.len() != self.config.population_size {
                    return Err(CoursebidError::Configuration(format!(
                        "seed population for bidder {bidder_idx} has {} chromosomes, expected {}",
                        population.len(),
                        self.config.population_size
                    )));
                }
                if let Some(chromosome) =
                    population.iter().find(|c| c.len() != expected_len)
                {
                    return Err(CoursebidError::Configuration(format!(
                        "bidder {bidder_idx}: chromosome length {} does not match expected {} ({:?} encoding over {} items)",
                        chromosome.len(),
                        expected_len,
                        self.config.encoding,
                        auction.items().len()
                    )));
                }
            }
        }
        Ok(())
    }
}
