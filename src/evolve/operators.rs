//! Genetic operators. Each pass takes a population snapshot and returns a new
//! one of the same size; nothing is edited in place, so a later pass can never
//! observe a half-transformed slot.

use std::cmp::Ordering;

use rand::Rng;

use crate::evolve::chromosome::Chromosome;

/// Tournament selection with stochastic acceptance.
///
/// Each output slot is filled by drawing `tournament_size` contestants
/// uniformly with replacement, ranking them by fitness descending, then
/// walking the ranking: each rank is accepted with probability
/// `tournament_prob`, and the last rank is accepted unconditionally if the
/// walk reaches it. Pressure toward fitter individuals is probabilistic,
/// never a deterministic argmax.
pub fn tournament_selection<R: Rng>(
    population: &[Chromosome],
    fitnesses: &[f64],
    tournament_size: usize,
    tournament_prob: f64,
    rng: &mut R,
) -> Vec<Chromosome> {
    debug_assert_eq!(population.len(), fitnesses.len());

    (0..population.len())
        .map(|_| {
            let mut contestants: Vec<usize> = (0..tournament_size)
                .map(|_| rng.gen_range(0..population.len()))
                .collect();
            contestants.sort_by(|&a, &b| {
                fitnesses[b]
                    .partial_cmp(&fitnesses[a])
                    .unwrap_or(Ordering::Equal)
            });

            let mut rank = 0;
            while rank < tournament_size - 1 && rng.gen::<f64>() > tournament_prob {
                rank += 1;
            }
            population[contestants[rank]].clone()
        })
        .collect()
}

/// Single-point tail-swap crossover over consecutive pairs.
///
/// Slots are paired (0,1), (2,3), …; with probability `crossover_prob` a pair
/// picks one cut point uniformly in `[0, min(len1, len2))` and swaps tails.
/// A cut at 0 swaps the whole chromosomes, which leaves the gene pool intact.
pub fn crossover<R: Rng>(
    population: &[Chromosome],
    crossover_prob: f64,
    rng: &mut R,
) -> Vec<Chromosome> {
    let mut next: Vec<Chromosome> = population.to_vec();

    for pair in next.chunks_mut(2) {
        let [first, second] = pair else { continue };
        if rng.gen::<f64>() >= crossover_prob {
            continue;
        }
        let max_cut = first.len().min(second.len());
        if max_cut == 0 {
            continue;
        }
        let cut = rng.gen_range(0..max_cut);
        for i in cut..max_cut {
            std::mem::swap(&mut first[i], &mut second[i]);
        }
    }

    next
}

/// Creep mutation: each gene, with probability `mutation_prob`, moves by a
/// uniform delta scaled to the gene's own magnitude, then is clamped into
/// `[0, max_bid]`.
///
/// `min_creep` floors the creep range so genes sitting at or near zero can
/// still escape.
pub fn creep_mutation<R: Rng>(
    population: &[Chromosome],
    mutation_prob: f64,
    creep_factor: f64,
    min_creep: f64,
    max_bid: f64,
    rng: &mut R,
) -> Vec<Chromosome> {
    population
        .iter()
        .map(|chromosome| {
            chromosome
                .iter()
                .map(|&gene| {
                    if rng.gen::<f64>() >= mutation_prob {
                        return gene;
                    }
                    let range = (creep_factor * gene.abs()).max(min_creep);
                    let delta = rng.gen::<f64>() * 2.0 * range - range;
                    (gene + delta).clamp(0.0, max_bid)
                })
                .collect()
        })
        .collect()
}

/// Overwrites the first `copies` slots with unmutated copies of `best`.
/// Runs after the other operators so the best individual of the generation
/// survives untouched.
pub fn elitism(population: &[Chromosome], best: &Chromosome, copies: usize) -> Vec<Chromosome> {
    let mut next: Vec<Chromosome> = population.to_vec();
    for slot in next.iter_mut().take(copies) {
        *slot = best.clone();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(n: usize, len: usize) -> Vec<Chromosome> {
        (0..n)
            .map(|i| (0..len).map(|j| (i * len + j) as f64).collect())
            .collect()
    }

    #[test]
    fn selection_preserves_population_size() {
        let mut rng = StdRng::seed_from_u64(5);
        let pop = population(20, 4);
        let fitnesses: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let next = tournament_selection(&pop, &fitnesses, 3, 0.75, &mut rng);
        assert_eq!(next.len(), 20);
    }

    #[test]
    fn selection_favours_fit_individuals() {
        let mut rng = StdRng::seed_from_u64(6);
        let pop = population(10, 1);
        // Individual 9 vastly fitter than the rest.
        let fitnesses: Vec<f64> = (0..10).map(|i| if i == 9 { 1000.0 } else { 0.0 }).collect();
        let next = tournament_selection(&pop, &fitnesses, 4, 0.9, &mut rng);
        let winners = next.iter().filter(|c| c[0] == 9.0).count();
        assert!(winners > next.len() / 3, "expected selection pressure, got {winners}/10");
    }

    #[test]
    fn crossover_preserves_gene_multiset_per_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let pop = population(8, 5);
        let next = crossover(&pop, 1.0, &mut rng);

        assert_eq!(next.len(), pop.len());
        for position in 0..5 {
            let mut before: Vec<f64> = pop.iter().map(|c| c[position]).collect();
            let mut after: Vec<f64> = next.iter().map(|c| c[position]).collect();
            before.sort_by(|a, b| a.total_cmp(b));
            after.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(before, after);
        }
    }

    #[test]
    fn crossover_swaps_tails_within_pairs_only() {
        let mut rng = StdRng::seed_from_u64(8);
        let pop = population(4, 3);
        let next = crossover(&pop, 1.0, &mut rng);

        for pair in 0..2 {
            let (a, b) = (&pop[2 * pair], &pop[2 * pair + 1]);
            for position in 0..3 {
                let genes = [next[2 * pair][position], next[2 * pair + 1][position]];
                assert!(genes.contains(&a[position]));
                assert!(genes.contains(&b[position]));
            }
        }
    }

    #[test]
    fn mutation_respects_bid_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let pop = vec![vec![0.0, 50.0, 100.0]; 30];
        let next = creep_mutation(&pop, 1.0, 0.5, 0.01, 100.0, &mut rng);

        assert_eq!(next.len(), 30);
        for chromosome in &next {
            assert!(chromosome.iter().all(|&g| (0.0..=100.0).contains(&g)));
        }
        // With min_creep > 0, zero genes must be able to move.
        assert!(next.iter().any(|c| c[0] != 0.0));
    }

    #[test]
    fn elitism_overwrites_leading_slots() {
        let pop = population(6, 2);
        let best = vec![42.0, 42.0];
        let next = elitism(&pop, &best, 2);

        assert_eq!(next[0], best);
        assert_eq!(next[1], best);
        assert_eq!(next[2..], pop[2..]);
    }
}
