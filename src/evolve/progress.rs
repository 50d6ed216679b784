/// Observer for the generational loop. The optimizer itself never prints;
/// drivers plug in whatever reporting they want.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = generation;
    }

    fn on_bidder_complete(&mut self, generation: usize, bidder: usize, best_fitness: f64) {
        let _ = (generation, bidder, best_fitness);
    }

    fn on_generation_complete(&mut self, generation: usize) {
        let _ = generation;
    }
}

/// Callback that ignores everything; for tests and library callers.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {}

/// Logs per-bidder best fitness through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_bidder_complete(&mut self, generation: usize, bidder: usize, best_fitness: f64) {
        log::debug!(
            "generation {generation}: bidder {bidder} best fitness {best_fitness:.4}"
        );
    }

    fn on_generation_complete(&mut self, generation: usize) {
        log::info!("generation {generation} complete");
    }
}
