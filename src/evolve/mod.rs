pub mod chromosome;
pub mod operators;
pub mod optimizer;
pub mod progress;

pub use chromosome::{random_chromosome, Chromosome, ChromosomeEncoding};
pub use optimizer::{EvolvedBidder, StrategyOptimizer};
pub use progress::{LogProgress, NoProgress, ProgressCallback};
