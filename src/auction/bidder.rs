use crate::auction::strategy::{Strategy, ZeroBid};
use crate::types::UtilityMap;

/// A self-interested participant: a total utility mapping over items plus a
/// replaceable bidding strategy. Only the strategy is mutated after
/// construction; the optimizer swaps it once per generation.
pub struct Bidder {
    utilities: UtilityMap,
    strategy: Box<dyn Strategy>,
}

impl Bidder {
    /// A bidder with the default zero-bid strategy.
    pub fn new(utilities: UtilityMap) -> Self {
        Self {
            utilities,
            strategy: Box::new(ZeroBid),
        }
    }

    pub fn with_strategy(utilities: UtilityMap, strategy: Box<dyn Strategy>) -> Self {
        Self {
            utilities,
            strategy,
        }
    }

    pub fn utilities(&self) -> &UtilityMap {
        &self.utilities
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategy = strategy;
    }
}

impl std::fmt::Debug for Bidder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bidder")
            .field("utilities", &self.utilities)
            .finish_non_exhaustive()
    }
}
