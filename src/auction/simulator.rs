use rand::Rng;

use crate::auction::clearing::{Assignment, ClearingRule};
use crate::auction::{Bidder, Item};
use crate::error::{CoursebidError, Result};
use crate::types::BidMap;

/// One sealed-bid auction: an item list, a bidder list, a bid ceiling and a
/// pluggable clearing rule.
pub struct Auction {
    max_bid: f64,
    items: Vec<Item>,
    bidders: Vec<Bidder>,
    rule: ClearingRule,
}

/// Result of one auction round: the assignment plus, per bidder, the utility
/// of the awarded item (0 when unassigned).
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionOutcome {
    pub assignments: Assignment,
    pub awarded_utility: Vec<f64>,
}

impl AuctionOutcome {
    /// Utility minus payment for one bidder; 0 when unassigned.
    pub fn surplus(&self, bidder: usize) -> f64 {
        match &self.assignments[bidder] {
            Some(award) => self.awarded_utility[bidder] - award.payment,
            None => 0.0,
        }
    }

    /// Sum of awarded utilities across all bidders.
    pub fn total_utility(&self) -> f64 {
        self.awarded_utility.iter().sum()
    }
}

/// Realized total utility of the current strategies against a truthful
/// second-price reference, each averaged over the same number of draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyReport {
    pub realized: f64,
    pub reference: f64,
}

impl EfficiencyReport {
    pub fn ratio(&self) -> f64 {
        if self.reference > 0.0 {
            self.realized / self.reference
        } else {
            0.0
        }
    }
}

impl Auction {
    /// `max_bid` may be `f64::INFINITY` for an unbounded auction.
    pub fn new(max_bid: f64, items: Vec<Item>, bidders: Vec<Bidder>, rule: ClearingRule) -> Self {
        Self {
            max_bid,
            items,
            bidders,
            rule,
        }
    }

    pub fn max_bid(&self) -> f64 {
        self.max_bid
    }

    /// The driver sweeps this to study efficiency under tightening budgets.
    pub fn set_max_bid(&mut self, max_bid: f64) {
        self.max_bid = max_bid;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn bidders(&self) -> &[Bidder] {
        &self.bidders
    }

    pub fn bidders_mut(&mut self) -> &mut [Bidder] {
        &mut self.bidders
    }

    pub fn rule(&self) -> ClearingRule {
        self.rule
    }

    /// Runs one round: queries every bidder's strategy, validates the bids
    /// against `[0, max_bid]`, clears, and pairs each award with the winning
    /// bidder's utility for the item.
    ///
    /// An out-of-range or non-finite bid is a contract violation of the
    /// strategy that produced it and is surfaced as an error, never clamped.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<AuctionOutcome> {
        let mut all_bids: Vec<BidMap> = Vec::with_capacity(self.bidders.len());
        for (bidder_idx, bidder) in self.bidders.iter().enumerate() {
            let bids = bidder.strategy().compute_bids(&self.items, bidder.utilities());
            for (&item, &bid) in &bids {
                if !bid.is_finite() || bid < 0.0 || bid > self.max_bid {
                    return Err(CoursebidError::BidOutOfRange {
                        bidder: bidder_idx,
                        item,
                        bid,
                        max_bid: self.max_bid,
                    });
                }
            }
            all_bids.push(bids);
        }

        let assignments = self.rule.clear(&all_bids, &self.items, rng);
        let awarded_utility = assignments
            .iter()
            .enumerate()
            .map(|(bidder_idx, award)| match award {
                Some(award) => *self.bidders[bidder_idx].utilities().get(&award.item),
                None => 0.0,
            })
            .collect();

        Ok(AuctionOutcome {
            assignments,
            awarded_utility,
        })
    }

    /// Reporting-only efficiency measure: average realized total utility of
    /// the committed strategies over `rounds` draws, against a second-price
    /// reference in which every bidder bids their utility (clamped into the
    /// bid range) over the same number of draws.
    pub fn allocative_efficiency<R: Rng>(
        &self,
        rounds: usize,
        rng: &mut R,
    ) -> Result<EfficiencyReport> {
        if rounds == 0 {
            return Err(CoursebidError::Configuration(
                "efficiency report needs at least one round".to_string(),
            ));
        }

        let mut realized = 0.0;
        for _ in 0..rounds {
            realized += self.run(rng)?.total_utility();
        }

        let truthful_bids: Vec<BidMap> = self
            .bidders
            .iter()
            .map(|bidder| {
                self.items
                    .iter()
                    .map(|item| {
                        let utility = *bidder.utilities().get(&item.id);
                        (item.id, utility.clamp(0.0, self.max_bid))
                    })
                    .collect()
            })
            .collect();

        let mut reference = 0.0;
        for _ in 0..rounds {
            let assignment = ClearingRule::SecondPrice.clear(&truthful_bids, &self.items, rng);
            for (bidder_idx, award) in assignment.iter().enumerate() {
                if let Some(award) = award {
                    reference += *self.bidders[bidder_idx].utilities().get(&award.item);
                }
            }
        }

        Ok(EfficiencyReport {
            realized: realized / rounds as f64,
            reference: reference / rounds as f64,
        })
    }
}
