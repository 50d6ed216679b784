use std::cmp::Ordering;
use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::auction::{Item, ItemId};
use crate::types::BidMap;

/// What an assigned bidder got and what they pay for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Award {
    pub payment: f64,
    pub item: ItemId,
}

/// One entry per bidder, in bidder order; `None` means unassigned.
pub type Assignment = Vec<Option<Award>>;

/// The pluggable clearing policy: turns all submitted bids into winners and
/// payments, respecting each item's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearingRule {
    /// Winners pay their own bid.
    FirstPrice,
    /// Winners of an item all pay the item's uniform clearing price: the
    /// first bid (in descending order) rejected because the item's capacity
    /// was exhausted. Items whose demand never exceeds capacity clear at 0.
    ///
    /// This is deliberately not per-unit Vickrey pricing; the single rejected
    /// bid prices every seat of the item.
    SecondPrice,
}

impl ClearingRule {
    /// Clears the auction. Tie-breaking among equal bids is randomized by
    /// shuffling the flattened bid list before the (stable) descending sort,
    /// so ties resolve in shuffled order and a seeded `rng` reproduces the
    /// outcome exactly.
    ///
    /// `bids` is indexed by bidder; bids on items absent from `items` are
    /// ignored. Zero bidders or zero items yield an all-unassigned result.
    pub fn clear<R: Rng>(&self, bids: &[BidMap], items: &[Item], rng: &mut R) -> Assignment {
        // Flatten in (bidder, item-list) order so the pre-shuffle order is
        // deterministic regardless of bid-map iteration order.
        let mut triples: Vec<(usize, ItemId, f64)> = Vec::new();
        for (bidder, bid_map) in bids.iter().enumerate() {
            for item in items {
                if let Some(&bid) = bid_map.get(&item.id) {
                    triples.push((bidder, item.id, bid));
                }
            }
        }

        triples.shuffle(rng);
        // Stable sort keeps the shuffled order among equal bids.
        triples.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

        let mut remaining: HashMap<ItemId, usize> =
            items.iter().map(|item| (item.id, item.capacity)).collect();
        let mut clearing_price: HashMap<ItemId, f64> = HashMap::new();
        let mut assignment: Assignment = vec![None; bids.len()];

        for (bidder, item, bid) in triples {
            if assignment[bidder].is_some() {
                continue;
            }
            // Triples only cover listed items, so the lookup always hits.
            let Some(capacity) = remaining.get_mut(&item) else {
                continue;
            };
            if *capacity > 0 {
                *capacity -= 1;
                assignment[bidder] = Some(Award {
                    payment: bid,
                    item,
                });
            } else {
                // First bid displaced by exhausted capacity sets the price.
                clearing_price.entry(item).or_insert(bid);
            }
        }

        if let ClearingRule::SecondPrice = self {
            for award in assignment.iter_mut().flatten() {
                award.payment = clearing_price.get(&award.item).copied().unwrap_or(0.0);
            }
        }

        assignment
    }
}
