use crate::auction::Item;
use crate::types::{BidMap, UtilityMap};

/// A bidding strategy: a pure function from the current item list (plus the
/// bidder's own utilities) to a bid mapping. Implementations must not consult
/// any state beyond their own fields and the arguments.
pub trait Strategy {
    fn compute_bids(&self, items: &[Item], utilities: &UtilityMap) -> BidMap;
}

/// Bids zero on every item. The default strategy, and the fallback when the
/// polynomial strategy cannot normalize its raw bids.
#[derive(Debug, Clone, Default)]
pub struct ZeroBid;

impl Strategy for ZeroBid {
    fn compute_bids(&self, items: &[Item], _utilities: &UtilityMap) -> BidMap {
        items.iter().map(|item| (item.id, 0.0)).collect()
    }
}

/// One fixed bid per item, positionally aligned with the item list. The
/// optimizer validates the length against the item count before any
/// generation runs.
#[derive(Debug, Clone)]
pub struct ConstantBid {
    pub bids: Vec<f64>,
}

impl ConstantBid {
    pub fn new(bids: Vec<f64>) -> Self {
        Self { bids }
    }
}

impl Strategy for ConstantBid {
    fn compute_bids(&self, items: &[Item], _utilities: &UtilityMap) -> BidMap {
        items
            .iter()
            .zip(&self.bids)
            .map(|(item, &bid)| (item.id, bid))
            .collect()
    }
}

/// Bids the whole budget on the single highest-utility item.
#[derive(Debug, Clone)]
pub struct AllIn {
    pub budget: f64,
}

impl Strategy for AllIn {
    fn compute_bids(&self, items: &[Item], utilities: &UtilityMap) -> BidMap {
        let favourite = items
            .iter()
            .map(|item| item.id)
            .max_by(|a, b| {
                utilities
                    .get(a)
                    .partial_cmp(utilities.get(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        items
            .iter()
            .map(|item| {
                let bid = if Some(item.id) == favourite {
                    self.budget
                } else {
                    0.0
                };
                (item.id, bid)
            })
            .collect()
    }
}

/// Evaluates a polynomial at each item's utility to produce a raw bid, then
/// rescales the raw bids so they sum exactly to `budget`.
///
/// The rescale divides by the raw-bid sum. When that sum is zero, negative,
/// or non-finite the strategy falls back to bidding zero on everything
/// instead of dividing through.
#[derive(Debug, Clone)]
pub struct PolynomialResponse {
    pub coefficients: Vec<f64>,
    pub budget: f64,
}

impl PolynomialResponse {
    pub fn new(coefficients: Vec<f64>, budget: f64) -> Self {
        Self {
            coefficients,
            budget,
        }
    }

    fn evaluate_at(&self, x: f64) -> f64 {
        // Horner form, coefficients in ascending degree order.
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

impl Strategy for PolynomialResponse {
    fn compute_bids(&self, items: &[Item], utilities: &UtilityMap) -> BidMap {
        let raw: Vec<f64> = items
            .iter()
            .map(|item| self.evaluate_at(*utilities.get(&item.id)))
            .collect();

        let sum: f64 = raw.iter().sum();
        if !(sum > 0.0) || !sum.is_finite() {
            return ZeroBid.compute_bids(items, utilities);
        }

        let scale = self.budget / sum;
        items
            .iter()
            .zip(raw)
            .map(|(item, bid)| (item.id, bid * scale))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::ItemId;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(ItemId(i), format!("item-{i}"), 1))
            .collect()
    }

    #[test]
    fn zero_bid_covers_every_item() {
        let items = items(3);
        let bids = ZeroBid.compute_bids(&items, &UtilityMap::new(0.0));
        assert_eq!(bids.len(), 3);
        assert!(bids.values().all(|&b| b == 0.0));
    }

    #[test]
    fn constant_bid_follows_item_order() {
        let items = items(2);
        let bids = ConstantBid::new(vec![3.0, 7.0]).compute_bids(&items, &UtilityMap::new(0.0));
        assert_eq!(bids[&ItemId(0)], 3.0);
        assert_eq!(bids[&ItemId(1)], 7.0);
    }

    #[test]
    fn all_in_targets_highest_utility() {
        let items = items(3);
        let utilities =
            UtilityMap::from_entries(0.0, vec![(ItemId(0), 1.0), (ItemId(1), 9.0), (ItemId(2), 4.0)]);
        let bids = AllIn { budget: 100.0 }.compute_bids(&items, &utilities);
        assert_eq!(bids[&ItemId(1)], 100.0);
        assert_eq!(bids[&ItemId(0)], 0.0);
        assert_eq!(bids[&ItemId(2)], 0.0);
    }

    #[test]
    fn polynomial_bids_sum_to_budget() {
        let items = items(4);
        let utilities = UtilityMap::from_entries(
            0.0,
            vec![
                (ItemId(0), 0.0),
                (ItemId(1), 1.0),
                (ItemId(2), 2.0),
                (ItemId(3), 3.0),
            ],
        );
        // 3 + 1*x + 1*x^2
        let strategy = PolynomialResponse::new(vec![3.0, 1.0, 1.0], 60.0);
        let bids = strategy.compute_bids(&items, &utilities);

        let total: f64 = bids.values().sum();
        assert!((total - 60.0).abs() < 1e-9);
        // Raw bids 3, 5, 9, 15 sum to 32; scale preserves proportions.
        assert!((bids[&ItemId(0)] - 60.0 * 3.0 / 32.0).abs() < 1e-9);
        assert!((bids[&ItemId(3)] - 60.0 * 15.0 / 32.0).abs() < 1e-9);
    }

    #[test]
    fn polynomial_zero_sum_falls_back_to_zero_bids() {
        let items = items(2);
        let utilities = UtilityMap::new(0.0);
        // Zero constant term, so all raw bids are 0 at utility 0.
        let strategy = PolynomialResponse::new(vec![0.0, 2.0], 50.0);
        let bids = strategy.compute_bids(&items, &utilities);
        assert!(bids.values().all(|&b| b == 0.0));
    }
}
