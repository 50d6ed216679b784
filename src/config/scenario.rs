use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auction::{Auction, Bidder, ClearingRule, Item, ItemId};
use crate::config::traits::ConfigSection;
use crate::error::{CoursebidError, Result};
use crate::types::UtilityMap;

/// Declarative description of a fixed test auction: items, bidders, rule and
/// bid ceiling. Buildable in code or loadable from TOML/JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    /// Bid ceiling; absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bid: Option<f64>,
    pub rule: ClearingRule,
    pub items: Vec<ItemSpec>,
    pub bidders: Vec<BidderSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidderSpec {
    /// Utilities positionally aligned with the scenario's item list.
    pub utilities: Vec<f64>,
    /// Value of any item not covered above.
    #[serde(default)]
    pub default_utility: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        fixed::first_price()
    }
}

impl ConfigSection for ScenarioConfig {
    fn section_name() -> &'static str {
        "scenario"
    }

    fn validate(&self) -> Result<()> {
        if let Some(max_bid) = self.max_bid {
            if max_bid < 0.0 || max_bid.is_nan() {
                return Err(CoursebidError::Configuration(format!(
                    "scenario '{}': max_bid must be non-negative, got {max_bid}",
                    self.name
                )));
            }
        }
        for item in &self.items {
            if item.capacity == 0 {
                return Err(CoursebidError::Configuration(format!(
                    "scenario '{}': item '{}' has zero capacity",
                    self.name, item.name
                )));
            }
        }
        for (idx, bidder) in self.bidders.iter().enumerate() {
            if bidder.utilities.len() > self.items.len() {
                return Err(CoursebidError::Configuration(format!(
                    "scenario '{}': bidder {idx} lists {} utilities for {} items",
                    self.name,
                    bidder.utilities.len(),
                    self.items.len()
                )));
            }
        }
        Ok(())
    }
}

impl ScenarioConfig {
    /// Loads a scenario from a `.toml` or `.json` file and validates it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let scenario: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            _ => toml::from_str(&contents)?,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Materializes the scenario into an `Auction` with zero-bid default
    /// strategies. Item ids are assigned positionally.
    pub fn build(&self) -> Result<Auction> {
        self.validate()?;

        let items: Vec<Item> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, spec)| Item::new(ItemId(idx), spec.name.clone(), spec.capacity))
            .collect();

        let bidders: Vec<Bidder> = self
            .bidders
            .iter()
            .map(|spec| {
                let utilities = UtilityMap::from_entries(
                    spec.default_utility,
                    spec.utilities
                        .iter()
                        .enumerate()
                        .map(|(idx, &value)| (ItemId(idx), value)),
                );
                Bidder::new(utilities)
            })
            .collect();

        Ok(Auction::new(
            self.max_bid.unwrap_or(f64::INFINITY),
            items,
            bidders,
            self.rule,
        ))
    }
}

/// The fixed test auctions the driver runs: a single contested seat under
/// both clearing rules, and a larger multi-course scenario for the max-bid
/// sweep.
pub mod fixed {
    use super::*;

    fn one_seat(name: &str, rule: ClearingRule) -> ScenarioConfig {
        ScenarioConfig {
            name: name.to_string(),
            max_bid: None,
            rule,
            items: vec![ItemSpec {
                name: name.to_string(),
                capacity: 1,
            }],
            bidders: vec![
                BidderSpec {
                    utilities: vec![2.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![4.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![1.0],
                    default_utility: 0.0,
                },
            ],
        }
    }

    /// Three bidders contesting one seat, winners pay their bid.
    pub fn first_price() -> ScenarioConfig {
        one_seat("first_price", ClearingRule::FirstPrice)
    }

    /// Same contest under the uniform second-price rule.
    pub fn second_price() -> ScenarioConfig {
        one_seat("second_price", ClearingRule::SecondPrice)
    }

    /// Six bidders over three courses with mixed capacities; demand exceeds
    /// supply on the popular courses.
    pub fn realistic() -> ScenarioConfig {
        ScenarioConfig {
            name: "realistic".to_string(),
            max_bid: None,
            rule: ClearingRule::SecondPrice,
            items: vec![
                ItemSpec {
                    name: "algorithms".to_string(),
                    capacity: 2,
                },
                ItemSpec {
                    name: "databases".to_string(),
                    capacity: 1,
                },
                ItemSpec {
                    name: "statistics".to_string(),
                    capacity: 3,
                },
            ],
            bidders: vec![
                BidderSpec {
                    utilities: vec![90.0, 40.0, 10.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![80.0, 70.0, 20.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![60.0, 85.0, 30.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![50.0, 20.0, 75.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![30.0, 55.0, 65.0],
                    default_utility: 0.0,
                },
                BidderSpec {
                    utilities: vec![20.0, 10.0, 95.0],
                    default_utility: 0.0,
                },
            ],
        }
    }
}
