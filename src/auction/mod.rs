pub mod bidder;
pub mod clearing;
pub mod item;
pub mod simulator;
pub mod strategy;

pub use bidder::Bidder;
pub use clearing::{Assignment, Award, ClearingRule};
pub use item::{Item, ItemId};
pub use simulator::{Auction, AuctionOutcome, EfficiencyReport};
pub use strategy::{AllIn, ConstantBid, PolynomialResponse, Strategy, ZeroBid};
