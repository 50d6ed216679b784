//! Sealed-bid auction simulation with evolutionary bidding strategies.
//!
//! Capacity-limited, indivisible items (course seats) are allocated among
//! self-interested bidders by a pluggable clearing rule, and a per-bidder
//! genetic search co-evolves bidding strategies against the mechanism and
//! against the other bidders.

pub mod auction;
pub mod config;
pub mod error;
pub mod evolve;
pub mod types;

pub use error::{CoursebidError, Result};
