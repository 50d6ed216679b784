use crate::auction::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoursebidError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("bidder {bidder} bid {bid} on item {item:?}, outside [0, {max_bid}]")]
    BidOutOfRange {
        bidder: usize,
        item: ItemId,
        bid: f64,
        max_bid: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoursebidError>;
