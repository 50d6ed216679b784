use serde::{Deserialize, Serialize};

/// Unique identity of an item within one auction run. Used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

/// A capacity-bounded resource, e.g. a course with a fixed number of seats.
/// At most `capacity` bidders can win it. Immutable once the auction runs.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub capacity: usize,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
        }
    }
}
