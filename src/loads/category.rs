//! Load categories

use serde::{Deserialize, Serialize};

/// How a second contribution on the same target is combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationRule {
    /// Add component-wise into one entry
    Sum,
    /// Keep every contribution as its own list entry
    Append,
}

/// Category of a user-entered load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCategory {
    Dead,
    Live,
    Wind,
    DirectPiping,
    Equipment,
}

impl LoadCategory {
    /// Wind cases stay distinguishable per target; everything else sums
    pub fn rule(self) -> AggregationRule {
        match self {
            LoadCategory::Wind => AggregationRule::Append,
            _ => AggregationRule::Sum,
        }
    }
}
