use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bookable hour within a pitch's operating window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available: bool,
    /// Price in pence.
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
}

impl AvailabilityResponse {
    pub fn empty() -> Self {
        Self { slots: Vec::new() }
    }
}
