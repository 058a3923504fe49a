use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    pub id: Uuid,
    pub name: String,
    /// Hourly rate in pence.
    pub price_per_hour: i64,
    pub is_active: bool,
    /// The venue's timezone; operating windows are wall-clock times in this zone.
    pub timezone: Tz,
}
