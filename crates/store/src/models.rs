use std::collections::HashMap;

use eyre::{Result, WrapErr, eyre};
use pitchbook_core::models::{
    booking::Booking,
    closure::Closure,
    pitch::Pitch,
    schedule::{OperatingWindow, WeeklySchedule},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of a pitch's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub pitch_id: Uuid,
    #[serde(flatten)]
    pub window: OperatingWindow,
}

/// Everything the service knows about its pitches, as read from a data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub pitches: Vec<Pitch>,
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
    #[serde(default)]
    pub closures: Vec<Closure>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Snapshot {
    pub fn schedule_for(&self, pitch_id: Uuid) -> WeeklySchedule {
        WeeklySchedule::new(
            self.schedules
                .iter()
                .filter(|entry| entry.pitch_id == pitch_id)
                .map(|entry| entry.window.clone())
                .collect(),
        )
    }

    /// Rejects rows that point at unknown pitches, invalid schedules, and
    /// closures or bookings that end before they start.
    pub fn validate(&self) -> Result<()> {
        let pitches: HashMap<Uuid, &Pitch> = self.pitches.iter().map(|p| (p.id, p)).collect();
        if pitches.len() != self.pitches.len() {
            return Err(eyre!("Duplicate pitch id in snapshot"));
        }

        let known = |pitch_id: Uuid, what: &str| -> Result<()> {
            if pitches.contains_key(&pitch_id) {
                Ok(())
            } else {
                Err(eyre!("{} refers to unknown pitch {}", what, pitch_id))
            }
        };

        for entry in &self.schedules {
            known(entry.pitch_id, "Schedule entry")?;
        }
        for pitch_id in pitches.keys() {
            self.schedule_for(*pitch_id)
                .validate()
                .wrap_err_with(|| format!("Invalid schedule for pitch {}", pitch_id))?;
        }
        for closure in &self.closures {
            known(closure.pitch_id, "Closure")?;
            if closure.end <= closure.start {
                return Err(eyre!("Closure {} ends before it starts", closure.id));
            }
        }
        for booking in &self.bookings {
            known(booking.pitch_id, "Booking")?;
            if booking.end <= booking.start {
                return Err(eyre!("Booking {} ends before it starts", booking.id));
            }
        }
        Ok(())
    }
}
