use std::path::Path;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use pitchbook_core::{
    interval::TimeRange,
    models::{
        booking::Booking,
        closure::Closure,
        pitch::Pitch,
        schedule::{OperatingWindow, WeeklySchedule},
    },
};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    PitchStore,
    models::{ScheduleEntry, Snapshot},
};

/// A [`PitchStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self {
            data: RwLock::new(snapshot),
        })
    }

    /// Reads and validates a JSON [`Snapshot`] from `path`.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read data file {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Failed to parse data file {}", path.display()))?;

        info!(
            "Loaded {} pitches, {} schedule rows, {} closures, {} bookings from {}",
            snapshot.pitches.len(),
            snapshot.schedules.len(),
            snapshot.closures.len(),
            snapshot.bookings.len(),
            path.display()
        );

        Self::from_snapshot(snapshot)
    }

    pub async fn insert_pitch(&self, pitch: Pitch) {
        let mut data = self.data.write().await;
        data.pitches.retain(|p| p.id != pitch.id);
        data.pitches.push(pitch);
    }

    /// Adds a window to a pitch's schedule, refusing it if the schedule would
    /// become invalid.
    pub async fn insert_window(&self, pitch_id: Uuid, window: OperatingWindow) -> Result<()> {
        let mut data = self.data.write().await;
        if !data.pitches.iter().any(|p| p.id == pitch_id) {
            return Err(eyre!("Pitch {} not found", pitch_id));
        }

        let mut windows = data.schedule_for(pitch_id).0;
        windows.push(window.clone());
        WeeklySchedule::new(windows)
            .validate()
            .wrap_err_with(|| format!("Invalid schedule for pitch {}", pitch_id))?;

        data.schedules.push(ScheduleEntry { pitch_id, window });
        Ok(())
    }

    pub async fn insert_closure(&self, closure: Closure) {
        self.data.write().await.closures.push(closure);
    }

    pub async fn insert_booking(&self, booking: Booking) {
        self.data.write().await.bookings.push(booking);
    }
}

#[async_trait]
impl PitchStore for MemoryStore {
    async fn get_pitch(&self, id: Uuid) -> Result<Option<Pitch>> {
        debug!("Getting pitch by id: {}", id);
        let data = self.data.read().await;
        Ok(data.pitches.iter().find(|p| p.id == id).cloned())
    }

    async fn get_schedule(&self, pitch_id: Uuid) -> Result<WeeklySchedule> {
        debug!("Getting schedule for pitch: {}", pitch_id);
        Ok(self.data.read().await.schedule_for(pitch_id))
    }

    async fn get_closures(&self, pitch_id: Uuid, range: TimeRange) -> Result<Vec<Closure>> {
        let data = self.data.read().await;
        let mut closures: Vec<Closure> = data
            .closures
            .iter()
            .filter(|c| c.pitch_id == pitch_id && range.overlaps(&TimeRange::from(*c)))
            .cloned()
            .collect();
        closures.sort_by_key(|c| c.start);

        debug!(
            "Found {} closures for pitch {} in {:?}",
            closures.len(),
            pitch_id,
            range
        );
        Ok(closures)
    }

    async fn get_holding_bookings(
        &self,
        pitch_id: Uuid,
        range: TimeRange,
    ) -> Result<Vec<Booking>> {
        let data = self.data.read().await;
        let mut bookings: Vec<Booking> = data
            .bookings
            .iter()
            .filter(|b| {
                b.pitch_id == pitch_id
                    && b.status.holds_slot()
                    && range.overlaps(&TimeRange::from(*b))
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start);

        debug!(
            "Found {} holding bookings for pitch {} in {:?}",
            bookings.len(),
            pitch_id,
            range
        );
        Ok(bookings)
    }
}
