//! # Pitchbook Store
//!
//! The read side of pitch data: pitches, their weekly schedules, closures and
//! bookings. Handlers depend on the [`PitchStore`] trait only; [`MemoryStore`]
//! serves a JSON snapshot and [`mock::MockPitchStore`] stands in for tests.

pub mod memory;
pub mod mock;
pub mod models;

use async_trait::async_trait;
use eyre::Result;
use pitchbook_core::{
    interval::TimeRange,
    models::{booking::Booking, closure::Closure, pitch::Pitch, schedule::WeeklySchedule},
};
use uuid::Uuid;

pub use memory::MemoryStore;

#[async_trait]
pub trait PitchStore: Send + Sync {
    async fn get_pitch(&self, id: Uuid) -> Result<Option<Pitch>>;

    /// All operating windows for the pitch, ordered by weekday.
    async fn get_schedule(&self, pitch_id: Uuid) -> Result<WeeklySchedule>;

    /// Closures for the pitch that overlap `range`.
    async fn get_closures(&self, pitch_id: Uuid, range: TimeRange) -> Result<Vec<Closure>>;

    /// Pending and confirmed bookings for the pitch that overlap `range`.
    async fn get_holding_bookings(&self, pitch_id: Uuid, range: TimeRange)
    -> Result<Vec<Booking>>;
}
