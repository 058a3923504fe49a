use async_trait::async_trait;
use mockall::mock;
use pitchbook_core::{
    interval::TimeRange,
    models::{booking::Booking, closure::Closure, pitch::Pitch, schedule::WeeklySchedule},
};
use uuid::Uuid;

use crate::PitchStore;

mock! {
    pub PitchStore {}

    #[async_trait]
    impl PitchStore for PitchStore {
        async fn get_pitch(&self, id: Uuid) -> eyre::Result<Option<Pitch>>;

        async fn get_schedule(&self, pitch_id: Uuid) -> eyre::Result<WeeklySchedule>;

        async fn get_closures(
            &self,
            pitch_id: Uuid,
            range: TimeRange,
        ) -> eyre::Result<Vec<Closure>>;

        async fn get_holding_bookings(
            &self,
            pitch_id: Uuid,
            range: TimeRange,
        ) -> eyre::Result<Vec<Booking>>;
    }
}
