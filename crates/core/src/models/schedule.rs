use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// A pitch's recurring opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    /// Day of the week, 0 = Sunday through 6 = Saturday.
    pub weekday: u8,
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

impl OperatingWindow {
    pub fn new(weekday: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            weekday,
            start_time,
            end_time,
            valid_from: None,
            valid_until: None,
        }
    }

    /// Whether this window governs `date`: same weekday, and `date` falls in
    /// the inclusive `valid_from..=valid_until` range when either bound is set.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        if date.weekday().num_days_from_sunday() != u32::from(self.weekday) {
            return false;
        }
        let after_start = self.valid_from.is_none_or(|from| from <= date);
        let before_end = self.valid_until.is_none_or(|until| date <= until);
        after_start && before_end
    }

    pub fn is_well_formed(&self) -> bool {
        self.end_time > self.start_time
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.weekday > 6 {
            return Err(BookingError::Validation(format!(
                "Weekday must be between 0 (Sunday) and 6 (Saturday), got {}",
                self.weekday
            )));
        }
        if !self.is_well_formed() {
            return Err(BookingError::Validation(format!(
                "End time {} must be after start time {}",
                self.end_time.format("%H:%M"),
                self.start_time.format("%H:%M")
            )));
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                return Err(BookingError::Validation(format!(
                    "valid_from {} is after valid_until {}",
                    from, until
                )));
            }
        }
        Ok(())
    }

    fn validity_intersects(&self, other: &OperatingWindow) -> bool {
        let starts_before_other_ends = match (self.valid_from, other.valid_until) {
            (Some(from), Some(until)) => from <= until,
            _ => true,
        };
        let other_starts_before_self_ends = match (other.valid_from, self.valid_until) {
            (Some(from), Some(until)) => from <= until,
            _ => true,
        };
        starts_before_other_ends && other_starts_before_self_ends
    }
}

/// Every operating window configured for one pitch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(pub Vec<OperatingWindow>);

impl WeeklySchedule {
    pub fn new(mut windows: Vec<OperatingWindow>) -> Self {
        windows.sort_by_key(|w| (w.weekday, w.valid_from, w.start_time));
        Self(windows)
    }

    /// The window that governs `date`, if the pitch opens that day.
    pub fn window_for(&self, date: NaiveDate) -> Option<&OperatingWindow> {
        self.0.iter().find(|w| w.applies_on(date))
    }

    /// Checks each window and rejects two windows for the same weekday whose
    /// validity ranges intersect, since a date must resolve to at most one window.
    pub fn validate(&self) -> BookingResult<()> {
        for window in &self.0 {
            window.validate()?;
        }
        for (i, a) in self.0.iter().enumerate() {
            for b in &self.0[i + 1..] {
                if a.weekday == b.weekday && a.validity_intersects(b) {
                    return Err(BookingError::Validation(format!(
                        "Multiple operating windows apply to weekday {}",
                        a.weekday
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn windows(&self) -> &[OperatingWindow] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Serializes wall-clock times as `HH:MM`; accepts `HH:MM` or `HH:MM:SS`.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid wall-clock time: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .ok()
    }
}
