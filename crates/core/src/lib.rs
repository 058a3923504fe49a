//! # Pitchbook Core
//!
//! Domain types and pure scheduling logic for pitch availability.
//!
//! - [`slots`]: the one-hour slot generator for a pitch and date
//! - [`interval`]: the half-open [`TimeRange`](interval::TimeRange) and its overlap test
//! - [`booking`]: quoting and conflict checks for a requested booking
//! - [`models`]: pitches, operating windows, closures, bookings and slots
//! - [`errors`]: the error taxonomy shared by the store and API crates
//!
//! Nothing in this crate performs I/O.

pub mod booking;
pub mod errors;
pub mod interval;
pub mod models;
pub mod slots;
