pub mod booking;
pub mod closure;
pub mod pitch;
pub mod schedule;
pub mod slot;
