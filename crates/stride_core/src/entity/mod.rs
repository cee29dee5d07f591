//! Syncable domain records.

mod application;
mod check_in;
mod goal;
mod routine;

pub use application::{ApplicationSource, ApplicationStatus, JobApplication};
pub use check_in::CheckIn;
pub use goal::{Goal, GoalStatus};
pub use routine::Routine;
