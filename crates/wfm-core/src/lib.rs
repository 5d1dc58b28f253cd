//! Core domain logic for the WorkflowMax timesheet client.
//!
//! This crate contains the fundamental types and logic for:
//! - Entities: staff, jobs, tasks, time entries and submissions
//! - Formatting: `H:MM` durations and `YYYYMMDD` wire dates
//! - Selection: ordering listings and validating user picks

pub mod dates;
pub mod duration;
mod model;
pub mod selection;
mod types;

pub use dates::{DaySummary, summarize_days};
pub use duration::{DurationError, format_duration, parse_duration};
pub use model::{Job, StaffMember, Task, TimeEntry, TimesheetSubmission};
pub use selection::{SelectionError, TaskChoice};
pub use types::{JobId, StaffId, TaskId, ValidationError};
