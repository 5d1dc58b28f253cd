//! Entities read from and written to the timesheet service.
//!
//! Nothing here is persisted: every run rebuilds these from fresh responses.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::dates;
use crate::{JobId, StaffId, TaskId};

/// A staff record, used once per session to resolve the caller's ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    pub id: StaffId,
    pub email: String,
}

/// A current job and the staff assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub client_name: String,
    pub assigned_staff_ids: Vec<StaffId>,
}

impl Job {
    pub fn is_assigned_to(&self, staff_id: &StaffId) -> bool {
        self.assigned_staff_ids.contains(staff_id)
    }
}

/// A task within a job; time is logged against a (job, task) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
}

/// Time already logged, shown before a new entry is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub minutes: i64,
    /// `None` when the entry has no description.
    pub note: Option<String>,
}

/// A new timesheet entry, serialized as the `<Timesheet>` document that
/// `time.api/add` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "Timesheet")]
pub struct TimesheetSubmission {
    #[serde(rename = "Job")]
    pub job_id: JobId,
    #[serde(rename = "Task")]
    pub task_id: TaskId,
    #[serde(rename = "Staff")]
    pub staff_id: StaffId,
    #[serde(rename = "Date", serialize_with = "serialize_wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "Minutes")]
    pub minutes: i64,
    #[serde(rename = "Note")]
    pub note: String,
}

fn serialize_wire_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dates::to_wire(*date))
}
