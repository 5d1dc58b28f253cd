//! Typed views of the XML documents the API returns.
//!
//! Each response is decoded twice: once as an [`Envelope`] to check
//! `<Status>`, then as the endpoint's payload. Elements the client does not
//! use are ignored; missing required elements are parse errors.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use wfm_core::dates::parse_api_date;
use wfm_core::{Job, JobId, StaffId, StaffMember, Task, TaskId, TimeEntry};

use crate::{ApiError, RawResponse};

/// The literal `<Status>` value of a successful response.
const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Status")]
    status: String,
}

/// Validates HTTP status and `<Status>`, returning the document text.
pub(crate) fn check(response: RawResponse) -> Result<String, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Transport {
            status: response.status,
            body: response.body,
        });
    }

    let envelope: Envelope = decode(&response.body)?;
    let status = envelope.status.trim();
    if status != STATUS_OK {
        return Err(ApiError::Status {
            status: status.to_string(),
            document: response.body,
        });
    }

    Ok(response.body)
}

/// Decodes a document into `T`, keeping the raw body on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    quick_xml::de::from_str(body).map_err(|err| ApiError::Parse {
        message: err.to_string(),
        body: body.to_string(),
    })
}

fn parse_error(message: impl Into<String>, body: &str) -> ApiError {
    ApiError::Parse {
        message: message.into(),
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// staff.api/list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct StaffListResponse {
    #[serde(rename = "StaffList", default)]
    staff_list: StaffList,
}

#[derive(Debug, Default, Deserialize)]
struct StaffList {
    #[serde(rename = "Staff", default)]
    staff: Vec<StaffRecord>,
}

#[derive(Debug, Deserialize)]
struct StaffRecord {
    #[serde(rename = "ID")]
    id: StaffId,
    #[serde(rename = "Email", default)]
    email: String,
}

impl StaffListResponse {
    pub(crate) fn into_staff(self) -> Vec<StaffMember> {
        self.staff_list
            .staff
            .into_iter()
            .map(|record| StaffMember {
                id: record.id,
                email: record.email,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// job.api/current and job.api/get/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentJobsResponse {
    #[serde(rename = "Jobs", default)]
    jobs: JobList,
}

#[derive(Debug, Default, Deserialize)]
struct JobList {
    #[serde(rename = "Job", default)]
    jobs: Vec<JobRecord>,
}

#[derive(Debug, Deserialize)]
struct JobRecord {
    #[serde(rename = "ID")]
    id: JobId,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Client")]
    client: ClientRef,
    #[serde(rename = "Assigned", default)]
    assigned: StaffRefList,
}

#[derive(Debug, Deserialize)]
struct ClientRef {
    #[serde(rename = "Name", default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct StaffRefList {
    #[serde(rename = "Staff", default)]
    staff: Vec<StaffRef>,
}

#[derive(Debug, Deserialize)]
struct StaffRef {
    #[serde(rename = "ID")]
    id: StaffId,
}

impl CurrentJobsResponse {
    pub(crate) fn into_jobs(self) -> Vec<Job> {
        self.jobs
            .jobs
            .into_iter()
            .map(|record| Job {
                id: record.id,
                name: record.name.trim().to_string(),
                client_name: record.client.name.trim().to_string(),
                assigned_staff_ids: record.assigned.staff.into_iter().map(|s| s.id).collect(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobDetailResponse {
    #[serde(rename = "Job")]
    job: JobDetail,
}

#[derive(Debug, Deserialize)]
struct JobDetail {
    #[serde(rename = "Tasks", default)]
    tasks: TaskList,
}

#[derive(Debug, Default, Deserialize)]
struct TaskList {
    #[serde(rename = "Task", default)]
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    #[serde(rename = "ID")]
    id: TaskId,
    #[serde(rename = "Name")]
    name: String,
}

impl JobDetailResponse {
    pub(crate) fn into_tasks(self) -> Vec<Task> {
        self.job
            .tasks
            .tasks
            .into_iter()
            .map(|record| Task {
                id: record.id,
                name: record.name.trim().to_string(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// time.api/list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TimesResponse {
    #[serde(rename = "Times", default)]
    times: TimeList,
}

#[derive(Debug, Default, Deserialize)]
struct TimeList {
    #[serde(rename = "Time", default)]
    times: Vec<TimeRecord>,
}

#[derive(Debug, Deserialize)]
struct TimeRecord {
    #[serde(rename = "Staff")]
    staff: StaffRef,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Minutes")]
    minutes: i64,
    #[serde(rename = "Note", default)]
    note: String,
}

impl TimesResponse {
    /// Converts records to entries; `body` is carried into any date error.
    pub(crate) fn into_entries(self, body: &str) -> Result<Vec<TimeEntry>, ApiError> {
        self.times
            .times
            .into_iter()
            .map(|record| {
                let date =
                    parse_api_date(&record.date).map_err(|err| parse_error(err.to_string(), body))?;
                let note = Some(record.note).filter(|note| !note.trim().is_empty());
                Ok(TimeEntry {
                    staff_id: record.staff.id,
                    date,
                    minutes: record.minutes,
                    note,
                })
            })
            .collect()
    }
}
