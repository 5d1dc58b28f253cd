//! The request contract and the timesheet queries built on it.

use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use wfm_core::dates::to_wire;
use wfm_core::{Job, JobId, StaffId, Task, TimeEntry, TimesheetSubmission};

use crate::response::{
    self, CurrentJobsResponse, JobDetailResponse, StaffListResponse, TimesResponse,
};
use crate::transport::{ApiRequest, HttpTransport, Method, Transport};
use crate::ApiError;

/// The three values needed to talk to the API as a particular person.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address of the caller's staff record.
    pub email: String,
    pub api_key: String,
    pub account_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"[REDACTED]")
            .field("account_key", &"[REDACTED]")
            .finish()
    }
}

/// Authenticated access to the API, one blocking call per request.
pub struct Api<T = HttpTransport> {
    transport: T,
    credentials: Credentials,
}

impl<T> fmt::Debug for Api<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Api<T> {
    pub const fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Issues a request and returns the response document once both the
    /// HTTP status and `<Status>` say it succeeded.
    ///
    /// `extra_params` are merged over the two authentication parameters.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        extra_params: &[(&str, String)],
        body: Option<String>,
    ) -> Result<String, ApiError> {
        let mut params = vec![
            ("apiKey".to_string(), self.credentials.api_key.clone()),
            ("accountKey".to_string(), self.credentials.account_key.clone()),
        ];
        for (key, value) in extra_params {
            match params.iter_mut().find(|(existing, _)| existing.as_str() == *key) {
                Some(param) => param.1.clone_from(value),
                None => params.push(((*key).to_string(), value.clone())),
            }
        }

        let request = ApiRequest {
            method,
            path: path.to_string(),
            params,
            body,
        };
        tracing::debug!(%method, path, "sending request");
        let response = self.transport.execute(&request)?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");

        response::check(response)
    }

    fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, String)],
    ) -> Result<(R, String), ApiError> {
        let body = self.request(Method::Get, path, extra_params, None)?;
        let decoded = response::decode(&body)?;
        Ok((decoded, body))
    }

    /// Finds the staff ID whose email matches `email` exactly.
    pub fn resolve_my_id(&self, email: &str) -> Result<StaffId, ApiError> {
        let (staff, _) = self.get::<StaffListResponse>("staff.api/list", &[])?;
        staff
            .into_staff()
            .into_iter()
            .find(|member| member.email == email)
            .map(|member| member.id)
            .ok_or_else(|| ApiError::StaffNotFound {
                email: email.to_string(),
            })
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

/// A session bound to the caller's staff ID.
///
/// The ID is resolved once, in [`Client::connect`], and never changes.
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    api: Api<T>,
    my_id: StaffId,
}

impl Client<HttpTransport> {
    /// Connects over HTTPS and resolves the caller's staff ID.
    pub fn connect(credentials: Credentials) -> Result<Self, ApiError> {
        Self::with_transport(HttpTransport::new()?, credentials)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, credentials: Credentials) -> Result<Self, ApiError> {
        let api = Api::new(transport, credentials);
        let my_id = api.resolve_my_id(&api.credentials.email)?;
        tracing::debug!(%my_id, "resolved staff id");
        Ok(Self { api, my_id })
    }

    pub const fn my_id(&self) -> &StaffId {
        &self.my_id
    }

    pub const fn api(&self) -> &Api<T> {
        &self.api
    }

    /// Current jobs the caller is assigned to, in server order.
    pub fn list_my_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let (jobs, _) = self.api.get::<CurrentJobsResponse>("job.api/current", &[])?;
        let jobs: Vec<Job> = jobs
            .into_jobs()
            .into_iter()
            .filter(|job| job.is_assigned_to(&self.my_id))
            .collect();
        tracing::debug!(count = jobs.len(), "listed assigned jobs");
        Ok(jobs)
    }

    pub fn list_tasks(&self, job_id: &JobId) -> Result<Vec<Task>, ApiError> {
        let path = format!("job.api/get/{job_id}");
        let (job, _) = self.api.get::<JobDetailResponse>(&path, &[])?;
        Ok(job.into_tasks())
    }

    pub fn list_times_for_date(&self, date: NaiveDate) -> Result<Vec<TimeEntry>, ApiError> {
        self.list_times_between(date, date)
    }

    /// The caller's time entries from `from` to `to`, both inclusive.
    ///
    /// The listing may include other staff members' entries, so it is
    /// filtered to the caller here.
    pub fn list_times_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, ApiError> {
        let params = [("from", to_wire(from)), ("to", to_wire(to))];
        let (times, body) = self.api.get::<TimesResponse>("time.api/list", &params)?;
        let entries: Vec<TimeEntry> = times
            .into_entries(&body)?
            .into_iter()
            .filter(|entry| entry.staff_id == self.my_id)
            .collect();
        tracing::debug!(count = entries.len(), %from, %to, "listed time entries");
        Ok(entries)
    }

    /// Records a new timesheet entry.
    pub fn submit(&self, submission: &TimesheetSubmission) -> Result<(), ApiError> {
        let body =
            quick_xml::se::to_string(submission).map_err(|err| ApiError::Encode(err.to_string()))?;
        self.api
            .request(Method::Post, "time.api/add", &[], Some(body))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::stub::StubTransport;

    const STAFF: &str = r"<Response>
        <Status>OK</Status>
        <StaffList>
            <Staff><ID>1</ID><Email>ann@example.com</Email></Staff>
            <Staff><ID>2</ID><Email>bob@example.com</Email></Staff>
        </StaffList>
    </Response>";

    fn credentials(email: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            api_key: "api-secret".to_string(),
            account_key: "account-secret".to_string(),
        }
    }

    fn connect(transport: StubTransport) -> Client<StubTransport> {
        Client::with_transport(transport.with_ok("staff.api/list", STAFF), credentials("bob@example.com"))
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn connect_resolves_staff_id_by_exact_email() {
        let client = connect(StubTransport::new());
        assert_eq!(client.my_id().as_str(), "2");
    }

    #[test]
    fn connect_fails_for_unknown_email() {
        let transport = StubTransport::new().with_ok("staff.api/list", STAFF);
        let err = Client::with_transport(transport, credentials("BOB@example.com")).unwrap_err();
        assert!(matches!(err, ApiError::StaffNotFound { ref email } if email == "BOB@example.com"));
        assert!(err.to_string().contains("BOB@example.com"));
    }

    #[test]
    fn every_request_carries_credentials() {
        let client = connect(StubTransport::new());
        let requests = client.api().transport().requests();
        assert_eq!(requests[0].param("apiKey"), Some("api-secret"));
        assert_eq!(requests[0].param("accountKey"), Some("account-secret"));
    }

    #[test]
    fn extra_params_override_defaults() {
        let transport = StubTransport::new().with_ok("x", "<Response><Status>OK</Status></Response>");
        let api = Api::new(transport, credentials("bob@example.com"));

        api.request(Method::Get, "x", &[("accountKey", "other".to_string())], None)
            .unwrap();

        let requests = api.transport().requests();
        assert_eq!(requests[0].param("accountKey"), Some("other"));
        assert_eq!(requests[0].params.len(), 2);
    }

    #[test]
    fn list_my_jobs_keeps_assigned_jobs_in_order() {
        let jobs = r"<Response>
            <Status>OK</Status>
            <Jobs>
                <Job><ID>J1</ID><Name>Build</Name><Client><Name>Acme</Name></Client>
                    <Assigned><Staff><ID>1</ID></Staff><Staff><ID>2</ID></Staff></Assigned></Job>
                <Job><ID>J2</ID><Name>Audit</Name><Client><Name>Acme</Name></Client>
                    <Assigned><Staff><ID>2</ID></Staff></Assigned></Job>
                <Job><ID>J3</ID><Name>Plan</Name><Client><Name>Zeta</Name></Client>
                    <Assigned><Staff><ID>3</ID></Staff></Assigned></Job>
            </Jobs>
        </Response>";
        let client = connect(StubTransport::new().with_ok("job.api/current", jobs));

        let ids: Vec<String> = client
            .list_my_jobs()
            .unwrap()
            .into_iter()
            .map(|job| job.id.to_string())
            .collect();

        assert_eq!(ids, vec!["J1", "J2"]);
    }

    #[test]
    fn list_tasks_requests_job_detail() {
        let detail = r"<Response>
            <Status>OK</Status>
            <Job><ID>J1</ID><Tasks><Task><ID>100</ID><Name>Design</Name></Task></Tasks></Job>
        </Response>";
        let client = connect(StubTransport::new().with_ok("job.api/get/J1", detail));

        let tasks = client.list_tasks(&JobId::new("J1").unwrap()).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Design");
    }

    #[test]
    fn list_times_filters_to_caller_and_sends_single_day_range() {
        let times = r"<Response>
            <Status>OK</Status>
            <Times>
                <Time><Staff><ID>1</ID></Staff><Date>2024-01-05T00:00:00</Date><Minutes>30</Minutes></Time>
                <Time><Staff><ID>2</ID></Staff><Date>2024-01-05T00:00:00</Date><Minutes>45</Minutes></Time>
            </Times>
        </Response>";
        let client = connect(StubTransport::new().with_ok("time.api/list", times));

        let entries = client.list_times_for_date(day(2024, 1, 5)).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].minutes, 45);
        let requests = client.api().transport().requests();
        let list = requests.last().unwrap();
        assert_eq!(list.param("from"), Some("20240105"));
        assert_eq!(list.param("to"), Some("20240105"));
    }

    #[test]
    fn error_status_never_reaches_the_caller() {
        let error = "<Response><Status>ERROR</Status><ErrorDescription>Nope</ErrorDescription></Response>";
        let client = connect(StubTransport::new().with_ok("job.api/current", error));

        let err = client.list_my_jobs().unwrap_err();

        assert!(matches!(err, ApiError::Status { ref status, .. } if status == "ERROR"));
    }

    #[test]
    fn non_success_http_status_is_a_transport_error() {
        let client = connect(StubTransport::new().with_response("job.api/current", 401, "denied"));

        let err = client.list_my_jobs().unwrap_err();

        assert!(matches!(err, ApiError::Transport { status: 401, .. }));
    }

    #[test]
    fn submit_posts_timesheet_document() {
        let client = connect(
            StubTransport::new().with_ok("time.api/add", "<Response><Status>OK</Status></Response>"),
        );
        let submission = TimesheetSubmission {
            job_id: JobId::new("J1").unwrap(),
            task_id: wfm_core::TaskId::new("100").unwrap(),
            staff_id: client.my_id().clone(),
            date: day(2024, 1, 5),
            minutes: 90,
            note: "met client".to_string(),
        };

        client.submit(&submission).unwrap();

        let requests = client.api().transport().requests();
        let add = requests.last().unwrap();
        assert_eq!(add.method, Method::Post);
        assert_eq!(add.path, "time.api/add");
        let body = add.body.as_deref().unwrap();
        assert!(body.starts_with("<Timesheet>"));
        for element in [
            "<Job>J1</Job>",
            "<Task>100</Task>",
            "<Staff>2</Staff>",
            "<Date>20240105</Date>",
            "<Minutes>90</Minutes>",
            "<Note>met client</Note>",
        ] {
            assert!(body.contains(element), "{element} missing from {body}");
        }
    }

    #[test]
    fn debug_output_redacts_keys() {
        let client = connect(StubTransport::new());
        let debug = format!("{client:?}");
        assert!(!debug.contains("api-secret"));
        assert!(!debug.contains("account-secret"));
        assert!(debug.contains("bob@example.com"));
    }
}
