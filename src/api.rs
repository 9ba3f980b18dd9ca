//! Client for the vaccination backend's fixed REST contract.
//!
//! [`ApiClient`] does not know about credentials: build it over a
//! [`Bearer`](crate::fetch::auth::Bearer)-wrapped transport and every call
//! it makes is authenticated. [`login`] is the one unauthenticated call.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{ConsoleError, Result};
use crate::fetch::{HttpClient, fetch_bytes};
use crate::model::{
    Credentials, Drive, DrivePayload, EnrollmentPayload, Student, StudentPayload,
};
use crate::parser::{parse_list, parse_login};

/// Backend collections the console reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Students,
    Drives,
    Enrollments,
    Dashboard,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Students => "student",
            Resource::Drives => "vaccination drive",
            Resource::Enrollments => "enrollment",
            Resource::Dashboard => "dashboard",
        }
    }

    fn list_path(self) -> Option<&'static str> {
        match self {
            Resource::Students => Some("api/Student/list"),
            Resource::Drives => Some("api/VaccinationDrive/list"),
            Resource::Dashboard => Some("dashboard/list"),
            Resource::Enrollments => None,
        }
    }

    fn submit_path(self) -> Option<&'static str> {
        match self {
            Resource::Students => Some("api/Student/insertupdate"),
            Resource::Drives => Some("api/VaccinationDrive/insertupdate"),
            Resource::Enrollments => Some("api/VaccinationStudentMapper/insertupdate"),
            Resource::Dashboard => None,
        }
    }
}

/// Remote student filter. The backend does the filtering; the client only
/// sends `isFilterApplied=true&vaccinationDriveId=<id>`, with an empty id
/// meaning "all drives".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub drive_id: Option<i64>,
}

impl StudentFilter {
    pub fn drive(drive_id: Option<i64>) -> Self {
        Self { drive_id }
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("isFilterApplied", "true".to_string()),
            (
                "vaccinationDriveId",
                self.drive_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

fn endpoint(base: &str, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path);
    raw.parse()
        .map_err(|e| ConsoleError::Config(format!("invalid endpoint URL `{raw}`: {e}")))
}

fn json_request(method: Method, url: Url, payload: &impl Serialize) -> Result<Request> {
    let body = serde_json::to_vec(payload)
        .map_err(|e| ConsoleError::RequestFailed(format!("failed to encode request: {e}")))?;
    let mut req = Request::new(method, url);
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *req.body_mut() = Some(body.into());
    Ok(req)
}

/// Exchanges a username and password for an access token.
///
/// # Errors
///
/// [`ConsoleError::ValidationMissing`] for an empty username or password,
/// [`ConsoleError::InvalidCredentials`] when the backend answers
/// `data: null` or HTTP 401, [`ConsoleError::RequestFailed`] for transport failures.
#[tracing::instrument(skip(http, credentials), fields(user = %credentials.user_name))]
pub async fn login<C: HttpClient + ?Sized>(
    http: &C,
    api_base: &str,
    credentials: &Credentials,
) -> Result<String> {
    credentials.validate()?;
    let req = json_request(Method::POST, endpoint(api_base, "api/Login/search")?, credentials)?;
    // No token is involved here; a 401 from this endpoint rejects the credentials.
    let body = fetch_bytes(http, req).await.map_err(|e| match e {
        ConsoleError::Unauthenticated => ConsoleError::InvalidCredentials,
        other => other,
    })?;
    let token = parse_login(&body)?;
    info!("Login succeeded");
    Ok(token)
}

pub struct ApiClient<C> {
    http: C,
    api_base: String,
    dashboard_base: String,
}

impl<C: HttpClient> ApiClient<C> {
    /// `dashboard_base` serves `/dashboard/list`; every other endpoint lives
    /// under `api_base`.
    pub fn new(http: C, api_base: impl Into<String>, dashboard_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            dashboard_base: dashboard_base.into(),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    fn base_for(&self, resource: Resource) -> &str {
        match resource {
            Resource::Dashboard => &self.dashboard_base,
            _ => &self.api_base,
        }
    }

    /// Fetches every record of `resource`, optionally narrowed by a remote
    /// student filter.
    #[tracing::instrument(skip(self), fields(resource = resource.name()))]
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        filter: Option<&StudentFilter>,
    ) -> Result<Vec<T>> {
        let path = resource.list_path().ok_or_else(|| {
            ConsoleError::Config(format!("{} cannot be listed", resource.name()))
        })?;
        let mut url = endpoint(self.base_for(resource), path)?;
        if let Some(f) = filter {
            url.query_pairs_mut().extend_pairs(f.query_pairs());
        }

        let body = fetch_bytes(&self.http, Request::new(Method::GET, url)).await?;
        let items = parse_list(&body, resource.name())?;
        debug!(count = items.len(), "List fetched");
        Ok(items)
    }

    /// Posts `payload` to the resource's insert/update endpoint.
    #[tracing::instrument(skip(self, payload), fields(resource = resource.name()))]
    pub async fn submit<P: Serialize + Sync>(&self, resource: Resource, payload: &P) -> Result<()> {
        let path = resource.submit_path().ok_or_else(|| {
            ConsoleError::Config(format!("{} is read-only", resource.name()))
        })?;
        let req = json_request(Method::POST, endpoint(self.base_for(resource), path)?, payload)?;
        fetch_bytes(&self.http, req).await?;
        info!("Submission accepted");
        Ok(())
    }

    pub async fn list_students(&self, filter: Option<&StudentFilter>) -> Result<Vec<Student>> {
        self.fetch_list(Resource::Students, filter).await
    }

    pub async fn list_drives(&self) -> Result<Vec<Drive>> {
        self.fetch_list(Resource::Drives, None).await
    }

    pub async fn dashboard_drives(&self) -> Result<Vec<Drive>> {
        self.fetch_list(Resource::Dashboard, None).await
    }

    pub async fn submit_student(&self, payload: &StudentPayload) -> Result<()> {
        self.submit(Resource::Students, payload).await
    }

    pub async fn submit_drive(&self, payload: &DrivePayload) -> Result<()> {
        self.submit(Resource::Drives, payload).await
    }

    pub async fn enroll(&self, payload: &EnrollmentPayload) -> Result<()> {
        self.submit(Resource::Enrollments, payload).await
    }
}
