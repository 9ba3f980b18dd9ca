//! Vaccination report: remote filtering, pagination and page state.

mod page;
mod query;
mod view;

pub use page::{Page, paginate};
pub use query::{Query, reconcile};
pub use view::{DEFAULT_PAGE_SIZE, ReportView};

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ApiClient, StudentFilter};
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::model::Student;

/// Where report rows come from. The backend applies the filter.
#[async_trait]
pub trait StudentSource: Send + Sync {
    async fn fetch_students(&self, filter: &StudentFilter) -> Result<Vec<Student>>;
}

#[async_trait]
impl<C: HttpClient> StudentSource for ApiClient<C> {
    async fn fetch_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        self.list_students(Some(filter)).await
    }
}

/// Students enrolled in `drive_id`, or every student when no drive is
/// selected. Always a fresh fetch; rows are never filtered locally.
pub async fn apply_filter<S: StudentSource + ?Sized>(
    source: &S,
    drive_id: Option<i64>,
) -> Result<Vec<Student>> {
    let students = source.fetch_students(&StudentFilter::drive(drive_id)).await?;
    debug!(?drive_id, count = students.len(), "Report rows fetched");
    Ok(students)
}
