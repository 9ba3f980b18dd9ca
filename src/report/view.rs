use std::ops::RangeInclusive;

use tracing::debug;

use super::page::{Page, paginate};
use super::query::{Query, reconcile};
use super::{StudentSource, apply_filter};
use crate::error::Result;
use crate::model::Student;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Page state of the vaccination report.
///
/// All changes go through [`ReportView::dispatch`]. A failed fetch leaves
/// the previous query and rows untouched.
pub struct ReportView<S> {
    source: S,
    query: Query,
    rows: Vec<Student>,
    page_size: usize,
}

impl<S: StudentSource> ReportView<S> {
    /// Opens the report on all drives, page 0.
    pub async fn open(source: S, page_size: usize) -> Result<Self> {
        Self::open_at(source, page_size, Query::default()).await
    }

    /// Opens the report directly on `query` with a single fetch.
    pub async fn open_at(source: S, page_size: usize, query: Query) -> Result<Self> {
        let rows = apply_filter(&source, query.drive_id).await?;
        Ok(Self {
            source,
            query,
            rows,
            page_size,
        })
    }

    pub async fn dispatch(&mut self, next: Query) -> Result<()> {
        let (applied, fetch) = reconcile(&self.query, next);
        if let Some(filter) = fetch {
            self.rows = apply_filter(&self.source, filter.drive_id).await?;
        }
        debug!(drive_id = ?applied.drive_id, page = applied.page, "Report query applied");
        self.query = applied;
        Ok(())
    }

    pub async fn select_drive(&mut self, drive_id: Option<i64>) -> Result<()> {
        self.dispatch(self.query.with_drive(drive_id)).await
    }

    pub async fn select_page(&mut self, page: usize) -> Result<()> {
        self.dispatch(self.query.with_page(page)).await
    }

    pub fn query(&self) -> Query {
        self.query
    }

    pub fn page(&self) -> Page<'_, Student> {
        paginate(&self.rows, self.query.page, self.page_size)
    }

    /// The whole filtered list; exports use this, not the visible page.
    pub fn rows(&self) -> &[Student] {
        &self.rows
    }

    /// 1-based page button labels.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.page().page_count
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
