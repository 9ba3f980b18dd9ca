use crate::api::StudentFilter;

/// What the report is showing: the selected drive (if any) and the
/// 0-based page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query {
    pub drive_id: Option<i64>,
    pub page: usize,
}

impl Query {
    pub fn with_drive(self, drive_id: Option<i64>) -> Self {
        Query { drive_id, ..self }
    }

    pub fn with_page(self, page: usize) -> Self {
        Query { page, ..self }
    }
}

/// Decides the query to apply and whether rows must be re-fetched.
///
/// A different drive resets the page to 0 and yields the filter to fetch
/// with; a page-only change never fetches.
pub fn reconcile(current: &Query, next: Query) -> (Query, Option<StudentFilter>) {
    if next.drive_id != current.drive_id {
        let applied = Query {
            drive_id: next.drive_id,
            page: 0,
        };
        (applied, Some(StudentFilter::drive(next.drive_id)))
    } else {
        (next, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_change_resets_page_and_fetches() {
        let current = Query {
            drive_id: None,
            page: 3,
        };
        let (applied, fetch) = reconcile(&current, current.with_drive(Some(4)));

        assert_eq!(
            applied,
            Query {
                drive_id: Some(4),
                page: 0
            }
        );
        assert_eq!(fetch, Some(StudentFilter::drive(Some(4))));
    }

    #[test]
    fn test_clearing_filter_fetches_all() {
        let current = Query {
            drive_id: Some(4),
            page: 1,
        };
        let (applied, fetch) = reconcile(&current, current.with_drive(None));
        assert_eq!(applied.page, 0);
        assert_eq!(fetch, Some(StudentFilter::drive(None)));
    }

    #[test]
    fn test_page_change_does_not_fetch() {
        let current = Query {
            drive_id: Some(4),
            page: 0,
        };
        let (applied, fetch) = reconcile(&current, current.with_page(2));
        assert_eq!(applied.page, 2);
        assert_eq!(fetch, None);
    }

    #[test]
    fn test_same_drive_with_new_page_keeps_page() {
        let current = Query {
            drive_id: Some(4),
            page: 0,
        };
        let next = Query {
            drive_id: Some(4),
            page: 5,
        };
        assert_eq!(reconcile(&current, next), (next, None));
    }
}
