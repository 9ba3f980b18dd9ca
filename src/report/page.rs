/// One visible page of a list.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_count: usize,
}

/// Slices page `page_index` (0-based) out of `items`.
///
/// `page_count` is `ceil(len / page_size)`. A page past the end is empty
/// rather than clamped, and an empty list or a zero page size has no pages.
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> Page<'_, T> {
    if page_size == 0 || items.is_empty() {
        return Page {
            items: &[],
            page_count: 0,
        };
    }

    let page_count = items.len().div_ceil(page_size);
    let start = page_index.saturating_mul(page_size);
    let items = if start >= items.len() {
        &items[..0]
    } else {
        let end = start.saturating_add(page_size).min(items.len());
        &items[start..end]
    };

    Page { items, page_count }
}
