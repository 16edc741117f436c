//! Offset pagination types
//!
//! [`QueryResults`] is the raw "content plus total" result of a single query.
//! [`Page`] is the shape handed to API clients, built from a [`PageRequest`].

use serde::{Deserialize, Serialize};

/// Default page size when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on page size
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Content of one page together with the total row count it was cut from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResults<T> {
    /// Total rows matching the query, ignoring offset and limit
    pub total: i64,
    /// Limit that was applied, if any
    pub limit: Option<i64>,
    /// Offset that was applied
    pub offset: i64,
    /// Rows on this page
    pub results: Vec<T>,
}

impl<T> QueryResults<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }.normalized()
    }

    /// Clamp sizes into `1..=MAX_PAGE_SIZE` and pages into the range whose
    /// offset fits in an `i64`
    pub fn normalized(self) -> Self {
        let size = self.size.clamp(1, MAX_PAGE_SIZE);
        Self {
            page: self.page.clamp(0, i64::MAX / size),
            size,
        }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// A page of results as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Build a page, running `count` only when the total cannot be inferred
    /// from the content itself.
    ///
    /// The total is implied on the first page when it came back short, and on
    /// any non-empty page that came back short (it is the last one).
    pub async fn assemble<F, Fut, E>(
        content: Vec<T>,
        request: PageRequest,
        count: F,
    ) -> Result<Self, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<i64, E>>,
    {
        let len = content.len() as i64;
        let offset = request.offset();

        if offset == 0 && len < request.size {
            return Ok(Self::new(content, request, len));
        }
        if len != 0 && len < request.size {
            return Ok(Self::new(content, request, offset.saturating_add(len)));
        }

        let total = count().await?;
        Ok(Self::new(content, request, total))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn block_on<F: Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(PageRequest::new(3, 10).offset(), 30);
        assert_eq!(PageRequest::new(-1, 0), PageRequest { page: 0, size: 1 });
        assert_eq!(PageRequest::new(0, 10_000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn huge_page_is_capped() {
        let request = PageRequest::new(i64::MAX / 1000, MAX_PAGE_SIZE);
        assert_eq!(request.page, i64::MAX / MAX_PAGE_SIZE);
        assert!(request.offset() > 0);

        let raw = PageRequest {
            page: i64::MAX,
            size: 2,
        };
        assert_eq!(raw.offset(), i64::MAX);
    }

    #[test]
    fn map_keeps_paging_fields() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 5).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2], PageRequest::new(0, 2), 5);
        assert_eq!(page.total_pages, 3);
        let empty: Page<i32> = Page::new(vec![], PageRequest::new(0, 2), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn short_first_page_skips_count() {
        let called = Cell::new(false);
        let flag = &called;
        let page = block_on(Page::assemble(vec![1, 2, 3], PageRequest::new(0, 10), move || async move {
            flag.set(true);
            Ok::<_, ()>(99)
        }))
        .unwrap();
        assert!(!called.get());
        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn short_last_page_infers_total() {
        let called = Cell::new(false);
        let flag = &called;
        let page = block_on(Page::assemble(vec![1], PageRequest::new(2, 2), move || async move {
            flag.set(true);
            Ok::<_, ()>(99)
        }))
        .unwrap();
        assert!(!called.get());
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn full_page_runs_count() {
        let page = block_on(Page::assemble(vec![1, 2], PageRequest::new(0, 2), || async {
            Ok::<_, ()>(7)
        }))
        .unwrap();
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn empty_page_past_the_end_runs_count() {
        let page = block_on(Page::assemble(Vec::<i32>::new(), PageRequest::new(5, 2), || async {
            Ok::<_, ()>(4)
        }))
        .unwrap();
        assert_eq!(page.total_elements, 4);
    }
}
