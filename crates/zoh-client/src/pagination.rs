//! Offset/limit pagination.
//!
//! Zoho list endpoints take `start` and `limit` and return a bare array with no
//! total count or continuation flag. The only exhaustion signal is a page that
//! comes back shorter than requested. When the total is an exact multiple of
//! the page size one extra, empty page is fetched before iteration stops.

use std::future::Future;
use std::marker::PhantomData;
use tracing::debug;
use zoh_core::Result;

/// Page size used when none (or zero) is given
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A single-page fetch operation.
///
/// Implemented for any `Fn(offset, limit) -> Future<Output = Result<Vec<T>>>`.
pub trait PageSource<T> {
    /// Fetch up to `limit` items starting at `offset`
    fn fetch_page(&self, offset: usize, limit: usize)
        -> impl Future<Output = Result<Vec<T>>> + Send;
}

impl<T, F, Fut> PageSource<T> for F
where
    F: Fn(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>> + Send,
{
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<T>>> + Send {
        self(offset, limit)
    }
}

/// Position of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Offset of the next page
    pub offset: usize,
    /// Items requested per page
    pub page_size: usize,
    /// Set once a short page was seen; never cleared
    pub exhausted: bool,
}

/// Drives a [`PageSource`] until it runs dry
pub struct PageIterator<T, S> {
    source: S,
    cursor: PageCursor,
    _item: PhantomData<fn() -> T>,
}

impl<T, S> PageIterator<T, S>
where
    S: PageSource<T>,
{
    /// Create an iterator; a `page_size` of zero means [`DEFAULT_PAGE_SIZE`]
    pub fn new(source: S, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            source,
            cursor: PageCursor {
                offset: 0,
                page_size,
                exhausted: false,
            },
            _item: PhantomData,
        }
    }

    /// Current cursor
    pub const fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Whether the last page has been seen
    pub const fn is_exhausted(&self) -> bool {
        self.cursor.exhausted
    }

    /// Fetch one page at `offset` without touching the cursor
    pub async fn fetch_page(&self, offset: usize) -> Result<Vec<T>> {
        self.source.fetch_page(offset, self.cursor.page_size).await
    }

    /// Fetch the page under the cursor and advance.
    ///
    /// Returns `None` once the iterator is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        if self.cursor.exhausted {
            return Ok(None);
        }

        let page = self.fetch_page(self.cursor.offset).await?;
        debug!(
            offset = self.cursor.offset,
            page_size = self.cursor.page_size,
            returned = page.len(),
            "fetched page"
        );

        if page.len() < self.cursor.page_size {
            self.cursor.exhausted = true;
        } else {
            self.cursor.offset += page.len();
        }

        Ok(Some(page))
    }

    /// Fetch every remaining page, in order.
    ///
    /// On error the items collected so far are dropped and the cursor stays on
    /// the failed page. An exhausted iterator yields an empty vector.
    pub async fn fetch_all(&mut self) -> Result<Vec<T>> {
        let mut results = Vec::new();
        while let Some(page) = self.next_page().await? {
            results.extend(page);
        }
        Ok(results)
    }
}

impl<T, S> std::fmt::Debug for PageIterator<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use zoh_core::ZohError;

    /// In-memory source recording every call as (offset, limit, returned)
    struct VecSource {
        items: Vec<u32>,
        calls: Mutex<Vec<(usize, usize, usize)>>,
        fail_at: Option<usize>,
    }

    impl VecSource {
        fn new(total: u32) -> Self {
            Self {
                items: (0..total).collect(),
                calls: Mutex::new(Vec::new()),
                fail_at: None,
            }
        }

        fn calls(&self) -> Vec<(usize, usize, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PageSource<u32> for VecSource {
        fn fetch_page(
            &self,
            offset: usize,
            limit: usize,
        ) -> impl Future<Output = Result<Vec<u32>>> + Send {
            let outcome = if self.fail_at == Some(offset) {
                Err(ZohError::Http("boom".into()))
            } else {
                let page: Vec<u32> = self.items.iter().skip(offset).take(limit).copied().collect();
                self.calls.lock().unwrap().push((offset, limit, page.len()));
                Ok(page)
            };
            async move { outcome }
        }
    }

    #[tokio::test]
    async fn test_fetch_all_partial_last_page() {
        let source = VecSource::new(120);
        let mut pages = PageIterator::new(
            |offset: usize, limit: usize| source.fetch_page(offset, limit),
            50,
        );

        let items = pages.fetch_all().await.unwrap();

        assert_eq!(items, (0..120).collect::<Vec<_>>());
        assert_eq!(source.calls(), vec![(0, 50, 50), (50, 50, 50), (100, 50, 20)]);
        assert!(pages.is_exhausted());
    }

    #[tokio::test]
    async fn test_exact_multiple_fetches_trailing_empty_page() {
        let source = VecSource::new(100);
        let mut pages = PageIterator::new(source, 50);

        let items = pages.fetch_all().await.unwrap();

        assert_eq!(items.len(), 100);
        assert_eq!(
            pages.source.calls(),
            vec![(0, 50, 50), (50, 50, 50), (100, 50, 0)]
        );
    }

    #[tokio::test]
    async fn test_zero_page_size_defaults() {
        let pages = PageIterator::new(VecSource::new(10), 0);
        assert_eq!(pages.cursor().page_size, DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_fetch_page_is_single_call_through() {
        let source = VecSource::new(30);
        let pages = PageIterator::new(
            |offset: usize, limit: usize| source.fetch_page(offset, limit),
            10,
        );

        assert_eq!(pages.fetch_page(20).await.unwrap(), (20..30).collect::<Vec<_>>());
        assert_eq!(source.calls(), vec![(20, 10, 10)]);
        assert_eq!(pages.cursor().offset, 0);
    }

    #[tokio::test]
    async fn test_exhausted_iterator_is_terminal() {
        let source = VecSource::new(5);
        let mut pages = PageIterator::new(
            |offset: usize, limit: usize| source.fetch_page(offset, limit),
            10,
        );

        assert_eq!(pages.fetch_all().await.unwrap().len(), 5);
        assert!(pages.fetch_all().await.unwrap().is_empty());
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_error_stops_traversal() {
        let mut source = VecSource::new(200);
        source.fail_at = Some(100);
        let mut pages = PageIterator::new(source, 50);

        let err = pages.fetch_all().await.unwrap_err();
        assert!(matches!(err, ZohError::Http(_)));
        assert_eq!(pages.cursor().offset, 100);
        assert!(!pages.is_exhausted());
    }
}
