use std::cell::RefCell;
use std::future::Future;

use datalist::{ColumnRegistry, FetchRequest, LoadError, Row, sort_rows};

/// The transport that fetches pages for a list.
///
/// Requests are reads: issuing the same request twice must not change the backend. An empty
/// vector is a valid response meaning "no more rows". Timeouts and retries, if any, belong here.
pub trait NetworkClient {
    fn fetch_page(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<Vec<Row>, LoadError>>;
}

impl<C: NetworkClient + ?Sized> NetworkClient for &C {
    fn fetch_page(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<Vec<Row>, LoadError>> {
        (**self).fetch_page(request)
    }
}

/// An in-memory backend that honours window and sort parameters.
///
/// Sorting uses the same comparators as local sorting, with sort types looked up in `registry`.
/// Every request is recorded, and a failure can be queued for the next fetch.
#[derive(Debug)]
pub struct MemoryClient {
    registry: ColumnRegistry,
    rows: Vec<Row>,
    requests: RefCell<Vec<FetchRequest>>,
    next_failure: RefCell<Option<LoadError>>,
}

impl MemoryClient {
    pub fn new(registry: ColumnRegistry, rows: Vec<Row>) -> Self {
        Self {
            registry,
            rows,
            requests: RefCell::new(Vec::new()),
            next_failure: RefCell::new(None),
        }
    }

    /// Every request served so far, oldest first.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }

    /// Makes the next fetch fail with `error`.
    pub fn fail_next(&self, error: LoadError) {
        *self.next_failure.borrow_mut() = Some(error);
    }

    fn serve(&self, request: &FetchRequest) -> Result<Vec<Row>, LoadError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(error) = self.next_failure.borrow_mut().take() {
            return Err(error);
        }

        let start = request.offset.min(self.rows.len());
        let end = request.end().min(self.rows.len());
        let Some(sort) = &request.sort else {
            return Ok(self.rows[start..end].to_vec());
        };
        let Some(sort_type) = self.registry.sort_type_of(&sort.field) else {
            return Err(LoadError::rejected(format!(
                "cannot sort by `{}`",
                sort.field
            )));
        };
        let mut sorted = self.rows.clone();
        sort_rows(&mut sorted, &sort.field, sort_type, sort.order);
        sorted.truncate(end);
        Ok(sorted.split_off(start))
    }
}

impl NetworkClient for MemoryClient {
    async fn fetch_page(&self, request: FetchRequest) -> Result<Vec<Row>, LoadError> {
        self.serve(&request)
    }
}
