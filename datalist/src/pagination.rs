use crate::{FetchRequest, SortSpec};

/// Which load a fetch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchKind {
    /// First page; replaces the row buffer.
    Initial,
    /// Next page; appends to the row buffer.
    More,
}

/// A fetch handed out by the controller.
///
/// The host performs `request()` against its network client and passes the ticket back to
/// [`crate::ListController::resolve`] with the outcome. Tickets from a superseded generation are
/// discarded on resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    kind: FetchKind,
    request: FetchRequest,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

/// Fetch window bookkeeping.
///
/// `window_start` is the offset of the next page to request. It returns to 0 whenever the list
/// starts over, and `exhausted` is cleared with it.
#[derive(Clone, Debug)]
pub struct Pagination {
    window_start: usize,
    window_size: usize,
    exhausted: bool,
    generation: u64,
    in_flight: Option<FetchKind>,
}

impl Pagination {
    pub(crate) fn new(window_size: usize) -> Self {
        Self {
            window_start: 0,
            window_size,
            exhausted: false,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<FetchKind> {
        self.in_flight
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts over from the first page. Any fetch still in flight becomes stale.
    pub(crate) fn begin_initial(&mut self, sort: Option<SortSpec>) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.window_start = 0;
        self.exhausted = false;
        self.in_flight = Some(FetchKind::Initial);
        ltrace!(
            generation = self.generation,
            limit = self.window_size,
            "Pagination::begin_initial"
        );
        FetchTicket {
            generation: self.generation,
            kind: FetchKind::Initial,
            request: FetchRequest {
                offset: 0,
                limit: self.window_size,
                sort,
            },
        }
    }

    /// Requests the next window, unless a fetch is in flight, the data is exhausted or nothing
    /// has been loaded yet.
    pub(crate) fn begin_more(&mut self, loaded: usize, sort: Option<SortSpec>) -> Option<FetchTicket> {
        if self.in_flight.is_some() || self.exhausted || loaded == 0 {
            ltrace!(
                loading = self.in_flight.is_some(),
                exhausted = self.exhausted,
                loaded,
                "Pagination::begin_more skipped"
            );
            return None;
        }
        self.in_flight = Some(FetchKind::More);
        ltrace!(
            generation = self.generation,
            offset = self.window_start,
            limit = self.window_size,
            "Pagination::begin_more"
        );
        Some(FetchTicket {
            generation: self.generation,
            kind: FetchKind::More,
            request: FetchRequest {
                offset: self.window_start,
                limit: self.window_size,
                sort,
            },
        })
    }

    /// Whether `ticket` is the fetch currently in flight.
    pub(crate) fn accepts(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.in_flight == Some(ticket.kind)
    }

    /// Records a successful page of `received` rows.
    pub(crate) fn finish_success(&mut self, received: usize) {
        self.in_flight = None;
        self.window_start = self.window_start.saturating_add(self.window_size);
        if received < self.window_size {
            self.exhausted = true;
        }
    }

    /// Clears the in-flight fetch and leaves the window untouched so the same page can be retried.
    pub(crate) fn finish_failure(&mut self) {
        self.in_flight = None;
    }

    /// Back to the first page with nothing in flight. Any fetch still in flight becomes stale.
    pub(crate) fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.window_start = 0;
        self.exhausted = false;
        self.in_flight = None;
    }
}
