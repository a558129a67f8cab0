use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::pagination::Pagination;
use crate::render::RenderEmitter;
use crate::sort::{SortEffect, SortStrategy, sort_rows};
use crate::{
    ColumnRegistry, ConfigError, FetchKind, FetchTicket, ListOptions, ListPhase, ListSnapshot,
    LoadError, Row, SortMode, SortOrder, SortSpec, ViewSurface,
};

/// A callback invoked with every load failure the controller applies.
pub type LoadErrorObserver = Arc<dyn Fn(&LoadError) + Send + Sync>;

/// Handle returned by [`ListController::observe_load_errors`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Outcome of [`ListController::resolve`].
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A first page replaced the row buffer, which now holds `rows` rows.
    Replaced { rows: usize },
    /// An incremental page added `rows` rows (possibly zero).
    Appended { rows: usize },
    /// The ticket was superseded by a later sort, reset or reload; nothing changed.
    Stale,
    /// The fetch failed. State is back to what it was before the fetch was issued.
    Failed(LoadError),
}

impl Resolution {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Replaced { .. } | Self::Appended { .. })
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// A headless controller for a sortable, incrementally loaded list.
///
/// The controller never performs I/O. Operations that need data return a [`FetchTicket`]; the
/// host fetches `ticket.request()` and hands the outcome back through [`Self::resolve`]. Every
/// state change is pushed to the [`ViewSurface`] as a [`crate::RenderInstruction`].
///
/// All mutation happens through `&mut self`, so the controller is driven from a single logical
/// thread. Fetches still in flight when a sort, reset or reload starts over are tagged with an
/// older generation and are discarded when they resolve.
pub struct ListController<V> {
    registry: ColumnRegistry,
    rows: Vec<Row>,
    sort: Option<SortSpec>,
    strategy: &'static dyn SortStrategy,
    pagination: Pagination,
    emitter: RenderEmitter<V>,
    observers: Vec<(ObserverId, LoadErrorObserver)>,
    next_observer: u64,
}

impl<V: ViewSurface> ListController<V> {
    /// Validates `options` and creates an idle controller rendering into `view`.
    pub fn new(options: ListOptions, view: V) -> Result<Self, ConfigError> {
        let ListOptions {
            columns,
            mode,
            window_size,
            initial_sort,
        } = options;

        if window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        let registry = ColumnRegistry::new(columns)?;
        if let Some(sort) = &initial_sort {
            if !registry.is_sortable(&sort.field) {
                return Err(ConfigError::UnsortableInitialSort(sort.field.clone()));
            }
        }

        ldebug!(
            columns = registry.len(),
            mode = ?mode,
            window_size,
            "ListController::new"
        );

        Ok(Self {
            registry,
            rows: Vec::new(),
            sort: initial_sort,
            strategy: mode.strategy(),
            pagination: Pagination::new(window_size),
            emitter: RenderEmitter::new(view),
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn mode(&self) -> SortMode {
        self.strategy.mode()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pagination.is_exhausted()
    }

    pub fn view(&self) -> &V {
        self.emitter.surface()
    }

    pub fn view_mut(&mut self) -> &mut V {
        self.emitter.surface_mut()
    }

    pub fn into_view(self) -> V {
        self.emitter.into_surface()
    }

    pub fn phase(&self) -> ListPhase {
        match self.pagination.in_flight() {
            Some(FetchKind::Initial) => ListPhase::Loading,
            Some(FetchKind::More) => ListPhase::LoadingMore,
            None if self.pagination.is_exhausted() => ListPhase::ReadyExhausted,
            None if self.rows.is_empty() => ListPhase::Idle,
            None => ListPhase::Ready,
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<'_> {
        ListSnapshot {
            rows: &self.rows,
            sort: self.sort.as_ref(),
            mode: self.mode(),
            phase: self.phase(),
            loading: self.pagination.is_loading(),
            exhausted: self.pagination.is_exhausted(),
            window_start: self.pagination.window_start(),
            window_size: self.pagination.window_size(),
            generation: self.pagination.generation(),
        }
    }

    /// Loads the first page.
    ///
    /// From `Idle` this is the regular start. From any other phase the list starts over: rows
    /// already on the surface stay visible until the new first page arrives, and any fetch in
    /// flight becomes stale.
    pub fn initialize(&mut self) -> FetchTicket {
        ldebug!(phase = ?self.phase(), "ListController::initialize");
        self.begin_initial()
    }

    /// Sorts by `column_id`.
    ///
    /// Unknown and unsortable columns are ignored. Repeating the current sort is not skipped.
    /// In remote mode the returned ticket fetches the first page with the new sort.
    pub fn sort(&mut self, column_id: &str, order: SortOrder) -> Option<FetchTicket> {
        let Some(sort_type) = self.registry.sort_type_of(column_id) else {
            ldebug!(column_id, "ListController::sort: unknown or unsortable column");
            return None;
        };
        ldebug!(column_id, order = %order, mode = ?self.mode(), "ListController::sort");
        self.sort = Some(SortSpec::new(column_id, order));

        // A first page already in flight is sorted on arrival.
        if self.mode() == SortMode::Local
            && self.pagination.in_flight() == Some(FetchKind::Initial)
        {
            return None;
        }

        match self
            .strategy
            .apply(&mut self.rows, column_id, sort_type, order)
        {
            SortEffect::Reordered => {
                self.emitter.replace_all(&self.rows);
                None
            }
            SortEffect::Requery => Some(self.begin_initial()),
        }
    }

    /// Header activation from the view: toggles the order the way a header click does.
    pub fn on_header_activated(&mut self, column_id: &str) -> Option<FetchTicket> {
        let order = self.registry.next_order(column_id, self.sort.as_ref())?;
        self.sort(column_id, order)
    }

    /// The view scrolled near the end of the list: loads the next page if possible.
    ///
    /// A no-op while a fetch is in flight, once exhausted, or before anything is loaded.
    pub fn on_scroll_near_end(&mut self) -> Option<FetchTicket> {
        let ticket = self
            .pagination
            .begin_more(self.rows.len(), self.sort.clone())?;
        self.emitter.set_loading(true);
        Some(ticket)
    }

    /// Clears rows, sort and window and returns to `Idle`. Fetches in flight become stale.
    pub fn reset(&mut self) {
        ldebug!("ListController::reset");
        self.rows.clear();
        self.sort = None;
        self.pagination.reset();
        self.emitter.replace_all(&self.rows);
        self.emitter.set_loading(false);
        self.emitter.set_exhausted(false);
    }

    /// Applies the outcome of a fetch issued as `ticket`.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Row>, LoadError>,
    ) -> Resolution {
        if !self.pagination.accepts(&ticket) {
            ldebug!(
                ticket_generation = ticket.generation(),
                generation = self.pagination.generation(),
                "ListController::resolve: discarding stale response"
            );
            return Resolution::Stale;
        }

        let page = match result {
            Ok(page) => page,
            Err(error) => return self.fail(ticket.kind(), error),
        };

        let received = page.len();
        self.pagination.finish_success(received);
        ltrace!(
            kind = ?ticket.kind(),
            received,
            exhausted = self.pagination.is_exhausted(),
            "ListController::resolve"
        );

        let resolution = match ticket.kind() {
            FetchKind::Initial => {
                self.rows = page;
                if let (Some(sort), SortMode::Local) = (&self.sort, self.mode()) {
                    if let Some(sort_type) = self.registry.sort_type_of(&sort.field) {
                        sort_rows(&mut self.rows, &sort.field, sort_type, sort.order);
                    }
                }
                self.emitter.replace_all(&self.rows);
                Resolution::Replaced {
                    rows: self.rows.len(),
                }
            }
            FetchKind::More => {
                self.rows.extend_from_slice(&page);
                self.emitter.append(page);
                Resolution::Appended { rows: received }
            }
        };

        self.emitter.set_loading(false);
        self.emitter
            .set_exhausted(self.pagination.is_exhausted());
        resolution
    }

    fn begin_initial(&mut self) -> FetchTicket {
        self.rows.clear();
        let ticket = self.pagination.begin_initial(self.sort.clone());
        self.emitter.set_exhausted(false);
        self.emitter.set_loading(true);
        ticket
    }

    fn fail(&mut self, kind: FetchKind, error: LoadError) -> Resolution {
        lwarn!(kind = ?kind, error = %error, "ListController: load failed");
        self.pagination.finish_failure();
        // A failed first page leaves the list idle; drop whatever the surface still shows.
        if kind == FetchKind::Initial && self.emitter.displayed() > 0 {
            self.emitter.replace_all(&self.rows);
        }
        self.emitter.set_loading(false);
        for (_, observer) in &self.observers {
            observer(&error);
        }
        Resolution::Failed(error)
    }

    /// Registers a callback for load failures. Remove it with [`Self::remove_observer`].
    pub fn observe_load_errors(
        &mut self,
        observer: impl Fn(&LoadError) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer = self.next_observer.wrapping_add(1);
        self.observers.push((id, Arc::new(observer)));
        id
    }

    /// Returns `true` if `id` was registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Tears the controller down: drops every observer and resets the list, so responses still
    /// in flight are discarded when they arrive.
    pub fn destroy(&mut self) {
        ldebug!(observers = self.observers.len(), "ListController::destroy");
        self.observers.clear();
        self.reset();
    }
}

impl<V: fmt::Debug> fmt::Debug for ListController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("registry", &self.registry)
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("strategy", &self.strategy)
            .field("pagination", &self.pagination)
            .field("view", self.emitter.surface())
            .field("observers", &self.observers.len())
            .finish()
    }
}
