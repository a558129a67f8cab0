use std::cell::{Ref, RefCell, RefMut};

use datalist::{
    ConfigError, FetchTicket, ListController, ListOptions, LoadError, ObserverId, Resolution,
    SortOrder, ViewSurface,
};

use crate::NetworkClient;

/// An input signal emitted by the view surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSignal {
    HeaderActivated(String),
    ScrollNearEnd,
}

/// An async driver that wraps a `datalist::ListController` and performs its fetches.
///
/// The driver is single-threaded and cooperative: operations take `&self`, and the controller
/// is only borrowed between suspension points, never across an `.await`. Several operations can
/// therefore be in flight at once (e.g. a scroll-triggered load and a sort joined on the same
/// executor); the controller decides which responses still apply.
#[derive(Debug)]
pub struct ListDriver<C, V> {
    client: C,
    controller: RefCell<ListController<V>>,
    /// Observers whose subscription was dropped while the controller was borrowed.
    released: RefCell<Vec<ObserverId>>,
}

impl<C: NetworkClient, V: ViewSurface> ListDriver<C, V> {
    pub fn new(client: C, controller: ListController<V>) -> Self {
        Self {
            client,
            controller: RefCell::new(controller),
            released: RefCell::new(Vec::new()),
        }
    }

    pub fn with_options(client: C, options: ListOptions, view: V) -> Result<Self, ConfigError> {
        Ok(Self::new(client, ListController::new(options, view)?))
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Borrows the controller. Do not hold the guard across an `.await` on this driver.
    pub fn controller(&self) -> Ref<'_, ListController<V>> {
        if !self.released.borrow().is_empty() {
            if let Ok(mut controller) = self.controller.try_borrow_mut() {
                self.purge_released(&mut controller);
            }
        }
        self.controller.borrow()
    }

    pub fn into_controller(self) -> ListController<V> {
        let mut controller = self.controller.into_inner();
        for id in self.released.into_inner() {
            controller.remove_observer(id);
        }
        controller
    }

    fn controller_mut(&self) -> RefMut<'_, ListController<V>> {
        let mut controller = self.controller.borrow_mut();
        self.purge_released(&mut controller);
        controller
    }

    fn purge_released(&self, controller: &mut ListController<V>) {
        for id in self.released.take() {
            controller.remove_observer(id);
        }
    }

    /// Loads the first page (or starts over from it).
    pub async fn initialize(&self) -> Resolution {
        let ticket = self.controller_mut().initialize();
        self.run(ticket).await
    }

    /// Sorts the list. Returns `None` when no fetch was needed: local sorts, and sorts on
    /// unknown or unsortable columns.
    pub async fn sort(&self, column_id: &str, order: SortOrder) -> Option<Resolution> {
        let ticket = self.controller_mut().sort(column_id, order)?;
        Some(self.run(ticket).await)
    }

    pub async fn header_activated(&self, column_id: &str) -> Option<Resolution> {
        let ticket = self.controller_mut().on_header_activated(column_id)?;
        Some(self.run(ticket).await)
    }

    /// Loads the next page unless one is in flight or the list is exhausted.
    pub async fn scroll_near_end(&self) -> Option<Resolution> {
        let ticket = self.controller_mut().on_scroll_near_end()?;
        Some(self.run(ticket).await)
    }

    /// Routes a view signal to the matching operation.
    pub async fn dispatch(&self, signal: InputSignal) -> Option<Resolution> {
        atrace!(signal = ?signal, "ListDriver::dispatch");
        match signal {
            InputSignal::HeaderActivated(column_id) => self.header_activated(&column_id).await,
            InputSignal::ScrollNearEnd => self.scroll_near_end().await,
        }
    }

    pub fn reset(&self) {
        self.controller_mut().reset();
    }

    /// Registers a load-error callback for as long as the returned subscription lives.
    pub fn observe_load_errors(
        &self,
        observer: impl Fn(&LoadError) + Send + Sync + 'static,
    ) -> Subscription<'_, V> {
        let id = self.controller_mut().observe_load_errors(observer);
        Subscription {
            controller: &self.controller,
            released: &self.released,
            id: Some(id),
        }
    }

    /// Tears the list down. Fetches still in flight are discarded when they resolve.
    pub fn destroy(&self) {
        self.controller_mut().destroy();
    }

    async fn run(&self, ticket: FetchTicket) -> Resolution {
        adebug!(
            generation = ticket.generation(),
            kind = ?ticket.kind(),
            offset = ticket.request().offset,
            limit = ticket.request().limit,
            "ListDriver: fetching page"
        );
        let result = self.client.fetch_page(ticket.request().clone()).await;
        let resolution = self.controller_mut().resolve(ticket, result);
        atrace!(resolution = ?resolution, "ListDriver: resolved");
        resolution
    }
}

/// A load-error observer registration scoped to a driver. Dropping it unregisters the observer.
#[must_use = "dropping a subscription unregisters its observer"]
pub struct Subscription<'a, V: ViewSurface> {
    controller: &'a RefCell<ListController<V>>,
    released: &'a RefCell<Vec<ObserverId>>,
    id: Option<ObserverId>,
}

impl<V: ViewSurface> Subscription<'_, V> {
    pub fn id(&self) -> Option<ObserverId> {
        self.id
    }

    /// Keeps the observer registered for the controller's lifetime.
    pub fn detach(mut self) -> Option<ObserverId> {
        self.id.take()
    }
}

impl<V: ViewSurface> Drop for Subscription<'_, V> {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        // While the controller is borrowed, the driver removes the observer on its next access.
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                controller.remove_observer(id);
            }
            Err(_) => self.released.borrow_mut().push(id),
        }
    }
}
