//! A headless controller for sortable, incrementally paginated data lists.
//!
//! For an async driver that talks to a network client, see the `datalist-adapter` crate.
//!
//! This crate owns the list state (column registry, row buffer, sort state, fetch window) and
//! the rules that keep it consistent: one fetch in flight at a time, stale responses discarded
//! by generation, pagination that stops once the backend runs dry, and two sorting strategies
//! (reorder loaded rows locally, or re-query the backend).
//!
//! It is UI- and transport-agnostic. A host is expected to:
//! - perform the fetches described by [`FetchTicket`]s and hand the results back
//! - apply [`RenderInstruction`]s to whatever surface it draws on
//! - forward header activations and near-end scroll signals
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod collate;
mod column;
mod controller;
mod error;
mod key;
mod options;
mod pagination;
mod render;
mod sort;
mod state;
mod types;
mod value;

#[cfg(test)]
mod tests;

pub use collate::compare_strings;
pub use column::{CellRenderer, ColumnDescriptor, ColumnRegistry, HeaderCell};
pub use controller::{ListController, LoadErrorObserver, ObserverId, Resolution};
pub use error::{ConfigError, LoadError};
pub use options::{DEFAULT_WINDOW_SIZE, ListOptions};
pub use pagination::{FetchKind, FetchTicket, Pagination};
pub use render::{RenderInstruction, ViewSurface};
pub use sort::{
    LocalSort, RemoteSort, SortEffect, SortStrategy, compare_numbers, compare_values, sort_rows,
};
pub use state::{ListPhase, ListSnapshot};
pub use types::{FetchRequest, RenderFragment, SortMode, SortOrder, SortSpec, SortType};
pub use value::{Row, Value};
