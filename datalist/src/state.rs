use crate::{Row, SortMode, SortSpec};

/// Where the list controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListPhase {
    /// No rows and nothing in flight.
    Idle,
    /// First page in flight.
    Loading,
    /// Rows present, more may be available.
    Ready,
    /// Next page in flight; previous rows stay visible.
    LoadingMore,
    /// All rows loaded (possibly none). Left only through a sort or reset.
    ReadyExhausted,
}

/// A read-only view of the list state.
///
/// With `feature = "serde"`, this type implements `Serialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListSnapshot<'a> {
    pub rows: &'a [Row],
    pub sort: Option<&'a SortSpec>,
    pub mode: SortMode,
    pub phase: ListPhase,
    pub loading: bool,
    pub exhausted: bool,
    pub window_start: usize,
    pub window_size: usize,
    pub generation: u64,
}

impl ListSnapshot<'_> {
    /// The backend definitively has no rows: the surface should show its empty placeholder.
    pub fn is_empty_state(&self) -> bool {
        self.rows.is_empty() && self.exhausted && !self.loading
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
