use alloc::vec::Vec;

use crate::{ColumnDescriptor, SortMode, SortSpec};

/// Rows requested per page unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: usize = 30;

/// Configuration for [`crate::ListController`].
///
/// Cheap to clone: cell renderers are stored in `Arc`s.
#[derive(Clone, Debug)]
pub struct ListOptions {
    pub columns: Vec<ColumnDescriptor>,
    pub mode: SortMode,
    /// Rows per fetch. Must be non-zero.
    pub window_size: usize,
    /// Sort in effect before the first user interaction.
    ///
    /// Sent with the first fetch; in local mode it is also applied to every replacing load.
    pub initial_sort: Option<SortSpec>,
}

impl ListOptions {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            mode: SortMode::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            initial_sort: None,
        }
    }

    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_initial_sort(mut self, initial_sort: Option<SortSpec>) -> Self {
        self.initial_sort = initial_sort;
        self
    }
}
