use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::key::ColumnIndexMap;
use crate::{ConfigError, RenderFragment, Row, SortOrder, SortSpec, SortType, Value};

/// Turns a raw cell value into a render fragment.
pub type CellRenderer = Arc<dyn Fn(&Value) -> RenderFragment + Send + Sync>;

/// Static description of one column.
#[derive(Clone)]
pub struct ColumnDescriptor {
    pub id: String,
    pub title: String,
    pub sortable: bool,
    pub sort_type: Option<SortType>,
    pub cell_renderer: Option<CellRenderer>,
}

impl ColumnDescriptor {
    /// Creates a non-sortable column.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sortable: false,
            sort_type: None,
            cell_renderer: None,
        }
    }

    /// Creates a sortable column compared as `sort_type`.
    pub fn sortable(id: impl Into<String>, title: impl Into<String>, sort_type: SortType) -> Self {
        Self {
            sortable: true,
            sort_type: Some(sort_type),
            ..Self::new(id, title)
        }
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_sort_type(mut self, sort_type: Option<SortType>) -> Self {
        self.sort_type = sort_type;
        self
    }

    pub fn with_cell_renderer(
        mut self,
        renderer: impl Fn(&Value) -> RenderFragment + Send + Sync + 'static,
    ) -> Self {
        self.cell_renderer = Some(Arc::new(renderer));
        self
    }

    /// Renders this column's cell for `row`.
    ///
    /// Without a cell renderer the value's display form is used; a missing key renders empty.
    pub fn render(&self, row: &Row) -> RenderFragment {
        let value = row.value(&self.id);
        match &self.cell_renderer {
            Some(renderer) => renderer(value),
            None => RenderFragment(value.to_string()),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("sort_type", &self.sort_type)
            .field(
                "cell_renderer",
                &self.cell_renderer.as_ref().map(|_| "Fn(..)"),
            )
            .finish()
    }
}

/// A header cell as the view layer needs it.
///
/// `order` is only set on the column the list is currently sorted by.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderCell {
    pub id: String,
    pub title: String,
    pub sortable: bool,
    pub order: Option<SortOrder>,
}

/// The validated, immutable set of columns.
#[derive(Clone, Debug)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDescriptor>,
    index: ColumnIndexMap,
}

impl ColumnRegistry {
    /// Validates `columns`: ids must be non-empty and unique, and every sortable column must
    /// declare a sort type.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, ConfigError> {
        let mut index = ColumnIndexMap::new();
        for (i, column) in columns.iter().enumerate() {
            if column.id.is_empty() {
                return Err(ConfigError::EmptyColumnId);
            }
            if column.sortable && column.sort_type.is_none() {
                return Err(ConfigError::MissingSortType(column.id.clone()));
            }
            if index.insert(column.id.clone(), i).is_some() {
                return Err(ConfigError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self { columns, index })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.index.get(id).map(|&i| &self.columns[i])
    }

    /// Returns the sort type of `id` if it names a sortable column.
    pub fn sort_type_of(&self, id: &str) -> Option<SortType> {
        self.get(id)
            .filter(|c| c.sortable)
            .and_then(|c| c.sort_type)
    }

    pub fn is_sortable(&self, id: &str) -> bool {
        self.sort_type_of(id).is_some()
    }

    /// Order to apply when the header of `id` is activated.
    ///
    /// The currently sorted column flips `Desc → Asc`; every other activation sorts descending
    /// first. Returns `None` for unknown or unsortable columns.
    pub fn next_order(&self, id: &str, current: Option<&SortSpec>) -> Option<SortOrder> {
        if !self.is_sortable(id) {
            return None;
        }
        let current = current
            .filter(|s| s.field == id)
            .map(|s| s.order);
        Some(match current {
            Some(SortOrder::Desc) => SortOrder::Asc,
            _ => SortOrder::Desc,
        })
    }

    pub fn header_cells(&self, current: Option<&SortSpec>) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|c| HeaderCell {
                id: c.id.clone(),
                title: c.title.clone(),
                sortable: c.sortable,
                order: current.filter(|s| s.field == c.id).map(|s| s.order),
            })
            .collect()
    }

    /// Renders the cell of column `id` for `row`, or `None` for an unknown column.
    pub fn render_cell(&self, id: &str, row: &Row) -> Option<RenderFragment> {
        self.get(id).map(|column| column.render(row))
    }

    /// Renders every cell of `row` in column order.
    pub fn render_row(&self, row: &Row) -> Vec<RenderFragment> {
        self.columns.iter().map(|c| c.render(row)).collect()
    }
}
