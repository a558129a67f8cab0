use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::ConfigError;

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses `"asc"`/`"desc"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: core::cmp::Ordering) -> core::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sortable column's values are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortType {
    Number,
    String,
}

/// Where sorting happens. Fixed for the lifetime of a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortMode {
    /// Reorder the already loaded rows in memory.
    #[default]
    Local,
    /// Drop loaded rows and re-query from the first page with sort parameters.
    Remote,
}

/// An active sort: field and order are always present together.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Builds a sort from two independently optional halves.
    ///
    /// Both absent yields `Ok(None)`; exactly one present is rejected.
    pub fn from_parts(
        field: Option<impl Into<String>>,
        order: Option<SortOrder>,
    ) -> Result<Option<Self>, ConfigError> {
        match (field, order) {
            (Some(field), Some(order)) => Ok(Some(Self::new(field, order))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::PartialSort),
        }
    }
}

/// The window requested from the network client.
///
/// The parameter contract is the same for initial loads, incremental loads and remote sorts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest {
    pub offset: usize,
    pub limit: usize,
    pub sort: Option<SortSpec>,
}

impl FetchRequest {
    /// Exclusive end of the requested window.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort.as_ref().map(|s| s.field.as_str())
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort.as_ref().map(|s| s.order)
    }

    /// Query parameters in the `_start`/`_end`/`_sort`/`_order` convention of json-server style
    /// REST backends. Sort parameters are only present when a sort is active.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        pairs.push(("_start", self.offset.to_string()));
        pairs.push(("_end", self.end().to_string()));
        if let Some(sort) = &self.sort {
            pairs.push(("_sort", sort.field.clone()));
            pairs.push(("_order", sort.order.as_str().to_string()));
        }
        pairs
    }
}

/// Rendered output of a single cell, produced by a column's cell renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RenderFragment(pub String);

impl RenderFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RenderFragment {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RenderFragment {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for RenderFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
