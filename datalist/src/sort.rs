use alloc::string::ToString;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::{Row, SortMode, SortOrder, SortType, Value, compare_strings};

/// Ascending comparison of two values read as numbers.
///
/// Values that do not read as numbers compare equal to each other and after every number.
pub fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ascending comparison of two values under `sort_type`.
pub fn compare_values(sort_type: SortType, a: &Value, b: &Value) -> Ordering {
    match sort_type {
        SortType::Number => compare_numbers(a, b),
        SortType::String => match (a, b) {
            (Value::String(x), Value::String(y)) => compare_strings(x, y),
            _ => compare_strings(&a.to_string(), &b.to_string()),
        },
    }
}

/// Stable in-place sort of `rows` by the value at `field`.
pub fn sort_rows(rows: &mut [Row], field: &str, sort_type: SortType, order: SortOrder) {
    rows.sort_by(|a, b| order.apply(compare_values(sort_type, a.value(field), b.value(field))));
}

/// What the controller has to do after a strategy handled a sort request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortEffect {
    /// Rows were reordered in place; the view needs the new order.
    Reordered,
    /// Rows were dropped; the first page must be fetched again with the new sort.
    Requery,
}

/// A sorting strategy, selected once per controller from its [`SortMode`].
pub trait SortStrategy: fmt::Debug + Sync {
    fn mode(&self) -> SortMode;

    fn apply(
        &self,
        rows: &mut Vec<Row>,
        field: &str,
        sort_type: SortType,
        order: SortOrder,
    ) -> SortEffect;
}

/// Sorts the loaded rows in memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSort;

impl SortStrategy for LocalSort {
    fn mode(&self) -> SortMode {
        SortMode::Local
    }

    fn apply(
        &self,
        rows: &mut Vec<Row>,
        field: &str,
        sort_type: SortType,
        order: SortOrder,
    ) -> SortEffect {
        sort_rows(rows, field, sort_type, order);
        SortEffect::Reordered
    }
}

/// Leaves ordering to the backend: loaded rows are discarded and re-fetched.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoteSort;

impl SortStrategy for RemoteSort {
    fn mode(&self) -> SortMode {
        SortMode::Remote
    }

    fn apply(
        &self,
        rows: &mut Vec<Row>,
        _field: &str,
        _sort_type: SortType,
        _order: SortOrder,
    ) -> SortEffect {
        rows.clear();
        SortEffect::Requery
    }
}

static LOCAL: LocalSort = LocalSort;
static REMOTE: RemoteSort = RemoteSort;

impl SortMode {
    pub fn strategy(self) -> &'static dyn SortStrategy {
        match self {
            Self::Local => &LOCAL,
            Self::Remote => &REMOTE,
        }
    }
}
