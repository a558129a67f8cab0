use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Column id → position in the registry.
#[cfg(feature = "std")]
pub(crate) type ColumnIndexMap = HashMap<String, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type ColumnIndexMap = BTreeMap<String, usize>;
