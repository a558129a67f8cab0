use alloc::string::String;

/// Invalid list configuration. Returned from construction and never recovered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("column id must not be empty")]
    EmptyColumnId,

    #[error("duplicate column id `{0}`")]
    DuplicateColumn(String),

    /// A column marked sortable has no `sort_type`.
    #[error("sortable column `{0}` does not declare a sort type")]
    MissingSortType(String),

    #[error("window size must be greater than zero")]
    ZeroWindowSize,

    /// Sort field and sort order must be present together.
    #[error("sort field and sort order must be set together")]
    PartialSort,

    #[error("initial sort names unknown or unsortable column `{0}`")]
    UnsortableInitialSort(String),
}

/// A failed page fetch.
///
/// Recoverable: the controller returns to a stable phase and a later retry is possible.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The network client rejected the request.
    #[error("fetch rejected: {message}")]
    Rejected { message: String },

    /// The response could not be turned into rows.
    #[error("malformed response: {message}")]
    Malformed { message: String },
}

impl LoadError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
