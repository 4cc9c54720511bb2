//! Error types for the expandable creator.

use std::fmt;

/// Result type alias for creator operations.
pub type Result<T> = std::result::Result<T, CreatorError>;

/// The axis an out-of-range index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Group ordinals (`0..group_count`).
    Groups,
    /// Child offsets within a single group.
    Children,
    /// Flat creator positions (`0..total_rows`).
    Rows,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Groups => write!(f, "groups"),
            Self::Children => write!(f, "children"),
            Self::Rows => write!(f, "rows"),
        }
    }
}

/// Errors that can occur while translating positions or mutating groups.
///
/// A failed mutation never touches the mapping and never notifies the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreatorError {
    /// The referenced parent key is not in the mapping.
    #[error("parent group not found")]
    GroupNotFound,

    /// A child looked up by value is not in its group.
    #[error("child not found in group {group}")]
    ChildNotFound { group: usize },

    /// An ordinal, offset or flat position is outside its valid range.
    #[error("index {index} out of range for {dimension} (len {len})")]
    OutOfRange {
        dimension: Dimension,
        index: usize,
        len: usize,
    },

    /// A view type that this creator did not produce.
    #[error("view type {view_type:#x} does not belong to creator type {creator_type}")]
    ForeignViewType { view_type: u32, creator_type: u32 },

    /// The creator type does not fit in the view-type tag layout.
    #[error("creator type {0} does not fit in a view-type tag")]
    InvalidCreatorType(u32),
}

impl CreatorError {
    /// Create an out-of-range error.
    pub fn out_of_range(dimension: Dimension, index: usize, len: usize) -> Self {
        Self::OutOfRange {
            dimension,
            index,
            len,
        }
    }

    /// Returns `true` for the "not found" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound | Self::ChildNotFound { .. })
    }
}
