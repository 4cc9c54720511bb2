//! Row references produced by flat position translation.

/// Classification of a flat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A group header row.
    Parent,
    /// A child row inside a group.
    Child,
}

impl RowKind {
    /// Returns `true` for header rows.
    #[inline]
    pub fn is_parent(self) -> bool {
        matches!(self, Self::Parent)
    }
}

/// A structured reference to one flat row.
///
/// Every valid flat position maps to exactly one `RowRef`, and every `RowRef`
/// obtained from the current mapping maps back to exactly one flat position.
/// References borrow the mapping and cannot outlive the next mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRef<'a, P> {
    /// The header row of a group.
    Parent {
        /// The group's key.
        key: &'a P,
        /// The group's ordinal among all groups.
        group: usize,
    },
    /// A child row.
    Child {
        /// The owning group's key.
        key: &'a P,
        /// The owning group's ordinal.
        group: usize,
        /// Offset of the child within its group.
        offset: usize,
    },
}

impl<'a, P> RowRef<'a, P> {
    /// Returns the row classification.
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Parent { .. } => RowKind::Parent,
            Self::Child { .. } => RowKind::Child,
        }
    }

    /// Returns the key of the group this row belongs to.
    pub fn key(&self) -> &'a P {
        match *self {
            Self::Parent { key, .. } | Self::Child { key, .. } => key,
        }
    }

    /// Returns the ordinal of the group this row belongs to.
    pub fn group(&self) -> usize {
        match *self {
            Self::Parent { group, .. } | Self::Child { group, .. } => group,
        }
    }

    /// Returns the child offset, or `None` for header rows.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Self::Parent { .. } => None,
            Self::Child { offset, .. } => Some(offset),
        }
    }
}
