//! Flat position translation.
//!
//! Every query walks the groups in order and derives positions from the
//! current child list lengths. Nothing is cached, so no mutation can leave a
//! stale answer behind.

use std::hash::Hash;

use crate::error::{CreatorError, Dimension, Result};
use crate::groups::{GroupCollection, GroupRef};
use crate::row::{RowKind, RowRef};

impl<P: Eq + Hash + Clone, C> GroupCollection<P, C> {
    /// Returns the number of flat rows: one header per group plus one row per
    /// child.
    pub fn total_rows(&self) -> usize {
        self.iter().map(|(_, children)| children.len() + 1).sum()
    }

    /// Translates a flat position into a row reference.
    pub fn resolve(&self, flat: usize) -> Result<RowRef<'_, P>> {
        let mut acc = 0;
        for (group, (key, children)) in self.iter().enumerate() {
            if acc == flat {
                return Ok(RowRef::Parent { key, group });
            }
            let end = acc + 1 + children.len();
            if flat < end {
                return Ok(RowRef::Child {
                    key,
                    group,
                    offset: flat - acc - 1,
                });
            }
            acc = end;
        }
        Err(CreatorError::out_of_range(Dimension::Rows, flat, acc))
    }

    /// Classifies a flat position as a header or child row.
    pub fn row_kind(&self, flat: usize) -> Result<RowKind> {
        self.resolve(flat).map(|row| row.kind())
    }

    /// Translates a flat position into the child stored there and its offset
    /// within its group.
    ///
    /// Header rows are rejected with [`CreatorError::OutOfRange`] along the
    /// children dimension.
    pub fn resolve_child(&self, flat: usize) -> Result<(&C, usize)> {
        match self.resolve(flat)? {
            RowRef::Child { group, offset, .. } => {
                let children = self.children(group)?;
                Ok((&children[offset], offset))
            }
            RowRef::Parent { group, .. } => {
                let len = self.child_count(group)?;
                Err(CreatorError::out_of_range(Dimension::Children, flat, len))
            }
        }
    }

    /// Returns the flat position of a group's header row.
    pub fn flat_index_of_group<'a>(&self, group: impl Into<GroupRef<'a, P>>) -> Result<usize>
    where
        P: 'a,
    {
        let ordinal = self.resolve_group(group)?;
        Ok(self.header_position(ordinal))
    }

    /// Flat position of the header at an already validated ordinal.
    pub(crate) fn header_position(&self, ordinal: usize) -> usize {
        self.iter()
            .take(ordinal)
            .map(|(_, children)| children.len() + 1)
            .sum()
    }

    /// Returns the flat position of the child at `offset` within a group.
    ///
    /// `offset` may equal the group's length, which addresses the slot a
    /// newly appended child would occupy.
    pub fn flat_index_of_child<'a>(
        &self,
        group: impl Into<GroupRef<'a, P>>,
        offset: usize,
    ) -> Result<usize>
    where
        P: 'a,
    {
        let ordinal = self.resolve_group(group)?;
        let len = self.child_count(ordinal)?;
        if offset > len {
            return Err(CreatorError::out_of_range(Dimension::Children, offset, len));
        }
        Ok(self.header_position(ordinal) + offset + 1)
    }

    /// Returns the flat position of the first child equal to `child`.
    pub fn flat_index_of_child_value<'a>(
        &self,
        group: impl Into<GroupRef<'a, P>>,
        child: &C,
    ) -> Result<usize>
    where
        P: 'a,
        C: PartialEq,
    {
        let ordinal = self.resolve_group(group)?;
        let offset = self
            .children(ordinal)?
            .iter()
            .position(|candidate| candidate == child)
            .ok_or(CreatorError::ChildNotFound { group: ordinal })?;
        self.flat_index_of_child(ordinal, offset)
    }

    /// Returns the flat position of a row reference.
    pub fn flat_index_of_row(&self, row: &RowRef<'_, P>) -> Result<usize> {
        match *row {
            RowRef::Parent { key, .. } => self.flat_index_of_group(key),
            RowRef::Child { key, offset, .. } => {
                let len = self.child_count(key)?;
                if offset >= len {
                    return Err(CreatorError::out_of_range(Dimension::Children, offset, len));
                }
                self.flat_index_of_child(key, offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupCollection<&'static str, &'static str> {
        GroupCollection::from_iter([("a", vec!["x", "y"]), ("b", vec!["z"])])
    }

    #[test]
    fn test_total_rows() {
        assert_eq!(sample().total_rows(), 5);
        assert_eq!(GroupCollection::<u8, u8>::new().total_rows(), 0);
    }

    #[test]
    fn test_resolve_walks_in_order() {
        let groups = sample();
        assert_eq!(groups.resolve(0), Ok(RowRef::Parent { key: &"a", group: 0 }));
        assert_eq!(
            groups.resolve(2),
            Ok(RowRef::Child {
                key: &"a",
                group: 0,
                offset: 1
            })
        );
        assert_eq!(groups.resolve(3), Ok(RowRef::Parent { key: &"b", group: 1 }));
        assert_eq!(
            groups.resolve(4),
            Ok(RowRef::Child {
                key: &"b",
                group: 1,
                offset: 0
            })
        );
    }

    #[test]
    fn test_resolve_past_end() {
        let groups = sample();
        assert_eq!(
            groups.resolve(5),
            Err(CreatorError::out_of_range(Dimension::Rows, 5, 5))
        );
    }

    #[test]
    fn test_empty_groups_are_single_rows() {
        let groups: GroupCollection<&str, &str> =
            GroupCollection::from_iter([("a", vec![]), ("b", vec![]), ("c", vec!["x"])]);
        assert_eq!(groups.row_kind(0), Ok(RowKind::Parent));
        assert_eq!(groups.row_kind(1), Ok(RowKind::Parent));
        assert_eq!(groups.resolve(2).unwrap().key(), &"c");
        assert_eq!(groups.row_kind(3), Ok(RowKind::Child));
    }

    #[test]
    fn test_resolve_child() {
        let groups = sample();
        assert_eq!(groups.resolve_child(2), Ok((&"y", 1)));
        assert_eq!(groups.resolve_child(4), Ok((&"z", 0)));
        assert!(matches!(
            groups.resolve_child(3),
            Err(CreatorError::OutOfRange {
                dimension: Dimension::Children,
                ..
            })
        ));
    }

    #[test]
    fn test_reverse_translation() {
        let groups = sample();
        assert_eq!(groups.flat_index_of_group(&"a"), Ok(0));
        assert_eq!(groups.flat_index_of_group(&"b"), Ok(3));
        assert_eq!(groups.flat_index_of_group(1usize), Ok(3));
        assert_eq!(groups.flat_index_of_child(&"a", 1), Ok(2));
        assert_eq!(groups.flat_index_of_child(&"b", 1), Ok(5));
        assert_eq!(groups.flat_index_of_child_value(&"b", &"z"), Ok(4));
        assert_eq!(
            groups.flat_index_of_child_value(&"b", &"x"),
            Err(CreatorError::ChildNotFound { group: 1 })
        );
        assert_eq!(
            groups.flat_index_of_group(&"q"),
            Err(CreatorError::GroupNotFound)
        );
    }

    #[test]
    fn test_round_trip() {
        let groups: GroupCollection<u32, u32> = GroupCollection::from_iter([
            (1, vec![]),
            (2, vec![10, 11, 12]),
            (3, vec![]),
            (4, vec![40]),
        ]);
        for flat in 0..groups.total_rows() {
            let row = groups.resolve(flat).unwrap();
            assert_eq!(groups.flat_index_of_row(&row), Ok(flat));
        }
    }

    #[test]
    fn test_reads_are_idempotent() {
        let groups = sample();
        let first = groups.resolve(2);
        let second = groups.resolve(2);
        assert_eq!(first, second);
        assert_eq!(groups.total_rows(), 5);
    }
}
