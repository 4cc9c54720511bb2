//! Ordered parent to children storage.
//!
//! `GroupCollection` keeps the groups in an ordered `Vec` and a parallel
//! `HashMap` from key to slot. The sequence owns the flat ordering; the map
//! only accelerates key lookup. Every structural change re-synchronises the
//! map from the first touched slot onward, so the two views never disagree.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{CreatorError, Dimension, Result};

/// Addresses a group either by key or by ordinal.
///
/// `&P` and `usize` both convert into a `GroupRef`, so every group-targeting
/// operation accepts either form:
///
/// ```
/// use recurve_adapter::GroupCollection;
///
/// let groups = GroupCollection::from_iter([("a", vec![1, 2]), ("b", vec![3])]);
/// assert_eq!(groups.child_count(&"b").unwrap(), 1);
/// assert_eq!(groups.child_count(0usize).unwrap(), 2);
/// ```
#[derive(Debug)]
pub enum GroupRef<'a, P> {
    /// Address by parent key.
    Key(&'a P),
    /// Address by ordinal among all groups.
    Ordinal(usize),
}

impl<P> Clone for GroupRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for GroupRef<'_, P> {}

impl<'a, P> From<&'a P> for GroupRef<'a, P> {
    fn from(key: &'a P) -> Self {
        Self::Key(key)
    }
}

impl<P> From<usize> for GroupRef<'_, P> {
    fn from(ordinal: usize) -> Self {
        Self::Ordinal(ordinal)
    }
}

/// An ordered mapping from parent keys to child lists.
#[derive(Debug, Clone)]
pub struct GroupCollection<P, C> {
    entries: Vec<(P, Vec<C>)>,
    slots: HashMap<P, usize>,
}

impl<P, C> Default for GroupCollection<P, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<P: Eq + Hash + Clone, C> FromIterator<(P, Vec<C>)> for GroupCollection<P, C> {
    /// Later duplicates replace the earlier child list but keep the position
    /// of the first occurrence.
    fn from_iter<I: IntoIterator<Item = (P, Vec<C>)>>(iter: I) -> Self {
        let mut groups = Self::default();
        for (key, children) in iter {
            match groups.slots.get(&key) {
                Some(&slot) => groups.entries[slot].1 = children,
                None => {
                    groups.slots.insert(key.clone(), groups.entries.len());
                    groups.entries.push((key, children));
                }
            }
        }
        groups
    }
}

impl<P: Eq + Hash + Clone, C> GroupCollection<P, C> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a group with this key exists.
    pub fn contains(&self, key: &P) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the ordinal of the group with this key.
    pub fn ordinal_of(&self, key: &P) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Returns the key of the group at `ordinal`.
    pub fn key_at(&self, ordinal: usize) -> Result<&P> {
        self.entries
            .get(ordinal)
            .map(|(key, _)| key)
            .ok_or_else(|| CreatorError::out_of_range(Dimension::Groups, ordinal, self.entries.len()))
    }

    /// Resolves a group reference to its ordinal.
    pub fn resolve_group<'a>(&self, group: impl Into<GroupRef<'a, P>>) -> Result<usize>
    where
        P: 'a,
    {
        match group.into() {
            GroupRef::Key(key) => self.ordinal_of(key).ok_or(CreatorError::GroupNotFound),
            GroupRef::Ordinal(ordinal) if ordinal < self.entries.len() => Ok(ordinal),
            GroupRef::Ordinal(ordinal) => Err(CreatorError::out_of_range(
                Dimension::Groups,
                ordinal,
                self.entries.len(),
            )),
        }
    }

    /// Returns the children of a group.
    pub fn children<'a>(&self, group: impl Into<GroupRef<'a, P>>) -> Result<&[C]>
    where
        P: 'a,
    {
        let ordinal = self.resolve_group(group)?;
        Ok(&self.entries[ordinal].1)
    }

    /// Returns the number of children in a group.
    pub fn child_count<'a>(&self, group: impl Into<GroupRef<'a, P>>) -> Result<usize>
    where
        P: 'a,
    {
        self.children(group).map(<[C]>::len)
    }

    /// Returns the child list at `ordinal` for in-place mutation.
    ///
    /// Length changes are safe: the flat layout is always derived on demand.
    pub(crate) fn children_mut(&mut self, ordinal: usize) -> &mut Vec<C> {
        &mut self.entries[ordinal].1
    }

    /// Iterates groups in flat order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&P, &[C])> + '_ {
        self.entries
            .iter()
            .map(|(key, children)| (key, children.as_slice()))
    }

    /// Iterates group keys in flat order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &P> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Appends an empty group.
    ///
    /// An existing key keeps its position; its children are replaced by an
    /// empty list and returned.
    pub(crate) fn push(&mut self, key: P) -> Option<Vec<C>> {
        if let Some(&slot) = self.slots.get(&key) {
            return Some(std::mem::take(&mut self.entries[slot].1));
        }
        self.slots.insert(key.clone(), self.entries.len());
        self.entries.push((key, Vec::new()));
        None
    }

    /// Splices an empty group in at `ordinal`, shifting the entry that was
    /// there (and everything after it) back by one.
    ///
    /// An existing entry for `key` elsewhere is moved; its children are
    /// returned alongside the group's final ordinal. The caller has validated
    /// `ordinal < group_count()`.
    pub(crate) fn insert_at(&mut self, ordinal: usize, key: P) -> (usize, Option<Vec<C>>) {
        debug_assert!(ordinal < self.entries.len());
        let (target, displaced, first_touched) = match self.slots.get(&key).copied() {
            Some(slot) => {
                let (_, children) = self.entries.remove(slot);
                let target = if slot < ordinal { ordinal - 1 } else { ordinal };
                (target, Some(children), slot.min(target))
            }
            None => {
                self.slots.insert(key.clone(), ordinal);
                (ordinal, None, ordinal)
            }
        };
        self.entries.insert(target, (key, Vec::new()));
        self.reindex_from(first_touched);
        (target, displaced)
    }

    /// Replaces the entry at `ordinal` with an empty group for `key`.
    ///
    /// The replaced entry is dropped. An existing entry for `key` elsewhere is
    /// moved into the slot; its children are returned alongside the group's
    /// final ordinal. The caller has validated `ordinal < group_count()`.
    pub(crate) fn replace_at(&mut self, ordinal: usize, key: P) -> (usize, Option<Vec<C>>) {
        debug_assert!(ordinal < self.entries.len());
        match self.slots.get(&key).copied() {
            Some(slot) if slot == ordinal => {
                (slot, Some(std::mem::take(&mut self.entries[slot].1)))
            }
            Some(slot) => {
                let (_, children) = self.entries.remove(slot);
                let target = if slot < ordinal { ordinal - 1 } else { ordinal };
                let (dropped, _) = std::mem::replace(&mut self.entries[target], (key, Vec::new()));
                self.slots.remove(&dropped);
                self.reindex_from(slot.min(target));
                (target, Some(children))
            }
            None => {
                let (dropped, _) =
                    std::mem::replace(&mut self.entries[ordinal], (key.clone(), Vec::new()));
                self.slots.remove(&dropped);
                self.slots.insert(key, ordinal);
                (ordinal, None)
            }
        }
    }

    /// Removes the group at `ordinal` and returns its key and children.
    pub(crate) fn remove_at(&mut self, ordinal: usize) -> (P, Vec<C>) {
        let (key, children) = self.entries.remove(ordinal);
        self.slots.remove(&key);
        self.reindex_from(ordinal);
        (key, children)
    }

    /// Re-synchronises the slot map for every entry at or after `start`.
    fn reindex_from(&mut self, start: usize) {
        for (slot, (key, _)) in self.entries.iter().enumerate().skip(start) {
            match self.slots.get_mut(key) {
                Some(existing) => *existing = slot,
                None => {
                    self.slots.insert(key.clone(), slot);
                }
            }
        }
    }
}

impl<P: Clone, C: Clone> GroupCollection<P, C> {
    /// Returns an owned snapshot of the mapping in flat order.
    pub fn to_vec(&self) -> Vec<(P, Vec<C>)> {
        self.entries.clone()
    }
}

impl<P, C> IntoIterator for GroupCollection<P, C> {
    type Item = (P, Vec<C>);
    type IntoIter = std::vec::IntoIter<(P, Vec<C>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
