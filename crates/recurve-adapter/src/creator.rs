//! The expandable creator.
//!
//! `ExpandableCreator` presents a [`GroupCollection`] as a flat run of rows
//! inside a host list. It keeps the grouped mapping authoritative, translates
//! between flat positions and group/child references on demand, and reports
//! every mutation to the host as exactly one change notification.
//!
//! # Example
//!
//! ```
//! use recurve_adapter::{
//!     ClickHandler, CreatorConfig, ExpandableBinder, ExpandableCreator, HostNotification,
//!     RecordingHost, RowKind,
//! };
//!
//! struct TextBinder;
//!
//! impl ExpandableBinder<String, String> for TextBinder {
//!     type Container = ();
//!     type Visual = String;
//!
//!     fn create_parent_visual(&mut self, _: &()) -> String { String::new() }
//!     fn create_child_visual(&mut self, _: &()) -> String { String::new() }
//!     fn bind_parent(&mut self, visual: &mut String, parent: &String, _: usize, _: usize) {
//!         *visual = parent.clone();
//!     }
//!     fn bind_child(&mut self, visual: &mut String, child: &String, _: usize, _: usize) {
//!         *visual = format!("- {child}");
//!     }
//!     fn set_on_click(&mut self, _: &mut String, _: ClickHandler<String>) {}
//! }
//!
//! let host = RecordingHost::new();
//! let mut creator = ExpandableCreator::with_config(TextBinder, CreatorConfig::new(1)).unwrap();
//! creator.attach_host(host.clone());
//! creator.set_data([
//!     ("fruit".to_string(), vec!["apple".to_string(), "pear".to_string()]),
//!     ("veg".to_string(), vec!["kale".to_string()]),
//! ]);
//!
//! assert_eq!(creator.item_count(), 5);
//! assert_eq!(creator.row_kind(3).unwrap(), RowKind::Parent);
//!
//! creator.add_child(&"veg".to_string(), "leek".to_string()).unwrap();
//! assert_eq!(
//!     host.take().last(),
//!     Some(&HostNotification::Inserted { creator_type: 1, position: 5 })
//! );
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::binding::{ChildClickListener, ExpandableBinder, ParentClickListener};
use crate::config::{CreatorConfig, Span};
use crate::error::{CreatorError, Dimension, Result};
use crate::groups::{GroupCollection, GroupRef};
use crate::host::{self, BoxedHost, HostNotification, ModulesHost};
use crate::row::{RowKind, RowRef};
use crate::view_type::ViewType;

/// Presents two-level grouped data as a flat, linearly indexed row sequence.
///
/// `P` is the parent key type, `C` the child type and `B` the binder that
/// renders rows.
pub struct ExpandableCreator<P, C, B: ExpandableBinder<P, C>> {
    config: CreatorConfig,
    groups: GroupCollection<P, C>,
    binder: B,
    host: Option<BoxedHost>,
    parent_click: Option<ParentClickListener<P, B::Visual>>,
    child_click: Option<ChildClickListener<C, B::Visual>>,
}

impl<P, C, B> ExpandableCreator<P, C, B>
where
    P: Eq + Hash + Clone,
    B: ExpandableBinder<P, C>,
{
    /// Creates an empty creator with the default configuration.
    pub fn new(binder: B) -> Self {
        Self {
            config: CreatorConfig::default(),
            groups: GroupCollection::new(),
            binder,
            host: None,
            parent_click: None,
            child_click: None,
        }
    }

    /// Creates an empty creator with a custom configuration.
    pub fn with_config(binder: B, config: CreatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(binder)
        })
    }

    /// Attaches the host that receives change notifications.
    ///
    /// Replaces any previously attached host.
    pub fn attach_host(&mut self, host: impl ModulesHost + Send + 'static) {
        self.host = Some(Box::new(host));
    }

    /// Returns `true` if a host is attached.
    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Registers the listener fired when a bound header row is clicked.
    pub fn set_on_parent_click<F>(&mut self, listener: F)
    where
        F: Fn(&B::Visual, &P, usize, usize) + Send + Sync + 'static,
    {
        self.parent_click = Some(Arc::new(listener));
    }

    /// Registers the listener fired when a bound child row is clicked.
    pub fn set_on_child_click<F>(&mut self, listener: F)
    where
        F: Fn(&B::Visual, &C, usize, usize) + Send + Sync + 'static,
    {
        self.child_click = Some(Arc::new(listener));
    }

    /// Returns the creator type.
    pub fn creator_type(&self) -> u32 {
        self.config.creator_type
    }

    /// Returns the layout span hint.
    pub fn span(&self) -> Span {
        self.config.span
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CreatorConfig {
        &self.config
    }

    /// Returns the binder.
    pub fn binder(&self) -> &B {
        &self.binder
    }

    /// Returns the binder mutably.
    pub fn binder_mut(&mut self) -> &mut B {
        &mut self.binder
    }

    /// Returns the grouped mapping.
    pub fn groups(&self) -> &GroupCollection<P, C> {
        &self.groups
    }

    /// Returns an owned snapshot of the mapping in flat order.
    pub fn data(&self) -> Vec<(P, Vec<C>)>
    where
        C: Clone,
    {
        self.groups.to_vec()
    }

    // -------------------------------------------------------------------------
    // Group mutation
    // -------------------------------------------------------------------------

    /// Replaces the whole mapping.
    pub fn set_data(&mut self, groups: impl IntoIterator<Item = (P, Vec<C>)>) {
        self.groups = groups.into_iter().collect();
        tracing::trace!(
            target: "recurve_adapter::creator",
            creator_type = self.creator_type(),
            groups = self.groups.group_count(),
            "replaced data set"
        );
        self.notify(HostNotification::SetChanged {
            creator_type: self.creator_type(),
        });
    }

    /// Appends an empty group at the end.
    ///
    /// If `key` already exists, the group keeps its position, its children are
    /// cleared, and the previous child list is returned.
    pub fn add_group(&mut self, key: P) -> Option<Vec<C>> {
        let creator_type = self.creator_type();
        let Some(ordinal) = self.groups.ordinal_of(&key) else {
            self.groups.push(key);
            let position = self.groups.total_rows() - 1;
            tracing::trace!(target: "recurve_adapter::creator", creator_type, position, "appended group");
            self.notify(HostNotification::Inserted {
                creator_type,
                position,
            });
            return None;
        };

        let displaced = self.groups.push(key);
        let header = self.groups.header_position(ordinal);
        let cleared = displaced.as_ref().map_or(0, Vec::len);
        tracing::trace!(target: "recurve_adapter::creator", creator_type, header, cleared, "reset existing group");
        if cleared > 0 {
            self.notify(HostNotification::RangeRemoved {
                creator_type,
                start: header + 1,
                end: header + 1 + cleared,
            });
        } else {
            self.notify(HostNotification::Changed {
                creator_type,
                position: header,
            });
        }
        displaced
    }

    /// Inserts an empty group at `position` among the existing groups.
    ///
    /// The group previously at `position` follows the new one. If `key`
    /// already existed elsewhere it is moved, its previous child list is
    /// returned, and the host is told the whole data set changed.
    pub fn insert_group(&mut self, position: usize, key: P) -> Result<Option<Vec<C>>> {
        self.check_group_position(position)?;
        let (ordinal, displaced) = self.groups.insert_at(position, key);
        self.notify_group_placed(ordinal, displaced.is_some(), "inserted group");
        Ok(displaced)
    }

    /// Replaces the group at `position` with an empty group for `key`.
    ///
    /// The replaced group and its children are dropped. If `key` already
    /// existed, its previous child list is returned and the host is told the
    /// whole data set changed.
    pub fn set_group(&mut self, position: usize, key: P) -> Result<Option<Vec<C>>> {
        self.check_group_position(position)?;
        let (ordinal, displaced) = self.groups.replace_at(position, key);
        self.notify_group_placed(ordinal, displaced.is_some(), "replaced group");
        Ok(displaced)
    }

    /// Removes a group and all of its children.
    ///
    /// The host is told that the rows `start..start + children + 1` are gone.
    pub fn remove_group<'a>(&mut self, group: impl Into<GroupRef<'a, P>>) -> Result<Vec<C>>
    where
        P: 'a,
    {
        let ordinal = self.groups.resolve_group(group)?;
        let start = self.groups.header_position(ordinal);
        let (_, children) = self.groups.remove_at(ordinal);
        let end = start + children.len() + 1;
        let creator_type = self.creator_type();
        tracing::trace!(target: "recurve_adapter::creator", creator_type, start, end, "removed group");
        self.notify(HostNotification::RangeRemoved {
            creator_type,
            start,
            end,
        });
        Ok(children)
    }

    // -------------------------------------------------------------------------
    // Child mutation
    // -------------------------------------------------------------------------

    /// Appends a child to a group.
    pub fn add_child<'a>(&mut self, group: impl Into<GroupRef<'a, P>>, child: C) -> Result<()>
    where
        P: 'a,
    {
        let ordinal = self.groups.resolve_group(group)?;
        let children = self.groups.children_mut(ordinal);
        children.push(child);
        let offset = children.len() - 1;
        self.notify_child(ordinal, offset, ChildChange::Inserted);
        Ok(())
    }

    /// Inserts a child at `offset` within a group.
    pub fn insert_child<'a>(
        &mut self,
        group: impl Into<GroupRef<'a, P>>,
        offset: usize,
        child: C,
    ) -> Result<()>
    where
        P: 'a,
    {
        let ordinal = self.groups.resolve_group(group)?;
        let children = self.groups.children_mut(ordinal);
        if offset > children.len() {
            return Err(CreatorError::out_of_range(
                Dimension::Children,
                offset,
                children.len(),
            ));
        }
        children.insert(offset, child);
        self.notify_child(ordinal, offset, ChildChange::Inserted);
        Ok(())
    }

    /// Replaces the child at `offset` and returns the previous value.
    pub fn set_child<'a>(
        &mut self,
        group: impl Into<GroupRef<'a, P>>,
        offset: usize,
        child: C,
    ) -> Result<C>
    where
        P: 'a,
    {
        let ordinal = self.groups.resolve_group(group)?;
        let children = self.groups.children_mut(ordinal);
        let len = children.len();
        let Some(slot) = children.get_mut(offset) else {
            return Err(CreatorError::out_of_range(Dimension::Children, offset, len));
        };
        let previous = std::mem::replace(slot, child);
        self.notify_child(ordinal, offset, ChildChange::Changed);
        Ok(previous)
    }

    /// Removes the first child equal to `child`.
    ///
    /// Returns `Ok(false)` without notifying the host if no child matches.
    pub fn remove_child<'a>(&mut self, group: impl Into<GroupRef<'a, P>>, child: &C) -> Result<bool>
    where
        P: 'a,
        C: PartialEq,
    {
        let ordinal = self.groups.resolve_group(group)?;
        let children = self.groups.children_mut(ordinal);
        let Some(offset) = children.iter().position(|candidate| candidate == child) else {
            return Ok(false);
        };
        children.remove(offset);
        self.notify_child(ordinal, offset, ChildChange::Removed);
        Ok(true)
    }

    /// Removes and returns the child at `offset`.
    pub fn remove_child_at<'a>(
        &mut self,
        group: impl Into<GroupRef<'a, P>>,
        offset: usize,
    ) -> Result<C>
    where
        P: 'a,
    {
        let ordinal = self.groups.resolve_group(group)?;
        let children = self.groups.children_mut(ordinal);
        if offset >= children.len() {
            return Err(CreatorError::out_of_range(
                Dimension::Children,
                offset,
                children.len(),
            ));
        }
        let removed = children.remove(offset);
        self.notify_child(ordinal, offset, ChildChange::Removed);
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns the number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.group_count()
    }

    /// Returns the number of children in a group.
    pub fn child_count<'a>(&self, group: impl Into<GroupRef<'a, P>>) -> Result<usize>
    where
        P: 'a,
    {
        self.groups.child_count(group)
    }

    /// Returns the number of flat rows this creator contributes to the host.
    pub fn item_count(&self) -> usize {
        self.groups.total_rows()
    }

    /// Classifies a flat position.
    pub fn row_kind(&self, flat: usize) -> Result<RowKind> {
        self.groups.row_kind(flat)
    }

    /// Returns the view-type tag for a flat position.
    pub fn view_type(&self, flat: usize) -> Result<ViewType> {
        ViewType::encode(self.creator_type(), self.row_kind(flat)?)
    }

    /// Returns `raw` if it is a tag produced by this creator, otherwise `0`.
    pub fn normalize_view_type(&self, raw: u32) -> u32 {
        if ViewType::from_raw(raw).belongs_to(self.creator_type()) {
            raw
        } else {
            0
        }
    }

    /// Translates a flat position into a row reference.
    pub fn resolve(&self, flat: usize) -> Result<RowRef<'_, P>> {
        self.groups.resolve(flat)
    }

    /// Translates a flat position into a child and its offset within its group.
    pub fn resolve_child(&self, flat: usize) -> Result<(&C, usize)> {
        self.groups.resolve_child(flat)
    }

    /// Returns the flat position of a group's header row.
    pub fn flat_index_of_group<'a>(&self, group: impl Into<GroupRef<'a, P>>) -> Result<usize>
    where
        P: 'a,
    {
        self.groups.flat_index_of_group(group)
    }

    /// Returns the flat position of the child at `offset` within a group.
    pub fn flat_index_of_child<'a>(
        &self,
        group: impl Into<GroupRef<'a, P>>,
        offset: usize,
    ) -> Result<usize>
    where
        P: 'a,
    {
        self.groups.flat_index_of_child(group, offset)
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
        self.groups.flat_index_of_child_value(group, child)
    }

    // -------------------------------------------------------------------------
    // Visuals
    // -------------------------------------------------------------------------

    /// Creates a visual for a view type previously returned by
    /// [`view_type`](Self::view_type).
    pub fn create_visual(&mut self, container: &B::Container, view_type: u32) -> Result<B::Visual> {
        let creator_type = self.creator_type();
        let tag = ViewType::from_raw(view_type);
        let kind = tag
            .kind()
            .filter(|_| tag.creator_type() == creator_type)
            .ok_or(CreatorError::ForeignViewType {
                view_type,
                creator_type,
            })?;
        Ok(match kind {
            RowKind::Parent => self.binder.create_parent_visual(container),
            RowKind::Child => self.binder.create_child_visual(container),
        })
    }

    /// Binds the row at a flat position into `visual`.
    ///
    /// Registered click listeners are attached before the binder sees the
    /// row.
    pub fn bind(&mut self, visual: &mut B::Visual, flat: usize) -> Result<()>
    where
        P: Send + Sync + 'static,
        C: Clone + Send + Sync + 'static,
        B::Visual: 'static,
    {
        match self.groups.resolve(flat)? {
            RowRef::Parent { key, group } => {
                if let Some(listener) = &self.parent_click {
                    let listener = Arc::clone(listener);
                    let parent = key.clone();
                    self.binder.set_on_click(
                        visual,
                        Box::new(move |clicked: &B::Visual| listener(clicked, &parent, group, flat)),
                    );
                }
                self.binder.bind_parent(visual, key, group, flat);
            }
            RowRef::Child { group, offset, .. } => {
                let child = &self.groups.children(group)?[offset];
                if let Some(listener) = &self.child_click {
                    let listener = Arc::clone(listener);
                    let owned = child.clone();
                    self.binder.set_on_click(
                        visual,
                        Box::new(move |clicked: &B::Visual| listener(clicked, &owned, offset, flat)),
                    );
                }
                self.binder.bind_child(visual, child, offset, flat);
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn check_group_position(&self, position: usize) -> Result<()> {
        let len = self.groups.group_count();
        if position >= len {
            return Err(CreatorError::out_of_range(Dimension::Groups, position, len));
        }
        Ok(())
    }

    /// Reports a group placed by `insert_group` or `set_group`.
    ///
    /// A moved key also removed its old header and children, which no single
    /// row notification describes, so the host gets a full reset instead.
    fn notify_group_placed(&mut self, ordinal: usize, moved: bool, action: &'static str) {
        let creator_type = self.creator_type();
        let position = self.groups.header_position(ordinal);
        tracing::trace!(target: "recurve_adapter::creator", creator_type, ordinal, position, moved, "{action}");
        self.notify(if moved {
            HostNotification::SetChanged { creator_type }
        } else {
            HostNotification::Inserted {
                creator_type,
                position,
            }
        });
    }

    fn notify_child(&mut self, ordinal: usize, offset: usize, change: ChildChange) {
        let creator_type = self.creator_type();
        let position = self.groups.header_position(ordinal) + offset + 1;
        tracing::trace!(target: "recurve_adapter::creator", creator_type, ordinal, offset, position, ?change, "child changed");
        self.notify(match change {
            ChildChange::Inserted => HostNotification::Inserted {
                creator_type,
                position,
            },
            ChildChange::Changed => HostNotification::Changed {
                creator_type,
                position,
            },
            ChildChange::Removed => HostNotification::Removed {
                creator_type,
                position,
            },
        });
    }

    fn notify(&mut self, notification: HostNotification) {
        host::dispatch(&mut self.host, notification);
    }
}

/// Kind of single-row change to a child.
#[derive(Debug, Clone, Copy)]
enum ChildChange {
    Inserted,
    Changed,
    Removed,
}
