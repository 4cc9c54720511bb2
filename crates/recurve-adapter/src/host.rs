//! Change notifications sent to the list host.
//!
//! The host owns the flat list that several creators contribute to. A creator
//! never re-renders anything itself: every successful mutation reports
//! exactly one change, in creator-local flat positions, and the host decides
//! when and how to refresh the affected rows.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receives change notifications from creators.
///
/// Every call carries the creator type of the sender so that one host can
/// multiplex several creators. Positions are local to the sending creator.
pub trait ModulesHost {
    /// The creator's whole data set was replaced.
    fn notify_item_set_changed(&mut self, creator_type: u32);

    /// A row was inserted at `position`.
    fn notify_item_inserted(&mut self, creator_type: u32, position: usize);

    /// The row at `position` was removed.
    fn notify_item_removed(&mut self, creator_type: u32, position: usize);

    /// The row at `position` changed in place.
    fn notify_item_changed(&mut self, creator_type: u32, position: usize);

    /// Rows in `start..end` were removed.
    fn notify_item_range_removed(&mut self, creator_type: u32, start: usize, end: usize);
}

/// A single notification, as recorded by [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostNotification {
    /// The whole data set was replaced.
    SetChanged { creator_type: u32 },
    /// A row was inserted.
    Inserted { creator_type: u32, position: usize },
    /// A row was removed.
    Removed { creator_type: u32, position: usize },
    /// A row changed in place.
    Changed { creator_type: u32, position: usize },
    /// A range of rows was removed. `end` is exclusive.
    RangeRemoved {
        creator_type: u32,
        start: usize,
        end: usize,
    },
}

impl HostNotification {
    /// Returns the creator type that sent this notification.
    pub fn creator_type(&self) -> u32 {
        match *self {
            Self::SetChanged { creator_type }
            | Self::Inserted { creator_type, .. }
            | Self::Removed { creator_type, .. }
            | Self::Changed { creator_type, .. }
            | Self::RangeRemoved { creator_type, .. } => creator_type,
        }
    }
}

/// A host that records every notification it receives.
///
/// Clones share the same log, so a test or a batching host can keep one
/// handle while the creator owns another.
///
/// ```
/// use recurve_adapter::{ExpandableCreator, HostNotification, RecordingHost};
/// # use recurve_adapter::ExpandableBinder;
/// # struct Binder;
/// # impl ExpandableBinder<&'static str, &'static str> for Binder {
/// #     type Container = ();
/// #     type Visual = ();
/// #     fn create_parent_visual(&mut self, _: &()) {}
/// #     fn create_child_visual(&mut self, _: &()) {}
/// #     fn bind_parent(&mut self, _: &mut (), _: &&'static str, _: usize, _: usize) {}
/// #     fn bind_child(&mut self, _: &mut (), _: &&'static str, _: usize, _: usize) {}
/// #     fn set_on_click(&mut self, _: &mut (), _: recurve_adapter::ClickHandler<()>) {}
/// # }
///
/// let host = RecordingHost::new();
/// let mut creator: ExpandableCreator<&str, &str, Binder> = ExpandableCreator::new(Binder);
/// creator.attach_host(host.clone());
///
/// creator.add_group("fruit");
/// assert_eq!(
///     host.take(),
///     vec![HostNotification::Inserted { creator_type: 0, position: 0 }]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    log: Arc<Mutex<Vec<HostNotification>>>,
}

impl RecordingHost {
    /// Creates a host with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every notification recorded so far.
    pub fn notifications(&self) -> Vec<HostNotification> {
        self.log.lock().clone()
    }

    /// Drains the log.
    pub fn take(&self) -> Vec<HostNotification> {
        std::mem::take(&mut *self.log.lock())
    }

    /// Returns the number of recorded notifications.
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    fn record(&self, notification: HostNotification) {
        self.log.lock().push(notification);
    }
}

impl ModulesHost for RecordingHost {
    fn notify_item_set_changed(&mut self, creator_type: u32) {
        self.record(HostNotification::SetChanged { creator_type });
    }

    fn notify_item_inserted(&mut self, creator_type: u32, position: usize) {
        self.record(HostNotification::Inserted {
            creator_type,
            position,
        });
    }

    fn notify_item_removed(&mut self, creator_type: u32, position: usize) {
        self.record(HostNotification::Removed {
            creator_type,
            position,
        });
    }

    fn notify_item_changed(&mut self, creator_type: u32, position: usize) {
        self.record(HostNotification::Changed {
            creator_type,
            position,
        });
    }

    fn notify_item_range_removed(&mut self, creator_type: u32, start: usize, end: usize) {
        self.record(HostNotification::RangeRemoved {
            creator_type,
            start,
            end,
        });
    }
}

/// A host owned by a creator.
pub(crate) type BoxedHost = Box<dyn ModulesHost + Send>;

/// Sends a notification to an optional host.
///
/// Notifications without an attached host are dropped.
pub(crate) fn dispatch(host: &mut Option<BoxedHost>, notification: HostNotification) {
    let Some(host) = host.as_mut() else {
        tracing::debug!(target: "recurve_adapter::host", ?notification, "no host attached, dropping notification");
        return;
    };
    match notification {
        HostNotification::SetChanged { creator_type } => host.notify_item_set_changed(creator_type),
        HostNotification::Inserted {
            creator_type,
            position,
        } => host.notify_item_inserted(creator_type, position),
        HostNotification::Removed {
            creator_type,
            position,
        } => host.notify_item_removed(creator_type, position),
        HostNotification::Changed {
            creator_type,
            position,
        } => host.notify_item_changed(creator_type, position),
        HostNotification::RangeRemoved {
            creator_type,
            start,
            end,
        } => host.notify_item_range_removed(creator_type, start, end),
    }
}

static_assertions::assert_impl_all!(RecordingHost: Send, Sync);
