//! Flat row translation for two-level grouped lists.
//!
//! A list host renders rows from several independent "creators" as one flat
//! sequence. This crate provides the creator for grouped data: a set of
//! parent groups, each owning an ordered list of children, rendered as
//!
//! ```text
//! flat  row
//! 0     fruit        <- parent (group 0)
//! 1       apple      <- child 0 of fruit
//! 2       pear       <- child 1 of fruit
//! 3     veg          <- parent (group 1)
//! 4       kale       <- child 0 of veg
//! ```
//!
//! The grouped mapping stays authoritative. Flat positions are derived from
//! it on every query, in both directions, and every mutation tells the host
//! exactly which rows changed.
//!
//! # Core Types
//!
//! - [`GroupCollection`]: ordered parent to children storage plus the
//!   translation queries
//! - [`ExpandableCreator`]: mutation operations, host notification, view-type
//!   tagging and binding dispatch
//! - [`ModulesHost`]: the notification interface a host implements
//! - [`ExpandableBinder`]: the rendering capability a UI layer implements
//! - [`ViewType`]: the tag layout shared by all creators of one host
//! - [`SharedCreator`]: a mutex-guarded handle for multi-threaded hosts
//!
//! # Logging
//!
//! Mutations are traced with the `tracing` crate under the
//! `recurve_adapter::creator` target; dropped notifications under
//! `recurve_adapter::host`. Install a subscriber in the application to see
//! them.

mod binding;
mod config;
mod creator;
mod error;
mod groups;
mod host;
mod position;
mod row;
mod shared;
pub mod view_type;

pub use binding::{ChildClickListener, ClickHandler, ExpandableBinder, ParentClickListener};
pub use config::{CreatorConfig, Span};
pub use creator::ExpandableCreator;
pub use error::{CreatorError, Dimension, Result};
pub use groups::{GroupCollection, GroupRef};
pub use host::{HostNotification, ModulesHost, RecordingHost};
pub use row::{RowKind, RowRef};
pub use shared::SharedCreator;
pub use view_type::{ITEM_TYPE_CHILD, ITEM_TYPE_PARENT, ViewType};
