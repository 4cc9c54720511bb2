//! View-type tag layout.
//!
//! A host that composes several creators hands every creator the raw view
//! type of a recycled visual and asks whether it can be reused. Tags are laid
//! out so that each creator can recognise its own rows:
//!
//! ```text
//!  31                                   4 3 2 1 0
//! ┌──────────────────────────────────────┬───────┐
//! │            creator type              │ kind  │
//! └──────────────────────────────────────┴───────┘
//! kind = ITEM_TYPE_PARENT (0b1000) or ITEM_TYPE_CHILD (0b0100)
//! ```
//!
//! `tag = (creator_type << 4) | kind`, so the creator type is recovered with
//! `tag / 16` and the row kind from the low nibble. Zero is never a valid tag.
//!
//! [`is_parent_view_type`] and [`is_child_view_type`] are shift tests on the
//! discriminant bits. [`ViewType::kind`] is stricter: it only accepts a low
//! nibble equal to one of the two reserved values.

use crate::error::{CreatorError, Result};
use crate::row::RowKind;

/// Reserved discriminant for header rows.
pub const ITEM_TYPE_PARENT: u32 = 8;

/// Reserved discriminant for child rows.
pub const ITEM_TYPE_CHILD: u32 = 4;

/// Number of low bits reserved for the row-kind discriminant.
pub const KIND_BITS: u32 = 4;

const KIND_MASK: u32 = (1 << KIND_BITS) - 1;

/// Largest creator type that fits in a tag.
pub const MAX_CREATOR_TYPE: u32 = u32::MAX >> KIND_BITS;

static_assertions::const_assert_eq!(ITEM_TYPE_PARENT & ITEM_TYPE_CHILD, 0);
static_assertions::const_assert!(ITEM_TYPE_PARENT <= KIND_MASK);
static_assertions::const_assert!(ITEM_TYPE_CHILD <= KIND_MASK);

/// A view-type tag combining a creator type with a row kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewType(u32);

impl ViewType {
    /// Encodes a tag for the given creator type and row kind.
    ///
    /// Creator types above [`MAX_CREATOR_TYPE`] would lose their high bits
    /// and are rejected with [`CreatorError::InvalidCreatorType`].
    pub fn encode(creator_type: u32, kind: RowKind) -> Result<Self> {
        let discriminant = match kind {
            RowKind::Parent => ITEM_TYPE_PARENT,
            RowKind::Child => ITEM_TYPE_CHILD,
        };
        let shifted = creator_type
            .checked_mul(1 << KIND_BITS)
            .ok_or(CreatorError::InvalidCreatorType(creator_type))?;
        Ok(Self(shifted | discriminant))
    }

    /// Wraps a raw view type received from the host.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Recovers the creator type.
    #[inline]
    pub const fn creator_type(self) -> u32 {
        self.0 / (1 << KIND_BITS)
    }

    /// Returns the row kind, or `None` if the low nibble is not exactly one
    /// of the reserved discriminants.
    pub fn kind(self) -> Option<RowKind> {
        match self.0 & KIND_MASK {
            ITEM_TYPE_PARENT => Some(RowKind::Parent),
            ITEM_TYPE_CHILD => Some(RowKind::Child),
            _ => None,
        }
    }

    /// Returns `true` if this tag was produced by a creator of `creator_type`.
    pub fn belongs_to(self, creator_type: u32) -> bool {
        self.kind().is_some() && self.creator_type() == creator_type
    }
}

impl From<ViewType> for u32 {
    fn from(view_type: ViewType) -> Self {
        view_type.raw()
    }
}

/// Returns `true` if the parent bit of a raw view type is set.
#[inline]
pub const fn is_parent_view_type(raw: u32) -> bool {
    (raw >> 3) & 1 == 1
}

/// Returns `true` if the child bit of a raw view type is set and the parent
/// bit is clear.
#[inline]
pub const fn is_child_view_type(raw: u32) -> bool {
    (raw >> 2) & 3 == 1
}
