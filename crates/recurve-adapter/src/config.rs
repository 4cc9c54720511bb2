//! Configuration for an expandable creator.

use crate::error::{CreatorError, Result};
use crate::view_type::MAX_CREATOR_TYPE;

/// Layout span hint reported to the host.
///
/// The hint is fixed by the caller and plays no part in position translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Span {
    /// Occupy the full width of the host layout ("wrap content").
    #[default]
    Wrap,
    /// Occupy a fixed number of layout columns.
    Columns(u32),
}

/// Configuration for an [`ExpandableCreator`](crate::ExpandableCreator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorConfig {
    /// Caller-assigned tag distinguishing this creator's rows from the rows
    /// of other creators composed in the same host.
    pub creator_type: u32,
    /// Layout span hint.
    pub span: Span,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            creator_type: 0,
            span: Span::Wrap,
        }
    }
}

impl CreatorConfig {
    /// Create a configuration for the given creator type.
    pub fn new(creator_type: u32) -> Self {
        Self {
            creator_type,
            ..Default::default()
        }
    }

    /// Set the layout span hint.
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Check that the creator type fits in the view-type tag layout.
    pub fn validate(&self) -> Result<()> {
        if self.creator_type > MAX_CREATOR_TYPE {
            return Err(CreatorError::InvalidCreatorType(self.creator_type));
        }
        Ok(())
    }
}
