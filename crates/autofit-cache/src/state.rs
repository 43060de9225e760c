#![forbid(unsafe_code)]

//! Per-element sizing state and the decision it drives.

use crate::group::{ElementId, GroupKey, ResultCache};

/// Search bounds and the last resolved size of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSizingState {
    /// Smallest size the search may return, in px.
    pub min_size: u32,
    /// Exclusive upper bound of the search, in px.
    pub max_size: u32,
    /// Size from the last search or adoption.
    pub resolved: Option<u32>,
    /// Search again on every adjustment instead of reusing `resolved`.
    pub dynamic: bool,
    /// Group this element shares its size with.
    pub group: Option<GroupKey>,
}

/// What an adjustment should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Take the size another group member settled on.
    AdoptGroup(u32),
    /// Run the search.
    Search,
    /// Apply the size resolved earlier.
    Reuse(u32),
}

impl ElementSizingState {
    /// Create state with the given bounds and nothing resolved.
    pub fn new(min_size: u32, max_size: u32) -> Self {
        Self {
            min_size,
            max_size,
            resolved: None,
            dynamic: false,
            group: None,
        }
    }

    /// Set the group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<GroupKey>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Check whether the next adjustment must search.
    #[inline]
    pub fn needs_search(&self) -> bool {
        self.resolved.is_none() || self.dynamic
    }

    /// Decide how element `id` gets its size.
    pub fn plan(&self, id: ElementId, cache: &ResultCache) -> Decision {
        if let Some(size) = self
            .group
            .as_ref()
            .and_then(|group| cache.adoptable(group, id))
        {
            return Decision::AdoptGroup(size);
        }
        match self.resolved {
            Some(size) if !self.needs_search() => Decision::Reuse(size),
            _ => Decision::Search,
        }
    }
}
