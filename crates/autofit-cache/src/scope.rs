#![forbid(unsafe_code)]

//! Screen-level owner of the group cache.
//!
//! A [`FitScope`] hands out [`AutoFit`] elements that share one
//! [`ResultCache`], one measurer, and one [`SizingConfig`]. Dropping the
//! scope (and its elements) drops the cache; call
//! [`begin_teardown`](FitScope::begin_teardown) while the screen is closing
//! so late adjustments start from an empty cache.

use std::fmt;
use std::sync::Arc;

use autofit_core::{ConfigError, SizingConfig};
use autofit_text::{CellMeasurer, TextMeasurer};
use tracing::info;

use crate::element::{AutoFit, TextHost};
use crate::group::{GroupKey, ResultCache};

/// Shared context for a set of autofit elements.
#[derive(Clone)]
pub struct FitScope {
    cache: Arc<ResultCache>,
    measurer: Arc<dyn TextMeasurer>,
    config: SizingConfig,
}

impl fmt::Debug for FitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitScope")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for FitScope {
    fn default() -> Self {
        Self::new(CellMeasurer::default(), SizingConfig::default())
    }
}

impl FitScope {
    /// Create a scope with its own empty cache.
    pub fn new(measurer: impl TextMeasurer + 'static, config: SizingConfig) -> Self {
        Self::with_shared(Arc::new(measurer), config)
    }

    /// Create a scope around a measurer shared with other scopes.
    pub fn with_shared(measurer: Arc<dyn TextMeasurer>, config: SizingConfig) -> Self {
        Self {
            cache: Arc::new(ResultCache::new()),
            measurer,
            config,
        }
    }

    /// Create a scope configured from `AUTOFIT_*` environment variables.
    pub fn from_env(measurer: impl TextMeasurer + 'static) -> Result<Self, ConfigError> {
        Ok(Self::new(measurer, SizingConfig::from_env()?))
    }

    /// The shared group cache.
    #[inline]
    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// The shared measurer.
    #[inline]
    pub fn measurer(&self) -> &Arc<dyn TextMeasurer> {
        &self.measurer
    }

    /// Sizing configuration for new elements.
    #[inline]
    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// A detached element.
    pub fn element<H: TextHost>(&self) -> AutoFit<H> {
        AutoFit::new(
            Arc::clone(&self.cache),
            Arc::clone(&self.measurer),
            &self.config,
        )
    }

    /// An element attached to `host`.
    pub fn attach<H: TextHost>(&self, host: H) -> AutoFit<H> {
        let mut element = self.element();
        element.attach(host);
        element
    }

    /// An element attached to `host` that shares its size with `group`.
    /// Grouped elements search up to the grouped maximum size.
    pub fn attach_grouped<H: TextHost>(&self, host: H, group: impl Into<GroupKey>) -> AutoFit<H> {
        let mut element = self.attach(host);
        element.set_group(Some(group.into()));
        // The setter would adjust; store the bound directly.
        element.state_mut().max_size = self.config.grouped_max_size_px();
        element
    }

    /// Enter teardown: every adjustment clears the cache until
    /// [`end_teardown`](Self::end_teardown).
    pub fn begin_teardown(&self) {
        self.cache.begin_teardown();
    }

    /// Leave teardown.
    pub fn end_teardown(&self) {
        self.cache.end_teardown();
    }

    /// Drop every settled group size.
    pub fn clear(&self) -> usize {
        let removed = self.cache.clear();
        info!(removed, "cleared group cache");
        removed
    }
}
