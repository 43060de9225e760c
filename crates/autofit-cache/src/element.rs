#![forbid(unsafe_code)]

//! The autofit element driver.
//!
//! [`AutoFit`] wraps a [`TextHost`] (the widget that actually draws text) and
//! keeps its font size fitted to the space the host was laid out in. Hosts
//! forward their change notifications (`on_text_changed`, `request_layout`,
//! the text-attribute setters); each one may trigger
//! [`AutoFit::adjust_if_required`].
//!
//! # Adjustment
//!
//! 1) Not attached, or empty text: nothing happens.
//! 2) Scope tearing down: the group cache is cleared first.
//! 3) Grouped element that owns no cache entry, with a settled group size:
//!    adopt it.
//! 4) Nothing resolved yet, or dynamic: search the content box (measured
//!    size minus padding) and record the result for the group. A content box
//!    with no width skips the adjustment entirely.
//! 5) Otherwise reapply the resolved size.

use std::fmt;
use std::sync::Arc;

use autofit_core::{ContentBox, FontSpec, Sides, SizingConfig};
use autofit_search::{LineLimit, SearchOutcome, SizingContext, fit_text};
use autofit_text::{LineSpacing, TextMeasurer, TextTransform};
use tracing::{debug, debug_span, info};

use crate::group::{ElementId, GroupKey, ResultCache};
use crate::state::{Decision, ElementSizingState};

/// The widget side of an autofit element.
pub trait TextHost {
    /// Stored text, before display transforms.
    fn text(&self) -> &str;

    /// Size the host was laid out at, in pixels.
    fn measured_size(&self) -> (i32, i32);

    /// Padding between the host's bounds and its text.
    fn padding(&self) -> Sides;

    /// Font size currently applied, in pixels.
    fn font_size_px(&self) -> u32;

    /// Apply a font size in pixels.
    fn set_font_size_px(&mut self, px: u32);
}

/// Where a resolved size came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    /// Adopted from another member of the group.
    Group,
    /// Found by a search; `exact` when the oracle accepted it outright.
    Searched { exact: bool },
    /// Reapplied from an earlier resolution.
    Reused,
}

/// Size applied by an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub size: u32,
    pub source: SizeSource,
}

/// Keeps a host's font size fitted to its bounds.
pub struct AutoFit<H> {
    id: ElementId,
    host: Option<H>,
    state: ElementSizingState,
    cache: Arc<ResultCache>,
    measurer: Arc<dyn TextMeasurer>,
    font: FontSpec,
    transform: TextTransform,
    max_lines: LineLimit,
    spacing: LineSpacing,
}

impl<H: fmt::Debug> fmt::Debug for AutoFit<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoFit")
            .field("id", &self.id)
            .field("host", &self.host)
            .field("state", &self.state)
            .field("font", &self.font)
            .field("transform", &self.transform)
            .field("max_lines", &self.max_lines)
            .field("spacing", &self.spacing)
            .finish_non_exhaustive()
    }
}

impl<H: TextHost> AutoFit<H> {
    /// Create a detached element using `config` for bounds and font.
    pub fn new(
        cache: Arc<ResultCache>,
        measurer: Arc<dyn TextMeasurer>,
        config: &SizingConfig,
    ) -> Self {
        Self {
            id: ElementId::next(),
            host: None,
            state: ElementSizingState::new(config.min_size_px(), config.max_size_px()),
            cache,
            measurer,
            font: config.font.clone(),
            transform: TextTransform::None,
            max_lines: LineLimit::Unlimited,
            spacing: LineSpacing::NORMAL,
        }
    }

    /// Identity used in the group cache.
    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Current sizing state.
    #[inline]
    pub fn state(&self) -> &ElementSizingState {
        &self.state
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut ElementSizingState {
        &mut self.state
    }

    /// Size from the last search or adoption.
    #[inline]
    pub fn resolved_size(&self) -> Option<u32> {
        self.state.resolved
    }

    /// The attached host.
    #[inline]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// The attached host, mutably.
    #[inline]
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Check whether a host is attached.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// The shared group cache.
    #[inline]
    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Font used for measurement.
    #[inline]
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Current line limit.
    #[inline]
    pub fn max_lines(&self) -> LineLimit {
        self.max_lines
    }

    /// Current line spacing.
    #[inline]
    pub fn line_spacing(&self) -> LineSpacing {
        self.spacing
    }

    /// Attach a host, returning the one it replaces. The new host starts
    /// with nothing resolved.
    pub fn attach(&mut self, host: H) -> Option<H> {
        self.state.resolved = None;
        self.host.replace(host)
    }

    /// Detach and return the host.
    pub fn detach(&mut self) -> Option<H> {
        self.host.take()
    }

    /// The host's text changed.
    pub fn on_text_changed(&mut self) -> Option<Resolution> {
        self.adjust_if_required()
    }

    /// The host was resized. Adjusts only when the size really changed.
    pub fn on_size_changed(&mut self, new: (i32, i32), old: (i32, i32)) -> Option<Resolution> {
        if new == old {
            return None;
        }
        self.adjust_if_required()
    }

    /// The host is about to be laid out.
    pub fn request_layout(&mut self) -> Option<Resolution> {
        self.adjust_if_required()
    }

    /// Render text in upper case (or not).
    pub fn set_all_caps(&mut self, all_caps: bool) -> Option<Resolution> {
        self.transform = if all_caps {
            TextTransform::AllCaps
        } else {
            TextTransform::None
        };
        self.adjust_if_required()
    }

    /// Change the measurement font.
    pub fn set_typeface(&mut self, font: FontSpec) -> Option<Resolution> {
        self.font = font;
        self.adjust_if_required()
    }

    /// Apply an explicit size to the host. Only adjusts while nothing has
    /// been resolved yet.
    pub fn set_text_size(&mut self, px: u32) -> Option<Resolution> {
        if let Some(host) = self.host.as_mut() {
            host.set_font_size_px(px);
        }
        if self.state.resolved.is_some() {
            return None;
        }
        self.adjust_if_required()
    }

    /// Limit the number of lines; zero or negative means no limit.
    pub fn set_max_lines(&mut self, max_lines: i32) -> Option<Resolution> {
        self.max_lines = LineLimit::from_raw(max_lines);
        self.adjust_if_required()
    }

    /// Same as [`set_max_lines`](Self::set_max_lines).
    pub fn set_lines(&mut self, lines: i32) -> Option<Resolution> {
        self.set_max_lines(lines)
    }

    /// Switch between one line and no line limit.
    pub fn set_single_line(&mut self, single_line: bool) -> Option<Resolution> {
        self.max_lines = if single_line {
            LineLimit::SINGLE
        } else {
            LineLimit::Unlimited
        };
        self.adjust_if_required()
    }

    /// Store line spacing for the next adjustment.
    pub fn set_line_spacing(&mut self, add: f32, multiplier: f32) {
        self.spacing = LineSpacing::new(multiplier, add);
    }

    /// Change the lower search bound, in px.
    pub fn set_min_text_size(&mut self, px: u32) -> Option<Resolution> {
        self.state.min_size = px;
        self.adjust_if_required()
    }

    /// Change the exclusive upper search bound, in px.
    pub fn set_max_text_size(&mut self, px: u32) -> Option<Resolution> {
        self.state.max_size = px;
        self.adjust_if_required()
    }

    /// Search again on every adjustment.
    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.state.dynamic = dynamic;
    }

    /// Join or leave a group.
    pub fn set_group(&mut self, group: Option<GroupKey>) {
        self.state.group = group;
    }

    /// Resolve and apply a font size if the element is ready.
    ///
    /// Returns `None` when nothing was applied: detached, empty text, or a
    /// content box with no width.
    pub fn adjust_if_required(&mut self) -> Option<Resolution> {
        let _span = debug_span!("autofit_adjust", element = self.id.get()).entered();

        let host = match self.host.as_ref() {
            Some(host) if !host.text().is_empty() => host,
            Some(_) => {
                debug!("empty text, skipping");
                return None;
            }
            None => {
                debug!("not attached, skipping");
                return None;
            }
        };

        if self.cache.is_tearing_down() {
            let removed = self.cache.clear();
            info!(removed, "scope tearing down, cleared group cache");
        }

        let resolution = match self.state.plan(self.id, &self.cache) {
            Decision::AdoptGroup(size) => {
                debug!(size, group = ?self.state.group, "adopted group size");
                self.state.resolved = Some(size);
                Resolution {
                    size,
                    source: SizeSource::Group,
                }
            }
            Decision::Search => {
                let (width, height) = host.measured_size();
                let content = ContentBox::from_measured(width, height, host.padding());
                if content.is_degenerate() {
                    debug!(
                        width = content.width,
                        height = content.height,
                        "no horizontal room, skipping"
                    );
                    return None;
                }
                let ctx = self.sizing_context(host.text(), content);
                let outcome = fit_text(
                    &*self.measurer,
                    self.state.min_size,
                    self.state.max_size,
                    &ctx,
                );
                self.settle(outcome)
            }
            Decision::Reuse(size) => Resolution {
                size,
                source: SizeSource::Reused,
            },
        };

        if let Some(host) = self.host.as_mut() {
            host.set_font_size_px(resolution.size);
        }
        Some(resolution)
    }

    fn sizing_context(&self, text: &str, content: ContentBox) -> SizingContext {
        SizingContext::new(self.transform.apply(text), content.to_extent())
            .max_lines(self.max_lines)
            .spacing(self.spacing)
            .font(self.font.clone())
    }

    fn settle(&mut self, outcome: SearchOutcome) -> Resolution {
        self.state.resolved = Some(outcome.size);
        if outcome.exact {
            debug!(size = outcome.size, "exact fit, group cache untouched");
        } else if let Some(group) = &self.state.group {
            let recorded = self.cache.record(group.clone(), self.id, outcome.size);
            debug!(%group, size = outcome.size, ?recorded, "recorded group size");
        }
        Resolution {
            size: outcome.size,
            source: SizeSource::Searched {
                exact: outcome.exact,
            },
        }
    }
}
