#![forbid(unsafe_code)]

//! Sizing configuration.
//!
//! Font size bounds are expressed in scale-independent pixels (sp) and turned
//! into device pixels with the display's scaled density, so the same config
//! gives visually equal bounds across displays.
//!
//! # Environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `AUTOFIT_MIN_SIZE_SP` | [`SizingConfig::min_size_sp`] |
//! | `AUTOFIT_MAX_SIZE_SP` | [`SizingConfig::max_size_sp`] |
//! | `AUTOFIT_GROUPED_MAX_SIZE_SP` | [`SizingConfig::grouped_max_size_sp`] |
//! | `AUTOFIT_SCALED_DENSITY` | [`SizingConfig::scaled_density`] |
//!
//! # Example
//! ```
//! use autofit_core::SizingConfig;
//!
//! let config = SizingConfig::default().scaled_density(2.0);
//! assert_eq!(config.min_size_px(), 14);
//! assert_eq!(config.max_size_px(), 198);
//! ```

use std::fmt;

/// Environment key for the minimum size.
pub const ENV_MIN_SIZE_SP: &str = "AUTOFIT_MIN_SIZE_SP";
/// Environment key for the maximum size.
pub const ENV_MAX_SIZE_SP: &str = "AUTOFIT_MAX_SIZE_SP";
/// Environment key for the maximum size of grouped elements.
pub const ENV_GROUPED_MAX_SIZE_SP: &str = "AUTOFIT_GROUPED_MAX_SIZE_SP";
/// Environment key for the display density.
pub const ENV_SCALED_DENSITY: &str = "AUTOFIT_SCALED_DENSITY";

/// Font face style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// Font description handed to the text measurer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Family name, e.g. `"NotoSans"`.
    pub family: String,
    /// Face style.
    pub style: FontStyle,
}

impl FontSpec {
    /// Create a font spec with the normal style.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: FontStyle::Normal,
        }
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("NotoSans")
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value could not be parsed as a number.
    Invalid { key: &'static str, value: String },
    /// A value was zero, negative or not finite.
    NonPositive { key: &'static str },
    /// The minimum size exceeds the maximum size.
    InvertedRange { min: f32, max: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { key, value } => write!(f, "{key}: cannot parse {value:?} as a number"),
            Self::NonPositive { key } => write!(f, "{key}: value must be finite and positive"),
            Self::InvertedRange { min, max } => {
                write!(f, "minimum size {min}sp exceeds maximum size {max}sp")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bounds and defaults applied to every element of a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingConfig {
    /// Smallest font size the search may return, in sp.
    pub min_size_sp: f32,
    /// Exclusive upper bound of the search, in sp.
    pub max_size_sp: f32,
    /// Upper bound used for elements attached with a group key, in sp.
    pub grouped_max_size_sp: f32,
    /// Pixels per sp.
    pub scaled_density: f32,
    /// Font assigned to newly attached elements.
    pub font: FontSpec,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_size_sp: 7.0,
            max_size_sp: 99.0,
            grouped_max_size_sp: 13.0,
            scaled_density: 1.0,
            font: FontSpec::default(),
        }
    }
}

impl SizingConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum size in sp.
    #[must_use]
    pub fn min_size_sp(mut self, sp: f32) -> Self {
        self.min_size_sp = sp;
        self
    }

    /// Set the maximum size in sp.
    #[must_use]
    pub fn max_size_sp(mut self, sp: f32) -> Self {
        self.max_size_sp = sp;
        self
    }

    /// Set the maximum size for grouped elements in sp.
    #[must_use]
    pub fn grouped_max_size_sp(mut self, sp: f32) -> Self {
        self.grouped_max_size_sp = sp;
        self
    }

    /// Set the display density.
    #[must_use]
    pub fn scaled_density(mut self, density: f32) -> Self {
        self.scaled_density = density;
        self
    }

    /// Set the default font.
    #[must_use]
    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Minimum size in device pixels.
    #[must_use]
    pub fn min_size_px(&self) -> u32 {
        sp_to_px(self.min_size_sp, self.scaled_density)
    }

    /// Maximum size in device pixels.
    #[must_use]
    pub fn max_size_px(&self) -> u32 {
        sp_to_px(self.max_size_sp, self.scaled_density)
    }

    /// Maximum size for grouped elements in device pixels.
    #[must_use]
    pub fn grouped_max_size_px(&self) -> u32 {
        sp_to_px(self.grouped_max_size_sp, self.scaled_density)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            (ENV_MIN_SIZE_SP, self.min_size_sp),
            (ENV_MAX_SIZE_SP, self.max_size_sp),
            (ENV_GROUPED_MAX_SIZE_SP, self.grouped_max_size_sp),
            (ENV_SCALED_DENSITY, self.scaled_density),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { key });
            }
        }
        if self.min_size_sp > self.max_size_sp {
            return Err(ConfigError::InvertedRange {
                min: self.min_size_sp,
                max: self.max_size_sp,
            });
        }
        Ok(())
    }

    /// Defaults overridden by `AUTOFIT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    ///
    /// Unset keys keep their defaults; set keys must parse and validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_key(&lookup, ENV_MIN_SIZE_SP)? {
            config.min_size_sp = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_MAX_SIZE_SP)? {
            config.max_size_sp = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_GROUPED_MAX_SIZE_SP)? {
            config.grouped_max_size_sp = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_SCALED_DENSITY)? {
            config.scaled_density = v;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_key<F>(lookup: &F, key: &'static str) -> Result<Option<f32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f32>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

/// Truncating conversion, matching how hosts round dimension units.
#[inline]
fn sp_to_px(sp: f32, density: f32) -> u32 {
    let px = sp * density;
    if px.is_finite() && px > 0.0 {
        px as u32
    } else {
        0
    }
}
