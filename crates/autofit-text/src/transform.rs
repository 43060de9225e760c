#![forbid(unsafe_code)]

//! Display transforms applied to text before it is measured.

use std::borrow::Cow;

/// How the host renders text relative to its stored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextTransform {
    /// Render as stored.
    #[default]
    None,
    /// Render in upper case.
    AllCaps,
}

impl TextTransform {
    /// Apply the transform, borrowing when nothing changes.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::None => Cow::Borrowed(text),
            Self::AllCaps => {
                if text.chars().any(char::is_lowercase) {
                    Cow::Owned(text.to_uppercase())
                } else {
                    Cow::Borrowed(text)
                }
            }
        }
    }
}
