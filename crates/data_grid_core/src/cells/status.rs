use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Semantic color for a status badge.
pub enum StatusTone {
    /// Positive state.
    Success,
    /// Needs attention.
    Warning,
    /// Failure state.
    Error,
    /// Informational.
    Info,
    /// Neutral fallback for unmapped values.
    #[default]
    Default,
}

impl StatusTone {
    /// Stable `data-ui-tone` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Default => "default",
        }
    }
}

/// Caller-supplied value to tone mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusPalette(BTreeMap<String, StatusTone>);

impl StatusPalette {
    /// Empty palette; every value renders with [`StatusTone::Default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style mapping insert.
    pub fn with(mut self, value: impl Into<String>, tone: StatusTone) -> Self {
        self.0.insert(value.into(), tone);
        self
    }

    /// Tone for `value`. Unmapped values fall back to [`StatusTone::Default`].
    pub fn tone_for(&self, value: &str) -> StatusTone {
        self.0.get(value).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unmapped_values_use_default_tone() {
        let palette = StatusPalette::new()
            .with("active", StatusTone::Success)
            .with("suspended", StatusTone::Error);
        assert_eq!(palette.tone_for("active"), StatusTone::Success);
        assert_eq!(palette.tone_for("archived"), StatusTone::Default);
        assert_eq!(palette.tone_for(""), StatusTone::Default);
    }
}
