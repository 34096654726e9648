//! Density presets and theme-mode tokens consumed by every grid component.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Named presentation preset controlling row/header height, type size, and icon sizing.
pub enum Density {
    /// Tight rows for dense data.
    Compact,
    /// Default spacing.
    #[default]
    Standard,
    /// Roomy rows.
    Comfortable,
}

/// Fixed sizing values for one [`Density`] preset. All lengths are CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityTokens {
    /// Body row height.
    pub row_height: u32,
    /// Column header height.
    pub header_height: u32,
    /// Body font size.
    pub font_size: f32,
    /// Inline icon size.
    pub icon_size: u32,
    /// Avatar diameter.
    pub avatar_size: u32,
    /// Horizontal cell padding.
    pub cell_padding_x: u32,
    /// Status chip height.
    pub chip_height: u32,
}

const COMPACT: DensityTokens = DensityTokens {
    row_height: 36,
    header_height: 40,
    font_size: 13.0,
    icon_size: 18,
    avatar_size: 24,
    cell_padding_x: 8,
    chip_height: 20,
};

const STANDARD: DensityTokens = DensityTokens {
    row_height: 52,
    header_height: 56,
    font_size: 14.0,
    icon_size: 20,
    avatar_size: 32,
    cell_padding_x: 16,
    chip_height: 24,
};

const COMFORTABLE: DensityTokens = DensityTokens {
    row_height: 68,
    header_height: 64,
    font_size: 15.0,
    icon_size: 24,
    avatar_size: 40,
    cell_padding_x: 20,
    chip_height: 28,
};

impl Density {
    /// Every preset in selector order.
    pub const ALL: [Density; 3] = [Self::Compact, Self::Standard, Self::Comfortable];

    /// Sizing table for this preset.
    pub const fn tokens(self) -> &'static DensityTokens {
        match self {
            Self::Compact => &COMPACT,
            Self::Standard => &STANDARD,
            Self::Comfortable => &COMFORTABLE,
        }
    }

    /// Stable `data-ui-density` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Comfortable => "comfortable",
        }
    }

    /// Human-readable label for the density selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Standard => "Standard",
            Self::Comfortable => "Comfortable",
        }
    }

    /// Next preset in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Compact => Self::Standard,
            Self::Standard => Self::Comfortable,
            Self::Comfortable => Self::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Light/dark flag forwarded from the design-token collaborator.
pub enum ThemeMode {
    /// Light surfaces.
    #[default]
    Light,
    /// Dark surfaces.
    Dark,
}

impl ThemeMode {
    /// Stable `data-ui-theme` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_grow_monotonically() {
        let heights = Density::ALL.map(|density| density.tokens().row_height);
        assert!(heights[0] < heights[1] && heights[1] < heights[2]);
    }

    #[test]
    fn next_wraps_after_comfortable() {
        assert_eq!(Density::Comfortable.next(), Density::Compact);
        assert_eq!(Density::default(), Density::Standard);
    }
}
