use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Avatar column options.
pub struct AvatarOptions {
    /// Field holding the secondary line (for example an email address).
    pub secondary_field: Option<String>,
    /// Whether the secondary line renders.
    pub show_secondary: bool,
    /// Field holding an image URL.
    pub image_field: Option<String>,
}

/// Render inputs for an avatar plus label cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarView {
    /// Primary label.
    pub name: String,
    /// Upper-cased initials.
    pub initials: String,
    /// Secondary line, present only when enabled and non-empty.
    pub secondary: Option<String>,
    /// Optional image URL.
    pub image: Option<String>,
}

/// First letter of up to two whitespace-separated tokens, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Builds the avatar view model.
pub fn avatar_view(
    name: &str,
    secondary: Option<&str>,
    show_secondary: bool,
    image: Option<&str>,
) -> AvatarView {
    let secondary = secondary
        .filter(|value| show_secondary && !value.trim().is_empty())
        .map(str::to_string);
    AvatarView {
        name: name.to_string(),
        initials: initials(name),
        secondary,
        image: image
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string),
    }
}
