use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of slide body content, classified at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentLine {
    Text(String),
    /// A request for imagery. Only a placeholder region is reserved;
    /// nothing fetches actual images.
    Image { description: String },
    /// A symbolic icon name to be resolved against the icon catalog.
    Icon { code: String },
}

/// One requested slide. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Non-empty after trimming; blocks that cannot produce a title are
    /// dropped by the parser and never reach here.
    pub title: String,
    pub body: Vec<ContentLine>,
}

/// The closed set of deck themes. Model output names one of the first six;
/// `Default` is the fallback when no token is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Dark,
    Light,
    Corporate,
    Playful,
    Modern,
    Vibrant,
    #[default]
    Default,
}

impl ThemeName {
    /// Themes the model is allowed to pick, i.e. everything except the
    /// fallback.
    pub const RECOGNIZED: [ThemeName; 6] = [
        ThemeName::Dark,
        ThemeName::Light,
        ThemeName::Corporate,
        ThemeName::Playful,
        ThemeName::Modern,
        ThemeName::Vibrant,
    ];

    /// The token exactly as it appears in model output.
    pub fn token(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Corporate => "corporate",
            ThemeName::Playful => "playful",
            ThemeName::Modern => "modern",
            ThemeName::Vibrant => "vibrant",
            ThemeName::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Uppercase hex triplet as used in DrawingML `srgbClr` values.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Parsed deck: ordered slides plus the detected theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub slides: Vec<SlideSpec>,
    pub theme: ThemeName,
}

/// The only artifact surfaced to the caller: a time-limited download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationResult {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_hex_is_uppercase_and_padded() {
        assert_eq!(Rgb(43, 43, 43).hex(), "2B2B2B");
        assert_eq!(Rgb(0, 9, 255).hex(), "0009FF");
    }

    #[test]
    fn recognized_excludes_fallback() {
        assert!(!ThemeName::RECOGNIZED.contains(&ThemeName::Default));
        assert_eq!(ThemeName::default(), ThemeName::Default);
    }
}
