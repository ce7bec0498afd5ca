//! Semantic label taxonomy
//!
//! Every region the segmenter emits carries exactly one `Label`. The first
//! sixteen members form the fixed taxonomy with stable integer codes 0-15.
//! `List` and `Unknown` extend it for the list rule and for tags no rule
//! recognizes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overlay palette indexed by label code
///
/// Twenty entries, so the extension codes (16, 17) have colors as well.
pub const PALETTE: [&str; 20] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#808080",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Label {
    Text = 0,
    Code = 1,
    Link = 2,
    Image = 3,
    Video = 4,
    Audio = 5,
    Button = 6,
    Input = 7,
    Form = 8,
    Quote = 9,
    Custom = 10,
    Icon = 11,
    Header = 12,
    Submit = 13,
    Footer = 14,
    Nav = 15,
    /// Tables and list containers
    List = 16,
    /// No rule matched; the region keeps its raw tag name
    Unknown = 17,
}

impl Label {
    /// All labels in code order
    pub const ALL: [Label; 18] = [
        Label::Text,
        Label::Code,
        Label::Link,
        Label::Image,
        Label::Video,
        Label::Audio,
        Label::Button,
        Label::Input,
        Label::Form,
        Label::Quote,
        Label::Custom,
        Label::Icon,
        Label::Header,
        Label::Submit,
        Label::Footer,
        Label::Nav,
        Label::List,
        Label::Unknown,
    ];

    /// Stable integer code used in serialized records
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Upper-case display name drawn next to overlay rectangles
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Code => "CODE",
            Self::Link => "LINK",
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Audio => "AUDIO",
            Self::Button => "BUTTON",
            Self::Input => "INPUT",
            Self::Form => "FORM",
            Self::Quote => "QUOTE",
            Self::Custom => "CUSTOM",
            Self::Icon => "ICON",
            Self::Header => "HEADER",
            Self::Submit => "SUBMIT",
            Self::Footer => "FOOTER",
            Self::Nav => "NAV",
            Self::List => "LIST",
            Self::Unknown => "UNKNOWN",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        PALETTE[usize::from(self.code())]
    }

    /// Custom elements are labeled but never drawn
    #[must_use]
    pub fn is_visualized(self) -> bool {
        self != Self::Custom
    }

    /// Labels that map one-to-one onto a tag name when no other rule matches
    pub(crate) fn from_fallback_tag(tag: &str) -> Option<Self> {
        match tag {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "form" => Some(Self::Form),
            "nav" => Some(Self::Nav),
            "footer" => Some(Self::Footer),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(Label::Text.code(), 0);
        assert_eq!(Label::Icon.code(), 11);
        assert_eq!(Label::Header.code(), 12);
        assert_eq!(Label::Nav.code(), 15);
        assert_eq!(Label::List.code(), 16);
        assert_eq!(Label::Unknown.code(), 17);
    }

    #[test]
    fn test_from_code_matches_all_order() {
        for (index, label) in Label::ALL.iter().enumerate() {
            assert_eq!(Label::from_code(index as u8), Some(*label));
        }
        assert_eq!(Label::from_code(18), None);
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(Label::Text.color(), "#e6194b");
        assert_eq!(Label::Image.color(), "#4363d8");
        assert_eq!(Label::Unknown.color(), "#ffd8b1");
    }

    #[test]
    fn test_custom_is_not_visualized() {
        assert!(!Label::Custom.is_visualized());
        assert!(Label::Button.is_visualized());
    }
}
