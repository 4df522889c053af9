//! Theme catalog: a total mapping from theme name to visual style.

use lectern_common::{Rgb, ThemeName};

/// Visual style for a deck theme. Pure lookup value, one per [`ThemeName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub background: Rgb,
    pub text: Rgb,
    pub font: &'static str,
    /// Bold every text run when set.
    pub emphasize: bool,
}

/// Total over the closed enumeration; there is no error path.
pub fn lookup(theme: ThemeName) -> ThemeStyle {
    match theme {
        ThemeName::Dark => ThemeStyle {
            background: Rgb(43, 43, 43),
            text: Rgb(255, 255, 255),
            font: "Calibri",
            emphasize: false,
        },
        ThemeName::Light | ThemeName::Default => ThemeStyle {
            background: Rgb(239, 239, 239),
            text: Rgb(32, 32, 32),
            font: "Calibri",
            emphasize: false,
        },
        ThemeName::Corporate => ThemeStyle {
            background: Rgb(46, 117, 182),
            text: Rgb(255, 255, 255),
            font: "Arial",
            emphasize: true,
        },
        ThemeName::Playful => ThemeStyle {
            background: Rgb(255, 204, 102),
            text: Rgb(32, 32, 32),
            font: "Comic Sans MS",
            emphasize: false,
        },
        ThemeName::Modern => ThemeStyle {
            background: Rgb(45, 62, 80),
            text: Rgb(255, 255, 255),
            font: "Segoe UI",
            emphasize: true,
        },
        ThemeName::Vibrant => ThemeStyle {
            background: Rgb(236, 98, 128),
            text: Rgb(255, 255, 255),
            font: "Verdana",
            emphasize: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total() {
        let mut all: Vec<ThemeName> = ThemeName::RECOGNIZED.to_vec();
        all.push(ThemeName::Default);
        for theme in all {
            // Every member has a style; font is never empty.
            assert!(!lookup(theme).font.is_empty());
        }
    }

    #[test]
    fn corporate_is_bold_on_blue() {
        let style = lookup(ThemeName::Corporate);
        assert_eq!(style.background, Rgb(46, 117, 182));
        assert_eq!(style.font, "Arial");
        assert!(style.emphasize);
    }

    #[test]
    fn default_matches_light() {
        assert_eq!(lookup(ThemeName::Default), lookup(ThemeName::Light));
    }
}
