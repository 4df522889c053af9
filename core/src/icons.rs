//! Static icon catalog: Font Awesome 5 Free (solid) names to private-use
//! glyphs. Lookup misses are the renderer's soft-failure path, never an
//! error here.

use phf::phf_map;

pub trait IconCatalog: Send + Sync {
    fn resolve(&self, code: &str) -> Option<char>;
}

/// Name of the font the resolved glyphs render in.
pub const ICON_FONT: &str = "Font Awesome 5 Free";

// The slice of the catalog that actually shows up in lesson outlines.
static SOLID_GLYPHS: phf::Map<&'static str, char> = phf_map! {
    "atom" => '\u{f5d2}',
    "bolt" => '\u{f0e7}',
    "book" => '\u{f02d}',
    "brain" => '\u{f5dc}',
    "calculator" => '\u{f1ec}',
    "calendar" => '\u{f073}',
    "camera" => '\u{f030}',
    "chart-bar" => '\u{f080}',
    "check" => '\u{f00c}',
    "clock" => '\u{f017}',
    "cloud" => '\u{f0c2}',
    "code" => '\u{f121}',
    "database" => '\u{f1c0}',
    "dna" => '\u{f471}',
    "fire" => '\u{f06d}',
    "flask" => '\u{f0c3}',
    "globe" => '\u{f0ac}',
    "graduation-cap" => '\u{f19d}',
    "handshake" => '\u{f2b5}',
    "heart" => '\u{f004}',
    "landmark" => '\u{f66f}',
    "laptop" => '\u{f109}',
    "leaf" => '\u{f06c}',
    "lightbulb" => '\u{f0eb}',
    "map" => '\u{f279}',
    "microscope" => '\u{f610}',
    "money-bill" => '\u{f0d6}',
    "music" => '\u{f001}',
    "pencil-alt" => '\u{f303}',
    "puzzle-piece" => '\u{f12e}',
    "question" => '\u{f128}',
    "rocket" => '\u{f135}',
    "seedling" => '\u{f4d8}',
    "shield-alt" => '\u{f3ed}',
    "star" => '\u{f005}',
    "sun" => '\u{f185}',
    "tree" => '\u{f1bb}',
    "trophy" => '\u{f091}',
    "users" => '\u{f0c0}',
    "water" => '\u{f773}',
};

#[derive(Debug, Default, Clone, Copy)]
pub struct FontAwesome;

impl IconCatalog for FontAwesome {
    fn resolve(&self, code: &str) -> Option<char> {
        SOLID_GLYPHS.get(code.trim()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(FontAwesome.resolve("book"), Some('\u{f02d}'));
        assert_eq!(FontAwesome.resolve(" graduation-cap "), Some('\u{f19d}'));
    }

    #[test]
    fn unknown_codes_miss() {
        assert_eq!(FontAwesome.resolve("definitely-not-an-icon"), None);
        assert_eq!(FontAwesome.resolve(""), None);
    }
}
