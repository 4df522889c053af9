//! Outline parser: semi-structured model output in, ordered slide records
//! plus a detected theme out. Malformed blocks are skipped, never fatal to
//! the whole deck.

use thiserror::Error;

use lectern_common::{ContentLine, DeckSpec, SlideSpec, ThemeName};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("model output contained no usable slide blocks")]
    NoSlides,
}

#[derive(Debug, Clone)]
pub struct ParsedOutline {
    pub deck: DeckSpec,
    /// Blocks dropped during parsing, surfaced for diagnostics.
    pub skipped_blocks: usize,
}

pub fn parse_outline(raw: &str) -> Result<ParsedOutline, OutlineError> {
    let text = raw.replace("\r\n", "\n");
    let blocks: Vec<&str> = text.split("\n\n").collect();
    let (theme, theme_block) = detect_theme(&blocks);

    let mut slides = Vec::new();
    let mut skipped_blocks = 0usize;
    for (index, block) in blocks.iter().enumerate() {
        // A lone prose line naming the theme is the theme declaration, not
        // a slide. Tokens inside multi-line slide blocks are just styling
        // prose and only get stripped.
        if theme_block == Some(index) && block.trim().lines().count() == 1 {
            continue;
        }
        let block = strip_theme_tokens(block);
        if block.trim().is_empty() {
            continue;
        }
        match parse_block(&block) {
            Some(slide) => slides.push(slide),
            None => {
                skipped_blocks += 1;
                tracing::warn!(block = %block.trim(), "skipping slide block without a title");
            }
        }
    }

    if slides.is_empty() {
        return Err(OutlineError::NoSlides);
    }
    Ok(ParsedOutline {
        deck: DeckSpec { slides, theme },
        skipped_blocks,
    })
}

/// First recognized theme token (by position, case-sensitive) wins. Returns
/// the theme and the index of the block carrying that first occurrence; no
/// token anywhere means the default theme.
fn detect_theme(blocks: &[&str]) -> (ThemeName, Option<usize>) {
    for (index, block) in blocks.iter().enumerate() {
        let mut earliest: Option<(usize, ThemeName)> = None;
        for theme in ThemeName::RECOGNIZED {
            if let Some(pos) = block.find(theme.token()) {
                if earliest.map_or(true, |(best, _)| pos < best) {
                    earliest = Some((pos, theme));
                }
            }
        }
        if let Some((_, theme)) = earliest {
            return (theme, Some(index));
        }
    }
    (ThemeName::Default, None)
}

/// Every occurrence of every recognized token is removed, not just the
/// detected one.
fn strip_theme_tokens(block: &str) -> String {
    let mut cleaned = block.to_string();
    for theme in ThemeName::RECOGNIZED {
        cleaned = cleaned.replace(theme.token(), "");
    }
    cleaned
}

/// One block, one slide. The first line is the title (text after the first
/// colon, or the whole line); a block whose title trims to nothing is
/// unusable.
fn parse_block(block: &str) -> Option<SlideSpec> {
    let mut lines = block.lines();
    let first = lines.next()?;
    let title = match first.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => first.trim(),
    };
    if title.is_empty() {
        return None;
    }

    let mut body = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("Icon:") {
            body.push(ContentLine::Icon {
                code: rest.trim().to_string(),
            });
        } else if let Some(rest) = line.strip_prefix("Image:") {
            body.push(ContentLine::Image {
                description: rest.trim().to_string(),
            });
        } else if let Some(rest) = line.strip_prefix("Image Placeholder") {
            // Older outline grammar; the marker may carry a trailing
            // description after a colon.
            body.push(ContentLine::Image {
                description: rest.trim_start_matches(':').trim().to_string(),
            });
        } else {
            body.push(ContentLine::Text(line.to_string()));
        }
    }

    Some(SlideSpec {
        title: title.to_string(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_blocks_with_theme_token() {
        let raw = "Heading: Intro\nSub-point 1: Welcome\n\nHeading: Summary\nSub-point 1: Thanks\n\nThis lesson uses a corporate theme.";
        let parsed = parse_outline(raw).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.theme, ThemeName::Corporate);
        assert_eq!(parsed.skipped_blocks, 0);

        let titles: Vec<&str> = parsed.deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Intro", "Summary"]);
        for slide in &parsed.deck.slides {
            assert_eq!(slide.body.len(), 1);
            assert!(matches!(slide.body[0], ContentLine::Text(_)));
        }
    }

    #[test]
    fn lone_theme_sentence_is_a_declaration_not_a_slide() {
        // The declaration block disappears entirely; it is neither a slide
        // nor a skipped-block diagnostic.
        let raw = "Use the playful theme for this one.\n\nHeading: Recess\nSub-point 1: games";
        let parsed = parse_outline(raw).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.theme, ThemeName::Playful);
        assert_eq!(parsed.skipped_blocks, 0);
        assert_eq!(parsed.deck.slides.len(), 1);
        assert_eq!(parsed.deck.slides[0].title, "Recess");
    }

    #[test]
    fn token_inside_a_real_slide_block_keeps_the_slide() {
        let raw = "Heading: Contrast\nSub-point 1: dark colors absorb heat\n\nHeading: Close";
        let parsed = parse_outline(raw).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.theme, ThemeName::Dark);
        let titles: Vec<&str> = parsed.deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Contrast", "Close"]);
        // The token itself is stripped from the surviving body line.
        assert_eq!(
            parsed.deck.slides[0].body[0],
            ContentLine::Text("Sub-point 1:  colors absorb heat".into())
        );
    }

    #[test]
    fn no_token_falls_back_to_default() {
        let parsed = parse_outline("1. Slide: Intro\nSub-point 1: hello")
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.theme, ThemeName::Default);
        assert_eq!(parsed.deck.slides[0].title, "Intro");
    }

    #[test]
    fn first_token_by_position_wins_and_all_are_stripped() {
        let raw = "Title: Colors\nA vibrant start\n\nPick the dark theme, not the light one.";
        let parsed = parse_outline(raw).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.theme, ThemeName::Vibrant);
        for slide in &parsed.deck.slides {
            for line in &slide.body {
                if let ContentLine::Text(text) = line {
                    assert!(!text.contains("vibrant"));
                    assert!(!text.contains("dark"));
                    assert!(!text.contains("light"));
                }
            }
        }
    }

    #[test]
    fn theme_detection_is_case_sensitive() {
        let parsed = parse_outline("Heading: Intro\nDark mode is great").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.theme, ThemeName::Default);
    }

    #[test]
    fn untitled_block_is_dropped_but_siblings_survive() {
        let raw = "Heading: First\n\n:\nSub-point 1: orphan\n\nHeading: Third";
        let parsed = parse_outline(raw).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.skipped_blocks, 1);
        let titles: Vec<&str> = parsed.deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["First", "Third"]);
    }

    #[test]
    fn title_without_colon_is_the_whole_line() {
        let parsed = parse_outline("Photosynthesis\nSub-point 1: sunshine in").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.slides[0].title, "Photosynthesis");
        assert_eq!(parsed.deck.theme, ThemeName::Default);
    }

    #[test]
    fn body_lines_are_classified_in_order() {
        let raw = "Heading: Cells\nSub-point 1: Membrane\nIcon: microscope\nImage: a labelled cell diagram\nImage Placeholder: mitochondria\nSub-point 2: Nucleus";
        let parsed = parse_outline(raw).unwrap_or_else(|e| panic!("{e}"));
        let body = &parsed.deck.slides[0].body;
        assert_eq!(body.len(), 5);
        assert_eq!(body[0], ContentLine::Text("Sub-point 1: Membrane".into()));
        assert_eq!(body[1], ContentLine::Icon { code: "microscope".into() });
        assert_eq!(
            body[2],
            ContentLine::Image { description: "a labelled cell diagram".into() }
        );
        assert_eq!(
            body[3],
            ContentLine::Image { description: "mitochondria".into() }
        );
        assert_eq!(body[4], ContentLine::Text("Sub-point 2: Nucleus".into()));
    }

    #[test]
    fn blank_only_input_has_no_slides() {
        assert_eq!(parse_outline("\n\n  \n\n").unwrap_err(), OutlineError::NoSlides);
        assert_eq!(parse_outline("").unwrap_err(), OutlineError::NoSlides);
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let parsed = parse_outline("Heading: A\r\nSub-point 1: x\r\n\r\nHeading: B")
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed.deck.slides.len(), 2);
    }
}
