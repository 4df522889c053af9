//! Deck renderer: parsed slides plus a theme in, a fully styled in-memory
//! presentation out. Slides are emitted 1:1 with input order; serialization
//! to bytes is deferred to [`RenderedDeck::into_bytes`].

use quick_xml::escape::escape;

use lectern_common::{ContentLine, DeckSpec, SlideSpec};

use crate::icons::{IconCatalog, ICON_FONT};
use crate::pptx::{RenderedDeck, NS_A, NS_P, NS_R};
use crate::theme::{self, ThemeStyle};

// Two-region layout, EMU (914400 per inch): title on top, body text on the
// left, icon/image placeholders on the right.
const TITLE_X: i64 = 457_200;
const TITLE_Y: i64 = 274_638;
const TITLE_CX: i64 = 8_229_600;
const TITLE_CY: i64 = 1_143_000;
const BODY_X: i64 = 457_200;
const BODY_Y: i64 = 1_371_600;
const BODY_CX: i64 = 3_657_600;
const BODY_CY: i64 = 3_657_600;
const SIDE_X: i64 = 4_114_800;
const SIDE_Y: i64 = 1_371_600;
const SIDE_CX: i64 = 1_828_800;
const SIDE_CY: i64 = 1_828_800;

/// Icon glyphs render at a large fixed size, in hundredths of a point.
const ICON_SIZE: u32 = 7_200;

pub fn render_deck(deck: &DeckSpec, icons: &dyn IconCatalog) -> RenderedDeck {
    let style = theme::lookup(deck.theme);
    let slides = deck
        .slides
        .iter()
        .map(|slide| slide_xml(slide, &style, icons))
        .collect();
    RenderedDeck::new(slides)
}

fn slide_xml(slide: &SlideSpec, style: &ThemeStyle, icons: &dyn IconCatalog) -> String {
    let mut shapes = String::new();
    let mut shape_id = 2u32;

    shapes.push_str(&title_shape(shape_id, &slide.title, style));
    shape_id += 1;

    let paragraphs: String = slide
        .body
        .iter()
        .filter_map(|line| match line {
            ContentLine::Text(text) => Some(text_paragraph(text, style)),
            _ => None,
        })
        .collect();
    shapes.push_str(&body_shape(shape_id, &paragraphs));
    shape_id += 1;

    for line in &slide.body {
        match line {
            ContentLine::Icon { code } => {
                shapes.push_str(&side_shape(shape_id, &icon_paragraph(code, style, icons)));
                shape_id += 1;
            }
            ContentLine::Image { .. } => {
                // Region reserved only; image sourcing is not implemented.
                shapes.push_str(&side_shape(shape_id, "<a:p/>"));
                shape_id += 1;
            }
            ContentLine::Text(_) => {}
        }
    }

    let background = style.background.hex();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
<p:cSld>\
<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{background}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>\
<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
{shapes}\
</p:spTree>\
</p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sld>"
    )
}

/// Run properties carrying the theme: text color, font family, bold when the
/// theme emphasizes.
fn themed_run_props(style: &ThemeStyle) -> String {
    let bold = if style.emphasize { " b=\"1\"" } else { "" };
    let color = style.text.hex();
    let font = escape(style.font);
    format!(
        "<a:rPr lang=\"en-US\" dirty=\"0\"{bold}><a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill><a:latin typeface=\"{font}\"/></a:rPr>"
    )
}

fn title_shape(id: u32, title: &str, style: &ThemeStyle) -> String {
    let props = themed_run_props(style);
    let text = escape(title);
    format!(
        "<p:sp>\
<p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Title {id}\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr><p:ph type=\"title\"/></p:nvPr></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{TITLE_X}\" y=\"{TITLE_Y}\"/><a:ext cx=\"{TITLE_CX}\" cy=\"{TITLE_CY}\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r>{props}<a:t>{text}</a:t></a:r></a:p></p:txBody>\
</p:sp>"
    )
}

fn text_paragraph(text: &str, style: &ThemeStyle) -> String {
    let props = themed_run_props(style);
    let text = escape(text);
    format!("<a:p><a:r>{props}<a:t>{text}</a:t></a:r></a:p>")
}

fn body_shape(id: u32, paragraphs: &str) -> String {
    // txBody requires at least one paragraph.
    let body = if paragraphs.is_empty() { "<a:p/>" } else { paragraphs };
    format!(
        "<p:sp>\
<p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Content {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{BODY_X}\" y=\"{BODY_Y}\"/><a:ext cx=\"{BODY_CX}\" cy=\"{BODY_CY}\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
<p:txBody><a:bodyPr wrap=\"square\"/><a:lstStyle/>{body}</p:txBody>\
</p:sp>"
    )
}

/// Resolved codes become a large bold glyph in the icon font; unresolved
/// codes stay visible as literal text so the slide still renders.
fn icon_paragraph(code: &str, style: &ThemeStyle, icons: &dyn IconCatalog) -> String {
    match icons.resolve(code) {
        Some(glyph) => {
            let color = style.text.hex();
            format!(
                "<a:p><a:r><a:rPr lang=\"en-US\" sz=\"{ICON_SIZE}\" b=\"1\" dirty=\"0\"><a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill><a:latin typeface=\"{ICON_FONT}\"/></a:rPr><a:t>{glyph}</a:t></a:r></a:p>"
            )
        }
        None => {
            tracing::warn!(code, "icon code not in catalog, placing marker text");
            let props = themed_run_props(style);
            let marker = format!("Icon not found: {code}");
            let text = escape(marker.as_str());
            format!("<a:p><a:r>{props}<a:t>{text}</a:t></a:r></a:p>")
        }
    }
}

fn side_shape(id: u32, paragraph: &str) -> String {
    format!(
        "<p:sp>\
<p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Placeholder {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{SIDE_X}\" y=\"{SIDE_Y}\"/><a:ext cx=\"{SIDE_CX}\" cy=\"{SIDE_CY}\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/>{paragraph}</p:txBody>\
</p:sp>"
    )
}
