//! Minimal OOXML presentation writer: one master, one layout, one slide part
//! per parsed slide, zipped into an OPC package. Only the parts PowerPoint
//! needs to open the file are emitted.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

// 4:3 deck, EMU.
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 6_858_000;

#[derive(Debug, Error)]
pub enum PptxError {
    #[error("package write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("package buffer write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully styled in-memory deck. Serialization to bytes happens only on
/// [`RenderedDeck::into_bytes`], after every slide is assembled.
#[derive(Debug)]
pub struct RenderedDeck {
    slides: Vec<String>,
}

impl RenderedDeck {
    pub(crate) fn new(slides: Vec<String>) -> Self {
        Self { slides }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub(crate) fn slides(&self) -> &[String] {
        &self.slides
    }

    /// Serialize the whole deck into a `.pptx` byte buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>, PptxError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let n = self.slides.len();

        let part = |zip: &mut ZipWriter<Cursor<Vec<u8>>>,
                        name: &str,
                        body: &str|
         -> Result<(), PptxError> {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
            Ok(())
        };

        part(&mut zip, "[Content_Types].xml", &content_types(n))?;
        part(&mut zip, "_rels/.rels", &root_rels())?;
        part(&mut zip, "ppt/presentation.xml", &presentation_xml(n))?;
        part(&mut zip, "ppt/_rels/presentation.xml.rels", &presentation_rels(n))?;
        part(&mut zip, "ppt/slideMasters/slideMaster1.xml", &slide_master_xml())?;
        part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &master_rels(),
        )?;
        part(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &slide_layout_xml())?;
        part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &layout_rels(),
        )?;
        part(&mut zip, "ppt/theme/theme1.xml", &theme_xml())?;
        for (index, slide) in self.slides.iter().enumerate() {
            let number = index + 1;
            part(&mut zip, &format!("ppt/slides/slide{number}.xml"), slide)?;
            part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{number}.xml.rels"),
                &slide_rels(),
            )?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

fn content_types(slide_count: usize) -> String {
    let mut overrides = String::new();
    for number in 1..=slide_count {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{number}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }
    format!(
        "{XML_DECL}<Types xmlns=\"{NS_CT}\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
<Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
{overrides}</Types>"
    )
}

fn root_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_R}/officeDocument\" Target=\"ppt/presentation.xml\"/>\
</Relationships>"
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for number in 1..=slide_count {
        // rId1 is the master; slides start at rId2. Slide ids must be >= 256.
        let slide_id = 255 + number;
        let r_id = number + 1;
        slide_ids.push_str(&format!("<p:sldId id=\"{slide_id}\" r:id=\"rId{r_id}\"/>"));
    }
    format!(
        "{XML_DECL}<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
<p:sldIdLst>{slide_ids}</p:sldIdLst>\
<p:sldSz cx=\"{SLIDE_CX}\" cy=\"{SLIDE_CY}\" type=\"screen4x3\"/>\
<p:notesSz cx=\"{SLIDE_CY}\" cy=\"{SLIDE_CX}\"/>\
</p:presentation>"
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut rels = format!(
        "<Relationship Id=\"rId1\" Type=\"{NS_R}/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>"
    );
    for number in 1..=slide_count {
        let r_id = number + 1;
        rels.push_str(&format!(
            "<Relationship Id=\"rId{r_id}\" Type=\"{NS_R}/slide\" Target=\"slides/slide{number}.xml\"/>"
        ));
    }
    format!("{XML_DECL}<Relationships xmlns=\"{NS_REL}\">{rels}</Relationships>")
}

fn slide_master_xml() -> String {
    format!(
        "{XML_DECL}<p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
<p:cSld>\
<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"FFFFFF\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>\
<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
</p:spTree>\
</p:cSld>\
<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
<p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
</p:sldMaster>"
    )
}

fn master_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_R}/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"{NS_R}/theme\" Target=\"../theme/theme1.xml\"/>\
</Relationships>"
    )
}

fn slide_layout_xml() -> String {
    format!(
        "{XML_DECL}<p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
<p:cSld name=\"Blank\">\
<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
</p:spTree>\
</p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sldLayout>"
    )
}

fn layout_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_R}/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
</Relationships>"
    )
}

fn slide_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_R}/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
</Relationships>"
    )
}

// Smallest schema-valid Office theme: color scheme, font scheme, and the
// three-entry format scheme lists.
fn theme_xml() -> String {
    format!(
        "{XML_DECL}<a:theme xmlns:a=\"{NS_A}\" name=\"Office Theme\"><a:themeElements>\
<a:clrScheme name=\"Office\">\
<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
<a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
<a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
<a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
<a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
<a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
<a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
<a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
</a:clrScheme>\
<a:fontScheme name=\"Office\">\
<a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
</a:fontScheme>\
<a:fmtScheme name=\"Office\">\
<a:fillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:fillStyleLst>\
<a:lnStyleLst><a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln><a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln><a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln></a:lnStyleLst>\
<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>\
<a:bgFillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:bgFillStyleLst>\
</a:fmtScheme>\
</a:themeElements></a:theme>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec()))
            .unwrap_or_else(|e| panic!("{e}"));
        let mut file = archive.by_name(name).unwrap_or_else(|e| panic!("{name}: {e}"));
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap_or_else(|e| panic!("{e}"));
        out
    }

    #[test]
    fn package_contains_every_part() {
        let deck = RenderedDeck::new(vec!["<p:sld/>".into(), "<p:sld/>".into()]);
        let bytes = deck.into_bytes().unwrap_or_else(|e| panic!("{e}"));

        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains("/ppt/slides/slide1.xml"));
        assert!(types.contains("/ppt/slides/slide2.xml"));
        assert!(!types.contains("/ppt/slides/slide3.xml"));

        for name in [
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
        ] {
            read_part(&bytes, name);
        }
    }

    #[test]
    fn presentation_lists_slides_in_order() {
        let xml = presentation_xml(3);
        assert!(xml.contains("<p:sldId id=\"256\" r:id=\"rId2\"/>"));
        assert!(xml.contains("<p:sldId id=\"257\" r:id=\"rId3\"/>"));
        assert!(xml.contains("<p:sldId id=\"258\" r:id=\"rId4\"/>"));

        let rels = presentation_rels(3);
        assert!(rels.contains(&format!("Id=\"rId4\" Type=\"{NS_R}/slide\"")));
        assert!(rels.contains("Target=\"slides/slide3.xml\""));
    }

    #[test]
    fn empty_deck_still_packages() {
        let bytes = RenderedDeck::new(Vec::new())
            .into_bytes()
            .unwrap_or_else(|e| panic!("{e}"));
        let xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(xml.contains("<p:sldIdLst></p:sldIdLst>"));
    }
}
