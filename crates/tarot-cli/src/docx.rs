//! Word (`.docx`) rendering of a deck.
//!
//! The document is a minimal WordprocessingML package: one `Heading2` per
//! card, the card's symbol as a picture when an image file for it exists,
//! then one paragraph per field. Symbol images are looked up as
//! `symbols/<symbol>.<ext>` and then `<symbol>.<ext>` under a base directory.

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tarot_core::CardCatalog;
use tracing::debug;
use zip::result::ZipResult;
use zip::write::{FileOptions, ZipWriter};

use crate::render;

/// Extensions tried, in order, when looking for a symbol image.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "png", "jpeg", "webp"];

/// Printed size of a symbol image: 0.52 in, in EMU.
const SYMBOL_EMU: u64 = 914_400 * 52 / 100;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpg" ContentType="image/jpeg"/><Default Extension="jpeg" ContentType="image/jpeg"/><Default Extension="webp" ContentType="image/webp"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/></w:rPr></w:style></w:styles>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><w:body>"#;

const DOCUMENT_CLOSE: &str = "<w:sectPr/></w:body></w:document>";

/// A symbol image embedded once and shared by every card showing it.
struct Image {
    file_name: String,
    bytes: Vec<u8>,
}

impl Image {
    fn rel_id(index: usize) -> String {
        format!("rIdImg{}", index + 1)
    }
}

/// Find the image file for `symbol` under `base`.
pub fn find_symbol_image(base: &Path, symbol: &str) -> Option<PathBuf> {
    [base.join("symbols"), base.to_path_buf()]
        .iter()
        .flat_map(|dir| {
            IMAGE_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{symbol}.{ext}")))
        })
        .find(|path| path.is_file())
}

/// Render `catalog` as a `.docx` package, resolving symbol images under
/// `image_base`.
pub fn render(catalog: &CardCatalog, image_base: &Path) -> ZipResult<Vec<u8>> {
    let mut images: Vec<Image> = Vec::new();
    let mut by_symbol: HashMap<&str, Option<usize>> = HashMap::new();
    let mut body = String::from(DOCUMENT_OPEN);

    for (n, card) in catalog.iter().enumerate() {
        paragraph(&mut body, Some("Heading2"), &render::heading(card));

        let image = match by_symbol.get(card.symbol.as_str()) {
            Some(cached) => *cached,
            None => {
                let found = match find_symbol_image(image_base, &card.symbol) {
                    Some(path) => Some(embed(&mut images, &path)?),
                    None => None,
                };
                by_symbol.insert(card.symbol.as_str(), found);
                found
            }
        };

        match image {
            Some(index) => picture(&mut body, index, n + 1, &card.symbol),
            None => paragraph(&mut body, None, &format!("Symbol : {}", card.symbol)),
        }

        for (label, value) in render::fields(card) {
            if label != "Symbol" {
                paragraph(&mut body, None, &format!("{label} : {value}"));
            }
        }
        paragraph(&mut body, None, "");
    }
    body.push_str(DOCUMENT_CLOSE);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file::<_, ()>("_rels/.rels", FileOptions::default())?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file::<_, ()>("word/_rels/document.xml.rels", FileOptions::default())?;
    zip.write_all(document_rels(&images).as_bytes())?;

    zip.start_file::<_, ()>("word/styles.xml", FileOptions::default())?;
    zip.write_all(STYLES.as_bytes())?;

    zip.start_file::<_, ()>("word/document.xml", FileOptions::default())?;
    zip.write_all(body.as_bytes())?;

    for image in &images {
        zip.start_file::<_, ()>(format!("word/media/{}", image.file_name), FileOptions::default())?;
        zip.write_all(&image.bytes)?;
    }

    let cursor = zip.finish()?;
    debug!(cards = catalog.len(), images = images.len(), "rendered docx");
    Ok(cursor.into_inner())
}

fn embed(images: &mut Vec<Image>, path: &Path) -> ZipResult<usize> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();
    let index = images.len();
    images.push(Image {
        file_name: format!("symbol{}.{ext}", index + 1),
        bytes: std::fs::read(path)?,
    });
    debug!(path = %path.display(), "embedded symbol image");
    Ok(index)
}

fn document_rels(images: &[Image]) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    );
    for (index, image) in images.iter().enumerate() {
        out.push_str(&format!(
            r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/{}"/>"#,
            Image::rel_id(index),
            image.file_name
        ));
    }
    out.push_str("</Relationships>");
    out
}

fn paragraph(out: &mut String, style: Option<&str>, text: &str) {
    out.push_str("<w:p>");
    if let Some(style) = style {
        out.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
    }
    if !text.is_empty() {
        out.push_str(&format!(
            r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
            escape(text)
        ));
    }
    out.push_str("</w:p>");
}

/// An inline picture paragraph. `drawing_id` must be unique in the document.
fn picture(out: &mut String, image: usize, drawing_id: usize, name: &str) {
    let name = escape(name);
    let rel = Image::rel_id(image);
    out.push_str(&format!(
        concat!(
            r#"<w:p><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{size}" cy="{size}"/><wp:docPr id="{id}" name="{name}"/>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{size}" cy="{size}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
            r#"</a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
        ),
        size = SYMBOL_EMU,
        id = drawing_id,
        name = name,
        rel = rel,
    ));
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
