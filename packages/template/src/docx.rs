//! DOCX placeholder filling.
//!
//! A `.docx` file is a zip package of XML parts. Templates mark fields
//! with `{{KEY}}` (spaces inside the braces are allowed). Text values are
//! XML-escaped into place. Image values are embedded as inline drawings in
//! the main document part: the PNG is added under `word/media/`, a
//! relationship is registered for it, and the placeholder is swapped for
//! a `<w:drawing>` inside the same run.
//!
//! A placeholder must sit inside a single run. Word sometimes splits typed
//! text across runs, which leaves such a placeholder untouched.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::LazyLock;

use house_reg_context::{ContextValue, DocumentContext, PageImage};
use regex::{Captures, Regex};

use crate::TemplateError;

/// `{{ KEY }}` placeholder; the key is captured.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[ \t]*([A-Za-z0-9_]+)[ \t]*\}\}").expect("valid regex")
});

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const EMPTY_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    "</Relationships>",
);

const EMU_PER_MM: u64 = 36_000;

/// Width and height ratio assumed when an image's pixel size is unknown
/// (A4 portrait).
const FALLBACK_ASPECT: (u64, u64) = (210, 297);

/// Drawing ids start high to stay clear of ids already in the template.
const FIRST_DRAWING_ID: u32 = 9000;

/// An image scheduled for embedding.
struct EmbeddedImage {
    key: String,
    rel_id: String,
    media_name: String,
    png: Vec<u8>,
}

/// Collects images referenced while filling the main document part.
struct ImageEmbedder {
    images: Vec<EmbeddedImage>,
    next_drawing_id: u32,
}

impl ImageEmbedder {
    const fn new() -> Self {
        Self {
            images: Vec::new(),
            next_drawing_id: FIRST_DRAWING_ID,
        }
    }

    /// Returns drawing markup for `image`, registering it on first use.
    fn drawing(&mut self, key: &str, image: &PageImage) -> String {
        let rel_id = if let Some(existing) = self.images.iter().find(|i| i.key == key) {
            existing.rel_id.clone()
        } else {
            let rel_id = format!("rIdHouseReg{}", self.images.len() + 1);
            self.images.push(EmbeddedImage {
                key: key.to_owned(),
                rel_id: rel_id.clone(),
                media_name: format!("{}.png", key.to_ascii_lowercase()),
                png: image.png.clone(),
            });
            rel_id
        };

        self.next_drawing_id += 1;
        let id = self.next_drawing_id;

        let (cx, cy) = extent_emu(image);
        format!(
            concat!(
                r#"</w:t><w:drawing>"#,
                r#"<wp:inline distT="0" distB="0" distL="0" distR="0""#,
                r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing""#,
                r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#,
                r#" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
                r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:docPr id="{id}" name="{key}"/>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="{key}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
                r#"</a:graphicData></a:graphic></wp:inline></w:drawing><w:t xml:space="preserve">"#,
            ),
            cx = cx,
            cy = cy,
            id = id,
            key = key,
            rel_id = rel_id,
        )
    }
}

/// Display size in EMUs, keeping the image's aspect ratio.
fn extent_emu(image: &PageImage) -> (u64, u64) {
    let (w, h) = image
        .pixel_size()
        .map_or(FALLBACK_ASPECT, |(w, h)| (u64::from(w), u64::from(h)));
    let cx = u64::from(image.width_mm) * EMU_PER_MM;
    let cy = u128::from(cx) * u128::from(h) / u128::from(w);
    (cx, u64::try_from(cy).unwrap_or(u64::MAX))
}

/// Escapes the five XML special characters.
fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn fill_part(xml: &str, ctx: &DocumentContext, mut embedder: Option<&mut ImageEmbedder>) -> String {
    PLACEHOLDER_RE
        .replace_all(xml, |caps: &Captures<'_>| {
            let key = &caps[1];
            match (ctx.get(key), embedder.as_deref_mut()) {
                (Some(ContextValue::Text(text)), _) => escape_xml(text),
                (Some(ContextValue::Image(image)), Some(embedder)) => embedder.drawing(key, image),
                (Some(ContextValue::Image(_)), None) => {
                    log::warn!("Image placeholder {key} outside the document body left blank");
                    String::new()
                }
                (None, _) => {
                    log::debug!("No value for placeholder {key}");
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Replaces every `{{KEY}}` in `xml` with its escaped text value.
///
/// Unknown keys and image values render as empty.
#[must_use]
pub fn fill_placeholders(xml: &str, ctx: &DocumentContext) -> String {
    fill_part(xml, ctx, None)
}

fn is_header_or_footer(name: &str) -> bool {
    (name.starts_with("word/header") || name.starts_with("word/footer"))
        && name.ends_with(".xml")
}

fn add_relationships(rels: &str, images: &[EmbeddedImage]) -> String {
    let entries: String = images
        .iter()
        .map(|image| {
            format!(
                r#"<Relationship Id="{}" Type="{IMAGE_REL_TYPE}" Target="media/{}"/>"#,
                image.rel_id, image.media_name
            )
        })
        .collect();
    insert_before_close(rels, "</Relationships>", &entries)
}

fn ensure_png_content_type(types: &str) -> String {
    if types.to_ascii_lowercase().contains(r#"extension="png""#) {
        return types.to_owned();
    }
    insert_before_close(
        types,
        "</Types>",
        r#"<Default Extension="png" ContentType="image/png"/>"#,
    )
}

fn insert_before_close(xml: &str, close_tag: &str, content: &str) -> String {
    xml.rfind(close_tag).map_or_else(
        || format!("{xml}{content}"),
        |idx| format!("{}{content}{}", &xml[..idx], &xml[idx..]),
    )
}

fn read_package(template: &Path) -> Result<Vec<(String, Vec<u8>)>, TemplateError> {
    let io_err = |e| TemplateError::Io {
        path: template.display().to_string(),
        source: e,
    };
    let zip_err = |e| TemplateError::Zip {
        path: template.display().to_string(),
        source: e,
    };

    let file = File::open(template).map_err(io_err)?;
    let mut archive = zip::ZipArchive::new(file).map_err(zip_err)?;

    let mut parts = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_err)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_owned();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(io_err)?;
        parts.push((name, bytes));
    }

    Ok(parts)
}

fn write_package(
    output: &Path,
    parts: &[(String, Vec<u8>)],
    images: &[EmbeddedImage],
) -> Result<(), TemplateError> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| TemplateError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let tmp_path = output.with_extension("docx.tmp");
    let io_err = |e| TemplateError::Io {
        path: tmp_path.display().to_string(),
        source: e,
    };
    let zip_err = |e| TemplateError::Zip {
        path: tmp_path.display().to_string(),
        source: e,
    };

    let file = File::create(&tmp_path).map_err(io_err)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in parts {
        writer.start_file(name.as_str(), options).map_err(zip_err)?;
        writer.write_all(bytes).map_err(io_err)?;
    }
    for image in images {
        writer
            .start_file(format!("word/media/{}", image.media_name), options)
            .map_err(zip_err)?;
        writer.write_all(&image.png).map_err(io_err)?;
    }
    writer.finish().map_err(zip_err)?;

    std::fs::rename(&tmp_path, output).map_err(|e| TemplateError::Io {
        path: output.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Fills `template` with `ctx` and writes the result to `output`.
///
/// The output is written to a temporary file first and renamed into
/// place.
///
/// # Errors
///
/// * [`TemplateError::TemplateNotFound`] if `template` does not exist.
/// * [`TemplateError::InvalidTemplate`] if it has no main document part.
/// * [`TemplateError::Io`] or [`TemplateError::Zip`] on read/write
///   failures.
pub fn render_docx(template: &Path, ctx: &DocumentContext, output: &Path) -> Result<(), TemplateError> {
    if !template.is_file() {
        return Err(TemplateError::TemplateNotFound(
            template.display().to_string(),
        ));
    }

    let mut parts = read_package(template)?;
    if !parts.iter().any(|(name, _)| name == DOCUMENT_PART) {
        return Err(TemplateError::InvalidTemplate(format!(
            "{} has no {DOCUMENT_PART}",
            template.display()
        )));
    }

    let mut embedder = ImageEmbedder::new();
    for (name, bytes) in &mut parts {
        let filled = if name.as_str() == DOCUMENT_PART {
            fill_part(&String::from_utf8_lossy(bytes), ctx, Some(&mut embedder))
        } else if is_header_or_footer(name) {
            fill_part(&String::from_utf8_lossy(bytes), ctx, None)
        } else {
            continue;
        };
        *bytes = filled.into_bytes();
    }

    if !embedder.images.is_empty() {
        let mut has_rels = false;
        for (name, bytes) in &mut parts {
            let patched = match name.as_str() {
                DOCUMENT_RELS_PART => {
                    has_rels = true;
                    add_relationships(&String::from_utf8_lossy(bytes), &embedder.images)
                }
                CONTENT_TYPES_PART => ensure_png_content_type(&String::from_utf8_lossy(bytes)),
                _ => continue,
            };
            *bytes = patched.into_bytes();
        }
        if !has_rels {
            parts.push((
                DOCUMENT_RELS_PART.to_owned(),
                add_relationships(EMPTY_RELS, &embedder.images).into_bytes(),
            ));
        }
    }

    write_package(output, &parts, &embedder.images)?;

    log::info!(
        "Rendered {} -> {} ({} image(s) embedded)",
        template.display(),
        output.display(),
        embedder.images.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use house_reg_context::document::{DOC_DATE, TIME_START};

    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_template(path: &Path, document: &str, header: Option<&str>) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file(CONTENT_TYPES_PART, options).unwrap();
        writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.start_file(DOCUMENT_RELS_PART, options).unwrap();
        writer.write_all(EMPTY_RELS.as_bytes()).unwrap();
        if let Some(header) = header {
            writer.start_file("word/header1.xml", options).unwrap();
            writer.write_all(header.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    fn read_part(path: &Path, name: &str) -> Option<Vec<u8>> {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).ok()?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        Some(bytes)
    }

    fn read_text(path: &Path, name: &str) -> String {
        String::from_utf8(read_part(path, name).unwrap()).unwrap()
    }

    #[test]
    fn fills_and_escapes_text() {
        let mut ctx = DocumentContext::new();
        ctx.insert_text("FULLNAME_A", "นาย ก & ข <ค>");
        ctx.insert_text(TIME_START, "09:30");
        let xml = "<w:t>{{FULLNAME_A}} at {{ TIME_START }}</w:t>";
        assert_eq!(
            fill_placeholders(xml, &ctx),
            "<w:t>นาย ก &amp; ข &lt;ค&gt; at 09:30</w:t>"
        );
    }

    #[test]
    fn unknown_keys_render_empty() {
        let ctx = DocumentContext::new();
        assert_eq!(fill_placeholders("<w:t>[{{CID_F}}]</w:t>", &ctx), "<w:t>[]</w:t>");
    }

    #[test]
    fn leaves_non_placeholders_alone() {
        let ctx = DocumentContext::new();
        let xml = "<w:t>{ single } {{not a key}} {{}}</w:t>";
        assert_eq!(fill_placeholders(xml, &ctx), xml);
    }

    #[test]
    fn extent_keeps_aspect_ratio() {
        let image = PageImage::new(png(1000, 2000), 150);
        assert_eq!(extent_emu(&image), (5_400_000, 10_800_000));
    }

    #[test]
    fn extent_of_huge_image_does_not_overflow() {
        let image = PageImage::new(png(1, u32::MAX), u32::MAX);
        let (cx, cy) = extent_emu(&image);
        assert_eq!(cx, u64::from(u32::MAX) * EMU_PER_MM);
        assert_eq!(cy, u64::MAX);
    }

    #[test]
    fn extent_falls_back_to_a4() {
        let image = PageImage::new(vec![1, 2, 3], 210);
        assert_eq!(extent_emu(&image), (7_560_000, 10_692_000));
    }

    #[test]
    fn content_type_added_once() {
        let once = ensure_png_content_type(CONTENT_TYPES);
        assert!(once.contains(r#"<Default Extension="png" ContentType="image/png"/></Types>"#));
        assert_eq!(ensure_png_content_type(&once), once);
    }

    #[test]
    fn renders_text_and_images_into_package() {
        let dir = scratch("house_reg_docx_render_test");
        let template = dir.join("template.docx");
        let output = dir.join("out").join("filled.docx");
        write_template(
            &template,
            "<w:document><w:body><w:p><w:r><w:t>{{DOC_DATE}}</w:t></w:r></w:p>\
             <w:p><w:r><w:t>{{HOUSE_REG_IMAGE_A}}</w:t></w:r></w:p>\
             <w:p><w:r><w:t>{{HOUSE_REG_IMAGE_B}}</w:t></w:r></w:p></w:body></w:document>",
            Some("<w:hdr><w:t>{{DOC_DATE}}|{{HOUSE_REG_IMAGE_A}}</w:t></w:hdr>"),
        );

        let mut ctx = DocumentContext::new();
        ctx.insert_text(DOC_DATE, "16 ธันวาคม พ.ศ.2568");
        ctx.insert_image("HOUSE_REG_IMAGE_A", PageImage::new(png(100, 141), 150));
        ctx.insert_text("HOUSE_REG_IMAGE_B", "");

        render_docx(&template, &ctx, &output).unwrap();

        let document = read_text(&output, DOCUMENT_PART);
        assert!(document.contains("16 ธันวาคม พ.ศ.2568"));
        assert!(document.contains(r#"r:embed="rIdHouseReg1""#));
        assert_eq!(document.matches("<w:drawing>").count(), 1);
        assert!(!document.contains("{{"));

        let header = read_text(&output, "word/header1.xml");
        assert_eq!(header, "<w:hdr><w:t>16 ธันวาคม พ.ศ.2568|</w:t></w:hdr>");

        let rels = read_text(&output, DOCUMENT_RELS_PART);
        assert!(rels.contains(r#"Id="rIdHouseReg1""#));
        assert!(rels.contains(r#"Target="media/house_reg_image_a.png""#));

        assert!(read_text(&output, CONTENT_TYPES_PART).contains(r#"Extension="png""#));
        assert_eq!(
            read_part(&output, "word/media/house_reg_image_a.png"),
            Some(png(100, 141))
        );
        assert_eq!(read_part(&output, "word/media/house_reg_image_b.png"), None);
        assert!(!output.with_extension("docx.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn repeated_image_placeholder_shares_one_relationship() {
        let dir = scratch("house_reg_docx_repeat_test");
        let template = dir.join("template.docx");
        let output = dir.join("filled.docx");
        write_template(
            &template,
            "<w:t>{{HOUSE_REG_IMAGE_A}}</w:t><w:t>{{HOUSE_REG_IMAGE_A}}</w:t>",
            None,
        );

        let mut ctx = DocumentContext::new();
        ctx.insert_image("HOUSE_REG_IMAGE_A", PageImage::new(png(10, 10), 100));
        render_docx(&template, &ctx, &output).unwrap();

        let document = read_text(&output, DOCUMENT_PART);
        assert_eq!(document.matches(r#"r:embed="rIdHouseReg1""#).count(), 2);
        assert!(document.contains(r#"<wp:docPr id="9001""#));
        assert!(document.contains(r#"<wp:docPr id="9002""#));
        let rels = read_text(&output, DOCUMENT_RELS_PART);
        assert_eq!(rels.matches("<Relationship ").count(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_template_is_reported() {
        let dir = scratch("house_reg_docx_missing_test");
        let result = render_docx(&dir.join("nope.docx"), &DocumentContext::new(), &dir.join("out.docx"));
        assert!(matches!(result, Err(TemplateError::TemplateNotFound(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn package_without_document_is_invalid() {
        let dir = scratch("house_reg_docx_invalid_test");
        let template = dir.join("empty.docx");
        let mut writer = zip::ZipWriter::new(File::create(&template).unwrap());
        writer
            .start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        writer.finish().unwrap();

        let result = render_docx(&template, &DocumentContext::new(), &dir.join("out.docx"));
        assert!(matches!(result, Err(TemplateError::InvalidTemplate(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
