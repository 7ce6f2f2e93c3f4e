use std::collections::BTreeMap;
use std::fmt::Write as _;

use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

use super::flow::{DrawOp, PageContent};
use super::{DocumentInfo, PageConfig};
use crate::core::DocumentError;
use crate::layout::font::{self, FontSet, ShapedText};
use crate::layout::{Color, FontFace};

/// Glyphs drawn per face, with the text each one stands for.
type GlyphUsage = BTreeMap<FontFace, BTreeMap<u16, String>>;

/// Serialise laid-out pages into a complete PDF file.
///
/// All pages share one resource dictionary. Every face that draws text is
/// embedded as a `Type0` font over its TrueType program with `Identity-H`
/// glyph codes and a `ToUnicode` map. No timestamps are written, so equal
/// input gives equal bytes.
pub fn write_pdf(
    pages: &[PageContent],
    config: &PageConfig,
    info: &DocumentInfo,
    fonts: &FontSet,
) -> Result<Vec<u8>, DocumentError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let resources_id = doc.new_object_id();
    let mut usage = GlyphUsage::new();

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, config, fonts, &mut usage);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), config.width.into(), config.height.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let mut font_resources = Dictionary::new();
    for (face, glyphs) in &usage {
        let font_id = embed_font(&mut doc, fonts, *face, glyphs)?;
        font_resources.set(face.resource_name(), Object::Reference(font_id));
    }
    doc.objects.insert(
        resources_id,
        Object::Dictionary(dictionary! {
            "Font" => Object::Dictionary(font_resources),
        }),
    );

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&info.title),
        "Creator" => text_string(&info.creator),
        "Producer" => text_string(&info.producer),
    });
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| DocumentError::Render(format!("failed to save PDF: {e}")))?;
    debug!(
        "wrote PDF: {} page(s), {} font(s), {} bytes",
        pages.len(),
        usage.len(),
        output.len()
    );
    Ok(output)
}

/// A PDF text string: literal for ASCII, UTF-16BE with a byte-order mark
/// otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Write the font program, descriptor, CID font and `ToUnicode` map of
/// `face`, returning the `Type0` font to reference from page resources.
fn embed_font(
    doc: &mut Document,
    fonts: &FontSet,
    face: FontFace,
    glyphs: &BTreeMap<u16, String>,
) -> Result<ObjectId, DocumentError> {
    let program = font::program(face);
    let file_id = doc.add_object(
        Stream::new(
            dictionary! {
                "Filter" => "FlateDecode",
                "Length1" => program.len() as i64,
            },
            font::compressed_program(face)?.to_vec(),
        )
        .with_compression(false),
    );

    let metrics = fonts.metrics(face);
    let mut flags: i64 = 32;
    if face.is_italic() {
        flags |= 64;
    }
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => face.postscript_name(),
        "Flags" => flags,
        "FontBBox" => metrics
            .bbox
            .iter()
            .map(|v| Object::Integer(v.round() as i64))
            .collect::<Vec<_>>(),
        "ItalicAngle" => metrics.italic_angle,
        "Ascent" => metrics.ascent.round() as i64,
        "Descent" => metrics.descent.round() as i64,
        "CapHeight" => metrics.cap_height.round() as i64,
        "StemV" => if face.is_bold() { 120i64 } else { 80i64 },
        "FontFile2" => Object::Reference(file_id),
    });

    let mut widths = Vec::with_capacity(glyphs.len() * 2);
    for &id in glyphs.keys() {
        widths.push(Object::Integer(i64::from(id)));
        widths.push(Object::Array(vec![Object::Real(fonts.glyph_advance(face, id))]));
    }
    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => face.postscript_name(),
        "CIDSystemInfo" => Object::Dictionary(dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => Object::Integer(0),
        }),
        "FontDescriptor" => Object::Reference(descriptor_id),
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let cmap = to_unicode_cmap(glyphs);
    let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, cmap.into_bytes()));

    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => face.postscript_name(),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => Object::Reference(to_unicode_id),
    }))
}

/// A `ToUnicode` CMap for two-byte glyph codes. The `.notdef` glyph and
/// glyphs without source text are left out.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, String>) -> String {
    let entries: Vec<(u16, &str)> = glyphs
        .iter()
        .filter(|(id, text)| **id != 0 && !text.is_empty())
        .map(|(id, text)| (*id, text.as_str()))
        .collect();

    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");
    // At most 100 entries per bfchar block.
    for chunk in entries.chunks(100) {
        let _ = writeln!(out, "{} beginbfchar", chunk.len());
        for (id, text) in chunk {
            let _ = write!(out, "<{id:04X}> <");
            for unit in text.encode_utf16() {
                let _ = write!(out, "{unit:04X}");
            }
            out.push_str(">\n");
        }
        out.push_str("endbfchar\n");
    }
    out.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    out
}

/// Glyph codes for a `Tj`/`TJ` operand, with positioning wherever the
/// shaped advance differs from the glyph's own width.
fn glyph_operand(fonts: &FontSet, face: FontFace, shaped: &ShapedText) -> Vec<Object> {
    let mut items = Vec::new();
    let mut run = Vec::with_capacity(shaped.glyphs.len() * 2);
    for glyph in &shaped.glyphs {
        run.extend_from_slice(&glyph.id.to_be_bytes());
        let adjust = fonts.glyph_advance(face, glyph.id) - glyph.advance;
        if adjust.abs() > 0.001 {
            items.push(Object::String(std::mem::take(&mut run), StringFormat::Hexadecimal));
            items.push(Object::Real(adjust));
        }
    }
    if !run.is_empty() {
        items.push(Object::String(run, StringFormat::Hexadecimal));
    }
    items
}

fn record_glyphs(usage: &mut GlyphUsage, face: FontFace, shaped: &ShapedText) {
    let used = usage.entry(face).or_default();
    for glyph in &shaped.glyphs {
        let text = used.entry(glyph.id).or_default();
        if text.is_empty() {
            text.clone_from(&glyph.text);
        }
    }
}

/// Graphics state already set in the content stream, to skip redundant operators.
#[derive(Default)]
struct PenState {
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

fn page_content(
    page: &PageContent,
    config: &PageConfig,
    fonts: &FontSet,
    usage: &mut GlyphUsage,
) -> Content {
    let mut ops = Vec::with_capacity(page.ops.len() * 4);
    let mut pen = PenState::default();
    let flip = |y: f32| config.height - y;

    // Fills first, then text, then strokes, so rules are never hidden by fills.
    let mut layers: BTreeMap<u8, Vec<&DrawOp>> = BTreeMap::new();
    for op in &page.ops {
        let layer = match op {
            DrawOp::FillRect { .. } => 0,
            DrawOp::Text { .. } => 1,
            DrawOp::Line { .. } => 2,
        };
        layers.entry(layer).or_default().push(op);
    }

    for op in layers.into_values().flatten() {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                set_fill(&mut ops, &mut pen, *color);
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), flip(y + height).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Text {
                x,
                baseline,
                face,
                size,
                color,
                text,
            } => {
                let shaped = fonts.shape(*face, text);
                if shaped.glyphs.is_empty() {
                    continue;
                }
                record_glyphs(usage, *face, &shaped);
                let operand = glyph_operand(fonts, *face, &shaped);

                set_fill(&mut ops, &mut pen, *color);
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(face.resource_name().as_bytes().to_vec()),
                        (*size).into(),
                    ],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), flip(*baseline).into()]));
                if operand.len() == 1 {
                    ops.push(Operation::new("Tj", operand));
                } else {
                    ops.push(Operation::new("TJ", vec![Object::Array(operand)]));
                }
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                if pen.line_width != Some(*width) {
                    ops.push(Operation::new("w", vec![(*width).into()]));
                    pen.line_width = Some(*width);
                }
                if pen.stroke != Some(*color) {
                    let [r, g, b] = color.unit();
                    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
                    pen.stroke = Some(*color);
                }
                ops.push(Operation::new("m", vec![(*x1).into(), flip(*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), flip(*y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }

    Content { operations: ops }
}

fn set_fill(ops: &mut Vec<Operation>, pen: &mut PenState, color: Color) {
    if pen.fill != Some(color) {
        let [r, g, b] = color.unit();
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        pen.fill = Some(color);
    }
}
