//! Embedded DejaVu Sans faces.
//!
//! Text is shaped with `rustybuzz` against the same TrueType programs that
//! the PDF writer embeds, so measured widths are drawn widths and `₹` has a
//! real glyph. Kerning and ligatures are switched off: the width of a line
//! is the sum of the widths of its pieces.

use std::io::Write;
use std::sync::OnceLock;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::debug;
use rustybuzz::{Face, Feature, UnicodeBuffer};
use ttf_parser::{GlyphId, Tag};

use super::style::FontFace;
use crate::core::DocumentError;

static SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");
static SANS_OBLIQUE: &[u8] = include_bytes!("../../fonts/DejaVuSans-Oblique.ttf");
static SANS_BOLD_OBLIQUE: &[u8] = include_bytes!("../../fonts/DejaVuSans-BoldOblique.ttf");

static COMPRESSED: [OnceLock<Vec<u8>>; 4] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

/// Slant of the oblique faces, in degrees.
const OBLIQUE_ANGLE: f32 = -11.0;

/// Raw TrueType program of `face`.
pub fn program(face: FontFace) -> &'static [u8] {
    match face {
        FontFace::Regular => SANS,
        FontFace::Bold => SANS_BOLD,
        FontFace::Italic => SANS_OBLIQUE,
        FontFace::BoldItalic => SANS_BOLD_OBLIQUE,
    }
}

/// The program of `face` deflated for a `FlateDecode` stream. Computed once
/// per process.
pub fn compressed_program(face: FontFace) -> Result<&'static [u8], DocumentError> {
    let slot = &COMPRESSED[face.index()];
    if let Some(bytes) = slot.get() {
        return Ok(bytes.as_slice());
    }
    let failed = |e: std::io::Error| {
        DocumentError::Render(format!("failed to compress font {}: {e}", face.postscript_name()))
    };
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(program(face)).map_err(failed)?;
    let bytes = encoder.finish().map_err(failed)?;
    debug!(
        "compressed {}: {} -> {} bytes",
        face.postscript_name(),
        program(face).len(),
        bytes.len()
    );
    Ok(slot.get_or_init(|| bytes).as_slice())
}

/// One shaped glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub id: u16,
    /// Shaped advance in thousandths of an em.
    pub advance: f32,
    /// Source text of the glyph's cluster; empty on every glyph but the
    /// first of a cluster.
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedText {
    pub glyphs: Vec<Glyph>,
}

impl ShapedText {
    /// Advance width in points at `size`.
    pub fn width(&self, size: f32) -> f32 {
        self.glyphs.iter().map(|g| g.advance).sum::<f32>() * size / 1000.0
    }
}

/// Face-wide metrics in thousandths of an em, for the font descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub bbox: [f32; 4],
    pub italic_angle: f32,
}

/// The four faces parsed for shaping. Built once per render.
pub struct FontSet {
    faces: [Face<'static>; 4],
    features: [Feature; 3],
}

impl FontSet {
    pub fn embedded() -> Result<Self, DocumentError> {
        let load = |face: FontFace| {
            Face::from_slice(program(face), 0).ok_or_else(|| {
                DocumentError::Render(format!(
                    "embedded font {} cannot be parsed",
                    face.postscript_name()
                ))
            })
        };
        Ok(Self {
            faces: [
                load(FontFace::Regular)?,
                load(FontFace::Bold)?,
                load(FontFace::Italic)?,
                load(FontFace::BoldItalic)?,
            ],
            features: [
                Feature::new(Tag::from_bytes(b"kern"), 0, ..),
                Feature::new(Tag::from_bytes(b"liga"), 0, ..),
                Feature::new(Tag::from_bytes(b"clig"), 0, ..),
            ],
        })
    }

    fn face(&self, face: FontFace) -> &Face<'static> {
        &self.faces[face.index()]
    }

    fn scale(&self, face: FontFace) -> f32 {
        1000.0 / (self.face(face).units_per_em() as f32).max(1.0)
    }

    pub fn shape(&self, face: FontFace, text: &str) -> ShapedText {
        let hb = self.face(face);
        let scale = self.scale(face);

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let output = rustybuzz::shape(hb, &self.features, buffer);

        let mut starts: Vec<usize> = output
            .glyph_infos()
            .iter()
            .map(|g| g.cluster as usize)
            .collect();
        starts.sort_unstable();
        starts.dedup();

        let mut previous = None;
        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| {
                let start = info.cluster as usize;
                let source = if previous == Some(start) {
                    String::new()
                } else {
                    let end = starts
                        .iter()
                        .copied()
                        .find(|&s| s > start)
                        .unwrap_or(text.len());
                    text.get(start..end).unwrap_or_default().to_string()
                };
                previous = Some(start);
                Glyph {
                    id: info.glyph_id as u16,
                    advance: pos.x_advance as f32 * scale,
                    text: source,
                }
            })
            .collect();
        ShapedText { glyphs }
    }

    /// Rendered width in points of `text` set in `face` at `size`.
    pub fn text_width(&self, face: FontFace, size: f32, text: &str) -> f32 {
        self.shape(face, text).width(size)
    }

    /// Unshaped advance of glyph `id`, in thousandths of an em.
    pub fn glyph_advance(&self, face: FontFace, id: u16) -> f32 {
        self.face(face).glyph_hor_advance(GlyphId(id)).unwrap_or(0) as f32 * self.scale(face)
    }

    pub fn metrics(&self, face: FontFace) -> FontMetrics {
        let hb = self.face(face);
        let scale = self.scale(face);
        let bbox = hb.global_bounding_box();
        FontMetrics {
            ascent: hb.ascender() as f32 * scale,
            descent: hb.descender() as f32 * scale,
            cap_height: hb.capital_height().unwrap_or(hb.ascender()) as f32 * scale,
            bbox: [
                bbox.x_min as f32 * scale,
                bbox.y_min as f32 * scale,
                bbox.x_max as f32 * scale,
                bbox.y_max as f32 * scale,
            ],
            italic_angle: if face.is_italic() { OBLIQUE_ANGLE } else { 0.0 },
        }
    }
}
