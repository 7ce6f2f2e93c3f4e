/// Points per inch; all layout geometry is in PDF points.
pub const INCH: f32 = 72.0;

/// Line height as a multiple of font size.
pub const LEADING_RATIO: f32 = 1.2;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(0x80, 0x80, 0x80);
    /// Heading and rule colour (`#1f2937`).
    pub const SLATE: Color = Color::rgb(0x1f, 0x29, 0x37);
    /// Table header fill (`#f3f4f6`).
    pub const HEADER_FILL: Color = Color::rgb(0xf3, 0xf4, 0xf6);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0` for PDF colour operators.
    pub fn unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// One of the four embedded DejaVu Sans faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Italic,
        FontFace::BoldItalic,
    ];

    pub fn postscript_name(self) -> &'static str {
        match self {
            FontFace::Regular => "DejaVuSans",
            FontFace::Bold => "DejaVuSans-Bold",
            FontFace::Italic => "DejaVuSans-Oblique",
            FontFace::BoldItalic => "DejaVuSans-BoldOblique",
        }
    }

    /// Name of the face in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
            FontFace::BoldItalic => "F4",
        }
    }

    /// Position of the face in [`FontFace::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontFace::Italic | FontFace::BoldItalic)
    }

    pub fn bold(self) -> Self {
        match self {
            FontFace::Regular | FontFace::Bold => FontFace::Bold,
            FontFace::Italic | FontFace::BoldItalic => FontFace::BoldItalic,
        }
    }

    pub fn italic(self) -> Self {
        match self {
            FontFace::Regular | FontFace::Italic => FontFace::Italic,
            FontFace::Bold | FontFace::BoldItalic => FontFace::BoldItalic,
        }
    }

    /// Apply span emphasis on top of this base face.
    pub fn with(self, emphasis: Emphasis) -> Self {
        match emphasis {
            Emphasis::Plain => self,
            Emphasis::Bold => self.bold(),
            Emphasis::Italic => self.italic(),
            Emphasis::BoldItalic => self.bold().italic(),
        }
    }
}

/// Inline emphasis of a text span, layered over the surrounding face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Typography and spacing of a free-standing paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub face: FontFace,
    pub size: f32,
    pub leading: f32,
    pub color: Color,
    pub align: Align,
    /// Skipped when the paragraph starts a page.
    pub space_before: f32,
    pub space_after: f32,
}

impl ParagraphStyle {
    /// Body text: 10pt regular.
    pub fn normal() -> Self {
        Self {
            face: FontFace::Regular,
            size: 10.0,
            leading: 12.0,
            color: Color::BLACK,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    /// Large centred document title in the given accent colour.
    pub fn title(color: Color) -> Self {
        Self {
            face: FontFace::Bold,
            size: 24.0,
            leading: 24.0 * LEADING_RATIO,
            color,
            align: Align::Center,
            space_before: 0.0,
            space_after: 12.0,
        }
    }

    /// Centred 16pt subtitle line.
    pub fn subtitle() -> Self {
        Self {
            size: 16.0,
            leading: 16.0 * LEADING_RATIO,
            align: Align::Center,
            space_after: 12.0,
            ..Self::normal()
        }
    }

    /// Section heading: 14pt bold slate.
    pub fn heading() -> Self {
        Self {
            face: FontFace::Bold,
            size: 14.0,
            leading: 18.0,
            color: Color::SLATE,
            align: Align::Left,
            space_before: 10.0,
            space_after: 6.0,
        }
    }

    /// Small grey centred footer line.
    pub fn footer() -> Self {
        Self {
            size: 8.0,
            leading: 8.0 * LEADING_RATIO,
            color: Color::GREY,
            align: Align::Center,
            ..Self::normal()
        }
    }
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_layers_over_base_face() {
        assert_eq!(FontFace::Regular.with(Emphasis::Bold), FontFace::Bold);
        assert_eq!(FontFace::Bold.with(Emphasis::Italic), FontFace::BoldItalic);
        assert_eq!(FontFace::Italic.with(Emphasis::Plain), FontFace::Italic);
        assert_eq!(FontFace::Regular.with(Emphasis::BoldItalic), FontFace::BoldItalic);
    }

    #[test]
    fn resource_names_are_distinct() {
        let mut names: Vec<_> = FontFace::ALL.iter().map(|f| f.resource_name()).collect();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn index_follows_all() {
        for (i, face) in FontFace::ALL.into_iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn unit_colour_components() {
        assert_eq!(Color::BLACK.unit(), [0.0, 0.0, 0.0]);
        assert_eq!(Color::rgb(255, 0, 255).unit(), [1.0, 0.0, 1.0]);
    }
}
