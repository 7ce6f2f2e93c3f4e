//! Line breaking over shaped text.

use super::font::FontSet;
use super::style::{Emphasis, FontFace};

/// A contiguous run of text in one face.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub face: FontFace,
    pub text: String,
}

/// One laid-out line: pieces drawn left to right, and their total width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLine {
    pub pieces: Vec<Piece>,
    pub width: f32,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }

    fn push(&mut self, fonts: &FontSet, face: FontFace, text: &str, size: f32) {
        if text.is_empty() {
            return;
        }
        self.width += fonts.text_width(face, size, text);
        match self.pieces.last_mut() {
            Some(last) if last.face == face => last.text.push_str(text),
            _ => self.pieces.push(Piece {
                face,
                text: text.to_string(),
            }),
        }
    }
}

/// A word may change face midway (`<b>GSTIN:</b>X`), so it is a list of pieces.
type Word = Vec<(FontFace, String)>;

fn split_words(runs: &[(FontFace, &str)]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut pending_space = true;
    for (face, text) in runs {
        for c in text.chars() {
            if c.is_whitespace() {
                pending_space = true;
                continue;
            }
            if c.is_control() {
                continue;
            }
            if pending_space || words.is_empty() {
                words.push(Vec::new());
                pending_space = false;
            }
            let Some(word) = words.last_mut() else {
                continue;
            };
            match word.last_mut() {
                Some((f, s)) if *f == *face => s.push(c),
                _ => word.push((*face, c.to_string())),
            }
        }
    }
    words
}

fn word_width(fonts: &FontSet, word: &Word, size: f32) -> f32 {
    word.iter().map(|(f, s)| fonts.text_width(*f, size, s)).sum()
}

/// Greedy line breaking of styled runs into `max_width`.
///
/// Whitespace collapses to single spaces. A word wider than the line is
/// broken between characters so that no text is lost.
pub fn wrap_runs(
    fonts: &FontSet,
    runs: &[(FontFace, &str)],
    size: f32,
    max_width: f32,
) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut current = TextLine::default();

    for word in split_words(runs) {
        let width = word_width(fonts, &word, size);
        let space_face = word.first().map(|(f, _)| *f).unwrap_or(FontFace::Regular);
        let space = fonts.text_width(space_face, size, " ");

        if !current.pieces.is_empty() && current.width + space + width <= max_width {
            current.push(fonts, space_face, " ", size);
            for (f, s) in &word {
                current.push(fonts, *f, s, size);
            }
            continue;
        }

        if !current.pieces.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if width <= max_width {
            for (f, s) in &word {
                current.push(fonts, *f, s, size);
            }
        } else {
            for (f, s) in &word {
                for c in s.chars() {
                    let mut buf = [0u8; 4];
                    let ch = c.encode_utf8(&mut buf);
                    let cw = fonts.text_width(*f, size, ch);
                    if !current.pieces.is_empty() && current.width + cw > max_width {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.push(fonts, *f, ch, size);
                }
            }
        }
    }

    if !current.pieces.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out one run on a single line, without breaking.
pub fn single_line(fonts: &FontSet, face: FontFace, size: f32, text: &str) -> Option<TextLine> {
    let words = split_words(&[(face, text)]);
    if words.is_empty() {
        return None;
    }
    let mut line = TextLine::default();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            line.push(fonts, face, " ", size);
        }
        for (f, s) in word {
            line.push(fonts, *f, s, size);
        }
    }
    Some(line)
}

/// Resolve span emphasis against a base face into wrap-ready runs.
pub fn runs<'a>(
    base: FontFace,
    spans: impl IntoIterator<Item = (Emphasis, &'a str)>,
) -> Vec<(FontFace, &'a str)> {
    spans
        .into_iter()
        .map(|(emphasis, text)| (base.with(emphasis), text))
        .collect()
}
