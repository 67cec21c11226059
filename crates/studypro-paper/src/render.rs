use crate::error::PaperError;

/// Horizontal anchoring of a text line relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Drawing surface used by the layout engine.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// current page; y grows downwards.
pub trait DocumentRenderer {
    /// What [`save`](Self::save) hands back, e.g. the encoded file.
    type Output;

    /// Page width and height.
    fn page_size(&self) -> (f32, f32);

    /// Embed a font to use for all following text. Implementations that
    /// cannot use it return an error and keep their current font.
    fn embed_font(&mut self, bytes: &[u8]) -> Result<(), PaperError>;

    fn set_font_size(&mut self, size: f32);

    /// Word-wrap `text` so every line fits in `max_width` at the current
    /// font size.
    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String>;

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32);

    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    /// Finish the document under `filename`.
    fn save(self, filename: &str) -> Result<Self::Output, PaperError>
    where
        Self: Sized;
}

/// Approximate advance width of `text` in points, using Helvetica-like
/// per-glyph proportions.
pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(glyph_em).sum::<f32>() * font_size
}

fn glyph_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' | '!' => 0.25,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        '0'..='9' => 0.56,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii() => 0.52,
        // Indic and other scripts: assume a wide glyph.
        _ => 0.6,
    }
}

/// Greedy word wrap. Words wider than a whole line are broken by character.
/// Blank input yields one empty line so every block occupies at least one
/// line.
pub fn wrap_text(text: &str, max_width: f32, width_of: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if width_of(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if width_of(word) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && width_of(&next) > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
