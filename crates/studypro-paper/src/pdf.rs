use std::io::Cursor;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point,
};

use crate::error::PaperError;
use crate::render::{Align, DocumentRenderer, estimate_text_width, wrap_text};

/// A4 portrait in points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

const LAYER_NAME: &str = "Layer 1";

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// An encoded PDF ready to be written or offered for download.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// [`DocumentRenderer`] backed by `printpdf`.
///
/// Starts with built-in Helvetica; [`embed_font`](DocumentRenderer::embed_font)
/// swaps in a TrueType font for text drawn afterwards.
pub struct PdfRenderer {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    font: IndirectFontRef,
    font_size: f32,
    width: f32,
    height: f32,
}

impl PdfRenderer {
    pub fn a4(title: &str) -> Result<Self, PaperError> {
        Self::new(title, A4_WIDTH_PT, A4_HEIGHT_PT)
    }

    pub fn new(title: &str, width: f32, height: f32) -> Result<Self, PaperError> {
        let (doc, page, layer) =
            PdfDocument::new(title, pt_to_mm(width), pt_to_mm(height), LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PaperError::Pdf(e.to_string()))?;

        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            font,
            font_size: 11.0,
            width,
            height,
        })
    }

    fn layer(&self) -> Option<PdfLayerReference> {
        self.pages
            .last()
            .map(|&(page, layer)| self.doc.get_page(page).get_layer(layer))
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(pt_to_mm(x), pt_to_mm(self.height - y))
    }
}

impl DocumentRenderer for PdfRenderer {
    type Output = RenderedPdf;

    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn embed_font(&mut self, bytes: &[u8]) -> Result<(), PaperError> {
        let font = self
            .doc
            .add_external_font(Cursor::new(bytes))
            .map_err(|e| PaperError::Font(e.to_string()))?;
        self.font = font;
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String> {
        let size = self.font_size;
        wrap_text(text, max_width, |s| estimate_text_width(s, size))
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let width = estimate_text_width(text, self.font_size);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        if let Some(layer) = self.layer() {
            layer.use_text(
                text,
                self.font_size,
                pt_to_mm(left),
                pt_to_mm(self.height - y),
                &self.font,
            );
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        let line = Line {
            points: vec![(self.point(x1, y1), false), (self.point(x2, y2), false)],
            is_closed: false,
        };
        if let Some(layer) = self.layer() {
            layer.set_outline_thickness(thickness);
            layer.add_line(line);
        }
    }

    fn add_page(&mut self) {
        let (page, layer) =
            self.doc
                .add_page(pt_to_mm(self.width), pt_to_mm(self.height), LAYER_NAME);
        self.pages.push((page, layer));
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(self, filename: &str) -> Result<RenderedPdf, PaperError> {
        let bytes = self
            .doc
            .save_to_bytes()
            .map_err(|e| PaperError::Pdf(e.to_string()))?;
        tracing::debug!(filename, pages = self.pages.len(), bytes = bytes.len(), "PDF encoded");
        Ok(RenderedPdf {
            filename: filename.to_string(),
            bytes,
        })
    }
}
