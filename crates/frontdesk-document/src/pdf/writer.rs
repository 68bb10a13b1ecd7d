// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — lay out a `RenderedDocument` on paper using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.
//
// Builtin PDF fonts have no Thai glyphs. When a TrueType font is supplied it
// is embedded and used for all text; otherwise Helvetica is used and Thai
// characters will not show on paper.

use std::path::Path;

use frontdesk_core::PaperSize;
use frontdesk_core::error::FrontDeskError;
use printpdf::{
    BuiltinFont, FontId, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg,
    Point, Pt, TextItem,
};
use tracing::{debug, info, instrument, warn};

use crate::render::document::{Block, RenderedDocument};
use crate::render::format::thai_date;

const MARGIN_MM: f32 = 20.0;
const BODY_SIZE_PT: f32 = 11.0;
const TITLE_SIZE_PT: f32 = 18.0;
const HEADING_SIZE_PT: f32 = 13.0;
const LINE_HEIGHT_PT: f32 = 16.0;

/// Creates print-ready PDFs from rendered documents.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Raw TrueType bytes of a font with Thai coverage.
    font_bytes: Option<Vec<u8>>,
}

/// Font chosen for a given document.
#[derive(Clone)]
enum PageFont {
    Builtin,
    Embedded(FontId),
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            font_bytes: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Embed the given TrueType font bytes in every document.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.font_bytes = Some(bytes);
        self
    }

    /// Load a TrueType font from disk for embedding.
    pub fn with_font_file(self, path: impl AsRef<Path>) -> Result<Self, FrontDeskError> {
        let bytes = std::fs::read(path.as_ref())?;
        info!(path = %path.as_ref().display(), "Thai font loaded");
        Ok(self.with_font_bytes(bytes))
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    fn register_font(&self, doc: &mut PdfDocument) -> PageFont {
        let Some(bytes) = self.font_bytes.as_deref() else {
            return PageFont::Builtin;
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        match ParsedFont::from_bytes(bytes, 0, &mut warnings) {
            Some(font) => PageFont::Embedded(doc.add_font(&font)),
            None => {
                warn!("font could not be parsed, falling back to Helvetica");
                PageFont::Builtin
            }
        }
    }

    /// Lay out a rendered document on one or more pages.
    #[instrument(skip_all, fields(kind = ?document.kind, number = %document.number))]
    pub fn render_document(&self, document: &RenderedDocument) -> Result<Vec<u8>, FrontDeskError> {
        let (page_w, page_h) = self.page_dimensions();
        info!(paper = ?self.paper_size, "Creating document PDF");

        let mut doc = PdfDocument::new(&document.title);
        let font = self.register_font(&mut doc);

        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        let right_edge = page_w_pt - margin_pt;
        let usable_w_pt = page_w_pt - 2.0 * margin_pt;
        let max_chars = (usable_w_pt / (0.5 * BODY_SIZE_PT)) as usize;

        let mut layout = Layout {
            font,
            top: page_h_pt - margin_pt,
            bottom: margin_pt,
            y: page_h_pt - margin_pt,
            ops: Vec::new(),
            pages: Vec::new(),
            page_w,
            page_h,
        };

        for line in &document.header {
            layout.text(margin_pt, line, BODY_SIZE_PT, false);
        }
        layout.gap();
        layout.text(margin_pt, &document.title, TITLE_SIZE_PT, true);
        layout.text(margin_pt, &document.subtitle, BODY_SIZE_PT, false);
        layout.text(
            margin_pt,
            &format!(
                "เลขที่ {}    วันที่ {}",
                document.number,
                thai_date(document.issued_on)
            ),
            BODY_SIZE_PT,
            false,
        );
        layout.gap();

        for block in &document.blocks {
            match block {
                Block::Heading(text) => {
                    layout.gap();
                    layout.text(margin_pt, text, HEADING_SIZE_PT, true);
                }
                Block::Field { label, value } => {
                    for (i, line) in wrap_text(&format!("{label}: {value}"), max_chars)
                        .iter()
                        .enumerate()
                    {
                        let indent = if i == 0 { 0.0 } else { 12.0 };
                        layout.text(margin_pt + indent, line, BODY_SIZE_PT, false);
                    }
                }
                Block::LineItem {
                    description,
                    amount,
                } => {
                    layout.right_aligned_pair(
                        margin_pt,
                        right_edge,
                        description,
                        amount,
                        BODY_SIZE_PT,
                        false,
                    );
                }
                Block::Total {
                    label,
                    amount,
                    grand,
                } => {
                    let size = if *grand { HEADING_SIZE_PT } else { BODY_SIZE_PT };
                    layout.right_aligned_pair(margin_pt, right_edge, label, amount, size, *grand);
                }
                Block::Signature(role) => {
                    layout.gap();
                    layout.gap();
                    let x = right_edge - 220.0;
                    layout.text(x, "ลงชื่อ ........................................", BODY_SIZE_PT, false);
                    layout.text(x + 40.0, &format!("({role})"), BODY_SIZE_PT, false);
                }
                Block::Note(text) => {
                    for line in wrap_text(text, max_chars) {
                        layout.text(margin_pt, &line, BODY_SIZE_PT - 2.0, false);
                    }
                }
                Block::Spacer => layout.gap(),
            }
        }

        let pages = layout.finish();
        debug!(pages = pages.len(), "Document layout complete");
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if output.is_empty() {
            return Err(FrontDeskError::PdfError("serialiser produced no bytes".into()));
        }
        Ok(output)
    }
}

/// Top-to-bottom cursor that starts a new page when it runs out of room.
struct Layout {
    font: PageFont,
    top: f32,
    bottom: f32,
    y: f32,
    ops: Vec<Op>,
    pages: Vec<PdfPage>,
    page_w: Mm,
    page_h: Mm,
}

impl Layout {
    fn advance(&mut self, height: f32) {
        if self.y - height < self.bottom {
            let ops = std::mem::take(&mut self.ops);
            self.pages.push(PdfPage::new(self.page_w, self.page_h, ops));
            self.y = self.top;
        }
        self.y -= height;
    }

    fn gap(&mut self) {
        self.advance(LINE_HEIGHT_PT / 2.0);
    }

    fn text(&mut self, x: f32, text: &str, size: f32, bold: bool) {
        self.advance(LINE_HEIGHT_PT.max(size * 1.3));
        let y = self.y;
        self.place(x, y, text, size, bold);
    }

    /// Label on the left, amount flush against the right margin, same line.
    fn right_aligned_pair(
        &mut self,
        left: f32,
        right: f32,
        label: &str,
        amount: &str,
        size: f32,
        bold: bool,
    ) {
        self.advance(LINE_HEIGHT_PT.max(size * 1.3));
        let y = self.y;
        self.place(left, y, label, size, bold);
        let width = estimate_width(amount, size);
        self.place(right - width, y, amount, size, bold);
    }

    fn place(&mut self, x: f32, y: f32, text: &str, size: f32, bold: bool) {
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        });
        match &self.font {
            PageFont::Builtin => {
                let font = if bold {
                    BuiltinFont::HelveticaBold
                } else {
                    BuiltinFont::Helvetica
                };
                self.ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font,
                });
                self.ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.to_string())],
                    font,
                });
            }
            PageFont::Embedded(id) => {
                self.ops.push(Op::SetFontSize {
                    size: Pt(size),
                    font: id.clone(),
                });
                self.ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: id.clone(),
                });
            }
        }
        self.ops.push(Op::EndTextSection);
    }

    fn finish(mut self) -> Vec<PdfPage> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            let ops = std::mem::take(&mut self.ops);
            self.pages.push(PdfPage::new(self.page_w, self.page_h, ops));
        }
        self.pages
    }
}

/// Rough rendered width of `text` in points; average glyph width is about
/// half the font size.
fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * 0.5 * size
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a string so that no line exceeds `max_width` characters.
///
/// Counts `char`s rather than bytes so Thai text never splits inside a code
/// point. Words longer than `max_width` are force-broken.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;

        for word in words {
            let word_len = word.chars().count();
            if word_len > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        result.push(chunk.iter().collect());
                    } else {
                        current = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
            } else if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current, word.to_string()));
                current_len = word_len;
            }
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::templates::DocumentRenderer;
    use chrono::NaiveDate;
    use frontdesk_core::config::HotelProfile;
    use frontdesk_core::{DocumentKind, GuestData};

    fn sample(kind: DocumentKind) -> RenderedDocument {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");
        let guest = GuestData {
            id_number: "1-2345-67890-1".into(),
            first_name_en: "Somchai".into(),
            ..Default::default()
        };
        DocumentRenderer::new(HotelProfile::default(), 7.0, date).render(
            &guest,
            kind,
            1500.0,
            "101",
            "Room charge",
        )
    }

    #[test]
    fn renders_every_kind_as_pdf() {
        let writer = PdfWriter::a4();
        for kind in DocumentKind::ALL {
            let bytes = writer.render_document(&sample(kind)).expect("render");
            assert!(bytes.starts_with(b"%PDF"), "{kind:?} output is not a PDF");
        }
    }

    #[test]
    fn unparseable_font_falls_back_to_builtin() {
        let writer = PdfWriter::a4().with_font_bytes(b"not a font".to_vec());
        let bytes = writer
            .render_document(&sample(DocumentKind::TaxInvoice))
            .expect("render with fallback font");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let result = PdfWriter::a4().with_font_file("/nonexistent/thai.ttf");
        assert!(matches!(result, Err(FrontDeskError::Io(_))));
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        let lines = wrap_text("กกกกกกกกกก ขข", 4);
        assert_eq!(lines, vec!["กกกก", "กกกก", "กก", "ขข"]);
    }

    #[test]
    fn wrap_preserves_blank_paragraphs() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }
}
