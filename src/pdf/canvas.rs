//! Per-fragment page canvas
//!
//! Each section renderer draws onto its own `Canvas` and finishes it into an
//! immutable [`SectionFragment`]; nothing is shared between sections. The
//! canvas writes raw PDF content-stream operators and assembles a complete
//! single-section document with lopdf.

use lopdf::{Dictionary, Document, Object, Stream};

use crate::content::SectionKind;
use crate::error::Result;
use crate::layout::PageDimensions;

/// Fonts available on worksheet pages (standard PDF base fonts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn base_font(&self) -> &'static [u8] {
        match self {
            Font::Helvetica => b"Helvetica",
            Font::HelveticaBold => b"Helvetica-Bold",
        }
    }
}

/// A finished, paginated section of the final document
///
/// Opaque to the assembler: a byte buffer holding a complete PDF, plus the
/// page count for logging. Ownership moves to the merge step.
#[derive(Debug, Clone)]
pub struct SectionFragment {
    kind: SectionKind,
    bytes: Vec<u8>,
    page_count: usize,
}

impl SectionFragment {
    /// Wrap an already-rendered PDF as a section fragment
    pub fn from_bytes(kind: SectionKind, bytes: Vec<u8>, page_count: usize) -> Self {
        Self {
            kind,
            bytes,
            page_count,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Text drawing surface for one section
///
/// Coordinates are millimetres with the origin at the bottom-left of an A4
/// page, matching the PDF coordinate system.
pub struct Canvas {
    page: PageDimensions,
    ops: String,
    finished_pages: Vec<String>,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            page: PageDimensions::a4(),
            ops: String::from("0 g\n"),
            finished_pages: Vec::new(),
        }
    }

    /// Draw `text` with its left edge at `x_mm`
    pub fn text(&mut self, x_mm: f64, y_mm: f64, font: Font, size: f64, text: &str) {
        self.show_text(x_mm, y_mm, font, size, text);
    }

    /// Draw `text` with its right edge at `right_mm`
    pub fn text_right(&mut self, right_mm: f64, y_mm: f64, font: Font, size: f64, text: &str) {
        let width_mm = text_width_mm(text, size);
        self.show_text(right_mm - width_mm, y_mm, font, size, text);
    }

    fn show_text(&mut self, x_mm: f64, y_mm: f64, font: Font, size: f64, text: &str) {
        let x = mm_to_pt(x_mm);
        let y = mm_to_pt(y_mm);
        let escaped = escape_pdf_string(&sanitize_text(text));

        self.ops.push_str("BT\n");
        self.ops
            .push_str(&format!("/{} {:.1} Tf\n", font.resource_name(), size));
        self.ops.push_str(&format!("1 0 0 1 {x:.2} {y:.2} Tm\n"));
        self.ops.push_str(&format!("({escaped}) Tj\n"));
        self.ops.push_str("ET\n");
    }

    /// Finish the current page and start a new one
    pub fn break_page(&mut self) {
        let ops = std::mem::replace(&mut self.ops, String::from("0 g\n"));
        self.finished_pages.push(ops);
    }

    /// Build the finished fragment
    pub fn finish(mut self, kind: SectionKind) -> Result<SectionFragment> {
        self.finished_pages.push(self.ops);
        let page_count = self.finished_pages.len();

        let mut doc = Document::with_version("1.5");

        let regular_id = doc.add_object(standard_font(Font::Helvetica));
        let bold_id = doc.add_object(standard_font(Font::HelveticaBold));

        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for ops in self.finished_pages {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), ops.into_bytes()));

            let mut fonts = Dictionary::new();
            fonts.set(Font::Helvetica.resource_name(), Object::Reference(regular_id));
            fonts.set(Font::HelveticaBold.resource_name(), Object::Reference(bold_id));
            let mut resources = Dictionary::new();
            resources.set("Font", Object::Dictionary(fonts));

            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(self.page.width.pt() as f32),
                    Object::Real(self.page.height.pt() as f32),
                ]),
            );
            page.set("Contents", Object::Reference(content_id));
            page.set("Resources", Object::Dictionary(resources));

            let page_id = doc.add_object(Object::Dictionary(page));
            kids.push(Object::Reference(page_id));
        }

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(page_count as i64));
        pages_object.set("Kids", Object::Array(kids));
        doc.objects.insert(pages_id, Object::Dictionary(pages_object));

        let catalog_id = doc.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        doc.objects.insert(catalog_id, Object::Dictionary(catalog));

        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        Ok(SectionFragment {
            kind,
            bytes,
            page_count,
        })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

fn standard_font(font: Font) -> Object {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Font".to_vec()));
    dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    dict.set("BaseFont", Object::Name(font.base_font().to_vec()));
    Object::Dictionary(dict)
}

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

/// Estimate text width in millimetres
///
/// Average Helvetica advance is roughly half the font size. Good enough for
/// right-alignment and wrapping; exact metrics are not a goal.
pub fn text_width_mm(text: &str, size: f64) -> f64 {
    let points = text.chars().count() as f64 * size * 0.5;
    points * 25.4 / 72.0
}

/// Greedy word wrap of a single paragraph into lines at most `width_mm` wide
pub fn wrap_text(text: &str, size: f64, width_mm: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width_mm(&candidate, size) <= width_mm || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Map typographic characters the content source likes to emit down to
/// ASCII; anything else outside the printable range becomes '?'
fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            c if c.is_ascii_graphic() || c == ' ' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Escape special characters in PDF strings
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}
