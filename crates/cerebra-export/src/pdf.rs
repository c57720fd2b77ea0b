use std::io::{BufWriter, Write};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Average Helvetica glyph width as a fraction of the font size, used to
/// estimate how many characters fit on a line.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const DOCUMENT_TITLE: &str = "Medical Report";
const LAYER_NAME: &str = "Layer 1";

/// Generate a PDF from report text and return its bytes.
///
/// Each input line becomes one paragraph followed by a fixed spacer, flowing
/// onto new pages at the bottom margin. Text is drawn verbatim: there is no
/// markup layer, so `&`, `<` and `>` need no escaping.
pub fn generate_pdf(report: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut buf = BufWriter::new(Vec::new());
    write_pdf(report, styles, &mut buf)?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

/// Generate a PDF from report text into `out`.
pub fn write_pdf<W: Write>(
    report: &str,
    styles: &DocumentStyles,
    out: &mut BufWriter<W>,
) -> Result<(), ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        mm(styles.page_width),
        mm(styles.page_height),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let pages = {
        let mut flow = PageFlow {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            font,
            styles,
            cursor: styles.page_height - styles.margin,
            pages: 1,
        };

        let max_chars = max_chars_per_line(styles);
        for line in report.lines() {
            flow.paragraph(&wrap_text(line, max_chars));
        }
        flow.pages
    };

    doc.save(out)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;

    tracing::debug!(pages, "pdf rendered");
    Ok(())
}

/// Single-column text flow with a top-down cursor measured in points.
struct PageFlow<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    styles: &'a DocumentStyles,
    cursor: f32,
    pages: usize,
}

impl PageFlow<'_> {
    fn paragraph(&mut self, lines: &[String]) {
        for line in lines {
            if self.cursor - self.styles.leading < self.styles.margin {
                self.new_page();
            }
            let baseline = self.cursor - self.styles.body_size;
            self.layer.use_text(
                line.as_str(),
                self.styles.body_size,
                mm(self.styles.margin),
                mm(baseline),
                &self.font,
            );
            self.cursor -= self.styles.leading;
        }
        self.cursor -= self.styles.paragraph_spacing;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            mm(self.styles.page_width),
            mm(self.styles.page_height),
            LAYER_NAME,
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = self.styles.page_height - self.styles.margin;
        self.pages += 1;
    }
}

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn max_chars_per_line(styles: &DocumentStyles) -> usize {
    let per_char = styles.body_size * AVG_GLYPH_WIDTH;
    ((styles.text_width() / per_char) as usize).max(1)
}

/// Word-wrap a paragraph to at most `max_chars` per line. Blank input yields
/// no lines, so an empty paragraph only contributes its spacer. Words longer
/// than a line are hard-broken.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        let mut pieces = chars.chunks(max_chars).peekable();
        while let Some(piece) = pieces.next() {
            let current_len = current.chars().count();
            if !current.is_empty() && current_len + piece.len() + 1 > max_chars {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(piece);
            if pieces.peek().is_some() {
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
