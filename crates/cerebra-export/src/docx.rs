use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

const HEADING_STYLE: &str = "Heading1";
const BULLET: char = '\u{2022}';

/// Generate a DOCX package from plain report text.
pub fn generate_docx(report: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    document(report, styles)
        .build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Lay out plain report text as a DOCX document:
///
/// - a line directly followed by a dashed rule → Heading 1
/// - dashed rules (`---…`) → dropped
/// - `• item` → bullet paragraph
/// - blank line → empty paragraph
/// - everything else → body paragraph
pub fn document(report: &str, styles: &DocumentStyles) -> Docx {
    let mut docx = Docx::new().add_style(heading_style(styles));

    let lines: Vec<&str> = report.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if is_rule(trimmed) {
            continue;
        }
        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }

        let underlined = lines.get(i + 1).is_some_and(|next| is_rule(next.trim()));
        let paragraph = if underlined {
            heading_paragraph(trimmed)
        } else if let Some(text) = trimmed.strip_prefix(BULLET) {
            bullet_paragraph(text.trim_start(), styles)
        } else {
            body_paragraph(trimmed, styles)
        };
        docx = docx.add_paragraph(paragraph);
    }
    docx
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

fn heading_style(styles: &DocumentStyles) -> Style {
    Style::new(HEADING_STYLE, StyleType::Paragraph)
        .name("heading 1")
        .size(half_points(styles.heading_size))
        .bold()
}

fn heading_paragraph(text: &str) -> Paragraph {
    Paragraph::new()
        .style(HEADING_STYLE)
        .add_run(Run::new().add_text(text))
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run(&format!("{BULLET} "), styles))
        .add_run(body_run(text, styles))
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run(text, styles))
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(half_points(styles.body_size))
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

// OOXML sizes are in half-points
fn half_points(size_pt: f32) -> usize {
    (size_pt * 2.0).round() as usize
}
