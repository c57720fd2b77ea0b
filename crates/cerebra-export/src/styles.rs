use serde::{Deserialize, Serialize};

/// Page and text styling shared by the PDF and DOCX exports.
///
/// Lengths are in PostScript points (1/72 inch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text in the DOCX export. The PDF always uses the
    /// built-in Helvetica.
    pub body_font: String,

    /// Body text font size.
    pub body_size: f32,

    /// Baseline-to-baseline distance for wrapped body lines.
    pub leading: f32,

    /// Vertical gap added after every paragraph.
    pub paragraph_spacing: f32,

    /// Heading size in the DOCX export.
    pub heading_size: f32,

    pub page_width: f32,
    pub page_height: f32,

    /// Page margin, applied to all four sides.
    pub margin: f32,
}

impl DocumentStyles {
    pub fn text_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Helvetica".to_string(),
            body_size: 10.0,
            leading: 12.0,
            paragraph_spacing: 0.2 * 72.0,
            heading_size: 12.0,
            // A4
            page_width: 595.28,
            page_height: 841.89,
            margin: 40.0,
        }
    }
}
