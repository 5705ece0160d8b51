//! File extraction
//!
//! One stateless extractor per supported upload format, plus the MIME
//! dispatcher that picks between them. Tabular formats produce a
//! [`RecordTable`], text formats a flat string; anything the underlying
//! library rejects propagates out as an [`ExtractError`] and ends the
//! render pass.

pub mod csv;
pub mod docx;
pub mod excel;
pub mod pdf;

use crate::table::RecordTable;

pub const MIME_CSV: &str = "text/csv";
pub const MIME_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    Csv,
    Spreadsheet,
    Pdf,
    Docx,
}

impl SupportedFormat {
    /// Route on the browser-declared MIME type. Exact match only; an
    /// unrecognized type yields `None` and the shell renders nothing
    /// beyond the upload control.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            MIME_CSV => Some(Self::Csv),
            MIME_XLSX => Some(Self::Spreadsheet),
            MIME_PDF => Some(Self::Pdf),
            MIME_DOCX => Some(Self::Docx),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Extracted {
    Table(RecordTable),
    Text(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Spreadsheet parse error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("Workbook has no sheets")]
    EmptyWorkbook,

    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX parse error: {0}")]
    Docx(#[from] docx_rust::DocxError),
}

/// Run the extractor matching an already-dispatched format.
pub fn extract(bytes: &[u8], format: SupportedFormat) -> Result<Extracted, ExtractError> {
    match format {
        SupportedFormat::Csv => Ok(Extracted::Table(csv::extract(bytes)?)),
        SupportedFormat::Spreadsheet => Ok(Extracted::Table(excel::extract(bytes)?)),
        SupportedFormat::Pdf => Ok(Extracted::Text(pdf::extract(bytes)?)),
        SupportedFormat::Docx => Ok(Extracted::Text(docx::extract(bytes)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_the_four_known_types() {
        assert_eq!(SupportedFormat::from_mime(MIME_CSV), Some(SupportedFormat::Csv));
        assert_eq!(
            SupportedFormat::from_mime(MIME_XLSX),
            Some(SupportedFormat::Spreadsheet)
        );
        assert_eq!(SupportedFormat::from_mime(MIME_PDF), Some(SupportedFormat::Pdf));
        assert_eq!(SupportedFormat::from_mime(MIME_DOCX), Some(SupportedFormat::Docx));
    }

    #[test]
    fn dispatch_is_exact_match_only() {
        assert_eq!(SupportedFormat::from_mime("text/plain"), None);
        assert_eq!(SupportedFormat::from_mime("text/csv; charset=utf-8"), None);
        assert_eq!(SupportedFormat::from_mime(""), None);
    }
}
