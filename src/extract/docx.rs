use std::io::Cursor;

use docx_rust::document::{BodyContent, ParagraphContent, RunContent};
use docx_rust::DocxFile;

use super::ExtractError;

/// Extract paragraph text in document order, one line per paragraph.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let file = DocxFile::from_reader(Cursor::new(bytes.to_vec()))?;
    let docx = file.parse()?;

    let mut text = String::new();
    for content in &docx.document.body.content {
        if let BodyContent::Paragraph(paragraph) = content {
            for item in &paragraph.content {
                if let ParagraphContent::Run(run) = item {
                    for piece in &run.content {
                        if let RunContent::Text(t) = piece {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rust::document::Paragraph;
    use docx_rust::Docx;

    fn two_paragraph_docx() -> Vec<u8> {
        let mut docx = Docx::default();
        docx.document
            .push(Paragraph::default().push_text("Contrato de trabalho"));
        docx.document
            .push(Paragraph::default().push_text("Assinado em 2024"));

        let mut buf = Cursor::new(Vec::new());
        docx.write(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn extracts_paragraphs_in_order() {
        let bytes = two_paragraph_docx();
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "Contrato de trabalho\nAssinado em 2024\n");
    }

    #[test]
    fn malformed_bytes_propagate_the_library_error() {
        assert!(matches!(
            extract(b"not a docx archive"),
            Err(ExtractError::Docx(_))
        ));
    }
}
