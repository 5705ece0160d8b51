use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use super::ExtractError;
use crate::table::RecordTable;

/// Parse the first worksheet of an OOXML spreadsheet, first row as header.
pub fn extract(bytes: &[u8]) -> Result<RecordTable, ExtractError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ExtractError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows_iter = range.rows();
    let columns: Vec<String> = match rows_iter.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RecordTable::new(columns, rows))
}

// Date cells come out as ISO strings so the trend analysis can parse them.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => {
                ndt.date().format("%Y-%m-%d").to_string()
            }
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bytes_propagate_the_library_error() {
        assert!(matches!(
            extract(b"definitely not a zip archive"),
            Err(ExtractError::Spreadsheet(_))
        ));
    }

    #[test]
    fn float_cells_render_without_trailing_zeroes() {
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
    }

    #[test]
    fn empty_cells_render_as_empty_strings() {
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
