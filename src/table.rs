//! In-memory tabular record set
//!
//! The unit every filter, summary, and chart operates on. Cells are kept as
//! strings; extractors normalize ragged rows to the header width.

use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Column lookup that is fatal for the render pass when absent.
    pub fn require_column(&self, name: &str) -> AppResult<usize> {
        self.column_index(name)
            .ok_or_else(|| AppError::MissingColumn(name.to_string()))
    }

    /// Distinct values in order of first appearance.
    pub fn distinct(&self, idx: usize) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            let value = &row[idx];
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        seen
    }

    /// Per-value frequencies sorted by descending count, ties alphabetical.
    pub fn value_counts(&self, idx: usize) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let value = &row[idx];
            match counts.iter_mut().find(|(v, _)| v == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Keep only the rows matching the predicate.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| predicate(row));
    }

    /// Serialize as UTF-8 CSV, header first, no index column.
    pub fn to_csv(&self) -> AppResult<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.columns)
            .map_err(|e| AppError::InvalidRequest(format!("CSV encode failed: {e}")))?;
        for row in &self.rows {
            wtr.write_record(row)
                .map_err(|e| AppError::InvalidRequest(format!("CSV encode failed: {e}")))?;
        }
        wtr.into_inner()
            .map_err(|e| AppError::InvalidRequest(format!("CSV encode failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordTable {
        RecordTable::new(
            vec!["Departamento".into(), "Cargo".into()],
            vec![
                vec!["RH".into(), "Analista".into()],
                vec!["TI".into(), "Dev".into()],
                vec!["RH".into(), "Gerente".into()],
                vec!["TI".into(), "Dev".into()],
            ],
        )
    }

    #[test]
    fn distinct_preserves_first_appearance_order() {
        let table = sample();
        assert_eq!(table.distinct(0), vec!["RH".to_string(), "TI".to_string()]);
    }

    #[test]
    fn value_counts_sorted_by_descending_count() {
        let table = sample();
        let counts = table.value_counts(1);
        assert_eq!(counts[0], ("Dev".to_string(), 2));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn require_column_fails_on_absent_column() {
        let table = sample();
        assert!(matches!(
            table.require_column("Status"),
            Err(AppError::MissingColumn(_))
        ));
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let table = RecordTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec!["1".into()]],
        );
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn csv_round_trip_reproduces_rows_and_columns() {
        let table = sample();
        let bytes = table.to_csv().unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(bytes.as_slice());
        let columns: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();

        assert_eq!(columns, table.columns);
        assert_eq!(rows, table.rows);
    }
}
