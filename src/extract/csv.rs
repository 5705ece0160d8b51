use ::csv::ReaderBuilder;

use super::ExtractError;
use crate::table::RecordTable;

/// Parse a CSV upload, first row as header.
pub fn extract(bytes: &[u8]) -> Result<RecordTable, ExtractError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let columns: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(RecordTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_rows() {
        let data = b"Departamento,Cargo,CPF,Status\nRH,Analista,111,Ativo\nTI,Dev,222,Inativo\n";
        let table = extract(data).unwrap();
        assert_eq!(
            table.columns,
            vec!["Departamento", "Cargo", "CPF", "Status"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][1], "Dev");
    }

    #[test]
    fn quoted_fields_survive() {
        let data = b"Cargo,Status\n\"Analista, Pleno\",Ativo\n";
        let table = extract(data).unwrap();
        assert_eq!(table.rows[0][0], "Analista, Pleno");
    }

    #[test]
    fn unbalanced_quotes_propagate_the_library_error() {
        let data = b"a,b\n\"broken,1\nx,2\n";
        assert!(extract(data).is_err());
    }
}
