use std::{fs, path::Path};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::ledger::{CellValue, LedgerTable};

use super::{staging_path, LedgerStore, Result};

/// Ledger stored as a CSV file with a header row. Every cell is kept as the
/// text found in the file, so untouched cells are written back unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvStore;

impl LedgerStore for CsvStore {
    fn load(&self, path: &Path) -> Result<LedgerTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::text).collect());
        }
        debug!(path = %path.display(), rows = rows.len(), "loaded CSV ledger");
        Ok(LedgerTable::new(headers, rows))
    }

    fn save(&self, table: &LedgerTable, path: &Path) -> Result<()> {
        let tmp = staging_path(path);
        {
            let mut writer = WriterBuilder::new().flexible(true).from_path(&tmp)?;
            writer.write_record(&table.headers)?;
            for row in &table.rows {
                let width = row.len().max(table.headers.len());
                let cells = (0..width).map(|col| {
                    row.get(col)
                        .map(ToString::to_string)
                        .unwrap_or_default()
                });
                writer.write_record(cells)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), rows = table.len(), "wrote CSV ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rewrite_preserves_columns_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(
            &path,
            "Date,Description,Amount\n03/10/2024,\"UBER, EATS\",12.50\n03/11/2024,TESCO,3\n",
        )
        .unwrap();

        let mut table = CsvStore.load(&path).unwrap();
        assert_eq!(table.headers, ["Date", "Description", "Amount"]);
        assert_eq!(table.cell(0, 1).to_string(), "UBER, EATS");

        let col = table.ensure_column("Uploaded");
        table.set_cell(0, col, CellValue::text("Yes"));
        CsvStore.save(&table, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Date,Description,Amount,Uploaded\n03/10/2024,\"UBER, EATS\",12.50,Yes\n03/11/2024,TESCO,3,\n"
        );
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, "Date,Description\n2024-03-01\n").unwrap();

        let table = CsvStore.load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.cell(0, 1).is_empty());
    }
}
