use std::{fs, path::Path};

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::{
    errors::LedgerError,
    ledger::{dates::to_excel_serial, CellValue, LedgerTable},
};

use super::{staging_path, LedgerStore, Result};

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Spreadsheet ledger. Any format calamine understands can be read; only
/// `.xlsx` is written back, as a single-sheet workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxStore;

impl LedgerStore for XlsxStore {
    fn load(&self, path: &Path) -> Result<LedgerTable> {
        let mut workbook =
            open_workbook_auto(path).map_err(|err| LedgerError::SpreadsheetRead(err.to_string()))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LedgerError::EmptyWorkbook)?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|err| LedgerError::SpreadsheetRead(err.to_string()))?;

        // Keep the sheet's column positions when the used range starts right of A.
        let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);
        let mut rows = range.rows().map(|cells| {
            std::iter::repeat(CellValue::Empty)
                .take(leading)
                .chain(cells.iter().map(cell_value))
                .collect::<Vec<_>>()
        });

        let headers = rows
            .next()
            .map(|cells| cells.iter().map(ToString::to_string).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<CellValue>> = rows.collect();
        debug!(path = %path.display(), sheet = %sheet_name, rows = rows.len(), "loaded spreadsheet ledger");

        Ok(LedgerTable {
            sheet_name: Some(sheet_name),
            headers,
            rows,
        })
    }

    fn save(&self, table: &LedgerTable, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if ext != "xlsx" {
            return Err(LedgerError::ReadOnlyFormat(format!(".{ext}")));
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        if let Some(name) = &table.sheet_name {
            sheet.set_name(name)?;
        }

        let formats = CellFormats {
            date: Format::new().set_num_format(DATE_NUM_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_NUM_FORMAT),
        };
        for (col, header) in table.headers.iter().enumerate() {
            write_cell(sheet, 0, col, &CellValue::text(header.as_str()), &formats)?;
        }
        for (idx, cells) in table.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                write_cell(sheet, idx + 1, col, cell, &formats)?;
            }
        }

        let tmp = staging_path(path);
        workbook.save(&tmp)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), rows = table.len(), "wrote spreadsheet ledger");
        Ok(())
    }
}

struct CellFormats {
    date: Format,
    datetime: Format,
}

fn write_cell(
    sheet: &mut Worksheet,
    row: usize,
    col: usize,
    value: &CellValue,
    formats: &CellFormats,
) -> Result<()> {
    let too_large = || LedgerError::SheetTooLarge { row, col };
    let r = u32::try_from(row).map_err(|_| too_large())?;
    let c = u16::try_from(col).map_err(|_| too_large())?;
    match value {
        CellValue::Empty => {}
        CellValue::Text(text) => {
            sheet.write_string(r, c, text)?;
        }
        CellValue::Number(n) => {
            sheet.write_number(r, c, *n)?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(r, c, *b)?;
        }
        CellValue::Date(dt) => {
            let format = if dt.time() == chrono::NaiveTime::MIN {
                &formats.date
            } else {
                &formats.datetime
            };
            sheet.write_number_with_format(r, c, to_excel_serial(*dt), format)?;
        }
    }
    Ok(())
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::text(text.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(value) => match value.as_datetime() {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Number(value.as_f64()),
        },
        Data::DateTimeIso(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
            .map(CellValue::Date)
            .unwrap_or_else(|_| CellValue::text(text.as_str())),
        other => CellValue::text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample() -> LedgerTable {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        LedgerTable {
            sheet_name: Some("March".into()),
            headers: vec!["Date".into(), "Description".into(), "Amount".into()],
            rows: vec![
                vec![
                    CellValue::Date(date),
                    CellValue::text("UBER EATS"),
                    CellValue::Number(12.5),
                ],
                vec![CellValue::text("03/11/2024"), CellValue::text("TESCO")],
            ],
        }
    }

    #[test]
    fn written_workbook_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.xlsx");
        XlsxStore.save(&sample(), &path).unwrap();
        assert!(!staging_path(&path).exists());

        let table = XlsxStore.load(&path).unwrap();
        assert_eq!(table.sheet_name.as_deref(), Some("March"));
        assert_eq!(table.headers, ["Date", "Description", "Amount"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.cell(0, 0).as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(table.cell(0, 1).to_string(), "UBER EATS");
        assert_eq!(table.cell(0, 2), &CellValue::Number(12.5));
        assert_eq!(
            table.cell(1, 0).as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 11)
        );
        assert!(table.cell(1, 2).is_empty());
    }

    #[test]
    fn legacy_formats_are_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.xls");
        let err = XlsxStore.save(&sample(), &path).unwrap_err();
        assert!(matches!(err, LedgerError::ReadOnlyFormat(ext) if ext == ".xls"));
        assert!(!path.exists());
    }

    #[test]
    fn unreadable_workbook_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.xlsx");
        fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(
            XlsxStore.load(&path),
            Err(LedgerError::SpreadsheetRead(_))
        ));
    }
}
