use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use super::dates::parse_date_text;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Calendar date held by the cell, either typed or written as text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(dt) => Some(dt.date()),
            CellValue::Text(text) => parse_date_text(text),
            CellValue::Empty | CellValue::Number(_) | CellValue::Bool(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(dt) if dt.time() == chrono::NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            CellValue::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A whole ledger sheet: a header row followed by data rows, kept in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerTable {
    /// Worksheet name for spreadsheet ledgers.
    pub sheet_name: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl LedgerTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            sheet_name: None,
            headers,
            rows,
        }
    }

    /// Index of the column whose header matches `name` (surrounding
    /// whitespace ignored).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Index of column `name`, appending an empty column when it is absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        self.headers.len() - 1
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Writes a cell, padding short rows with empty cells. Rows beyond the
    /// table are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if let Some(cells) = self.rows.get_mut(row) {
            if cells.len() <= col {
                cells.resize(col + 1, CellValue::Empty);
            }
            cells[col] = value;
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LedgerTable {
        LedgerTable::new(
            vec!["Date".into(), " Description ".into()],
            vec![
                vec![CellValue::text("2024-03-10"), CellValue::text("UBER")],
                vec![CellValue::text("2024-03-11")],
            ],
        )
    }

    #[test]
    fn column_lookup_ignores_padding() {
        let t = table();
        assert_eq!(t.column("Description"), Some(1));
        assert_eq!(t.column("Uploaded"), None);
    }

    #[test]
    fn ensure_column_appends_once() {
        let mut t = table();
        let idx = t.ensure_column("Uploaded");
        assert_eq!(idx, 2);
        assert_eq!(t.ensure_column("Uploaded"), 2);
        assert_eq!(t.headers.len(), 3);
        assert!(t.cell(0, idx).is_empty());
    }

    #[test]
    fn set_cell_pads_short_rows() {
        let mut t = table();
        t.set_cell(1, 3, CellValue::text("Yes"));
        assert_eq!(t.rows[1].len(), 4);
        assert_eq!(t.cell(1, 3), &CellValue::Text("Yes".into()));
        assert!(t.cell(1, 1).is_empty());
    }

    #[test]
    fn cells_render_like_a_spreadsheet() {
        assert_eq!(CellValue::Number(12.0).to_string(), "12");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
        let dt = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::Date(dt).to_string(), "2024-03-10");
        assert_eq!(
            CellValue::Date(dt).as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
    }
}
