use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%m.%d.%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Parses a ledger date written as text.
///
/// Numeric dates are read month-first (`03/10/2024` is 10 March) and fall
/// back to day-first when the first number cannot be a month (`13/03/2024`).
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Spreadsheet serial number (days since 1899-12-30) for a timestamp.
pub fn to_excel_serial(value: NaiveDateTime) -> f64 {
    let delta = value - excel_epoch();
    delta.num_milliseconds() as f64 / 86_400_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_ledger_formats() {
        assert_eq!(parse_date_text("2024-03-10"), Some(date(2024, 3, 10)));
        assert_eq!(parse_date_text("03/10/2024"), Some(date(2024, 3, 10)));
        assert_eq!(parse_date_text("10-03-2024"), Some(date(2024, 10, 3)));
        assert_eq!(parse_date_text("10 Mar 2024"), Some(date(2024, 3, 10)));
        assert_eq!(parse_date_text("March 10, 2024"), Some(date(2024, 3, 10)));
        assert_eq!(parse_date_text("2024-03-10 00:00:00"), Some(date(2024, 3, 10)));
    }

    #[test]
    fn day_first_only_when_month_first_is_impossible() {
        assert_eq!(parse_date_text("13/03/2024"), Some(date(2024, 3, 13)));
        assert_eq!(parse_date_text("28.03.2024"), Some(date(2024, 3, 28)));
        assert_eq!(parse_date_text("12/03/2024"), Some(date(2024, 12, 3)));
        assert_eq!(parse_date_text("31/12/2024 09:30"), Some(date(2024, 12, 31)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("pending"), None);
        assert_eq!(parse_date_text("2024-13-40"), None);
    }

    #[test]
    fn serial_numbers_count_days_from_1899() {
        let dt = date(2024, 3, 10).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(to_excel_serial(dt), 45361.0);
        let noon = date(2024, 3, 10).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(to_excel_serial(noon), 45361.5);
    }
}
