use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

/// Archive folder for a document date, e.g. `03 March`.
///
/// Uses a fixed English table so folder names do not depend on the host locale.
pub fn month_folder_name(date: NaiveDate) -> String {
    let month = date.month();
    // month() is always 1..=12
    let name = month_name(month).unwrap_or("Unknown");
    format!("{month:02} {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn folder_name_pads_month_number() {
        assert_eq!(month_folder_name(date(2024, 3, 15)), "03 March");
        assert_eq!(month_folder_name(date(2024, 11, 1)), "11 November");
        assert_eq!(month_folder_name(date(2023, 1, 31)), "01 January");
    }

    #[test]
    fn month_name_rejects_out_of_range() {
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(12), Some("December"));
    }
}
