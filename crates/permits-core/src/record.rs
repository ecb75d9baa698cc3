use chrono::{NaiveDate, NaiveDateTime};

/// Format of the Gregorian transaction date column.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of the actual entry/exit timestamp columns.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One attendance row after parsing.
///
/// `actual_in` / `actual_out` are `None` when the export left the cell blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// 1-based line in the source file (the header is line 1).
    pub line: usize,
    pub date: NaiveDate,
    pub actual_in: Option<NaiveDateTime>,
    pub actual_out: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    pub fn new(
        date: NaiveDate,
        actual_in: Option<NaiveDateTime>,
        actual_out: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            line: 0,
            date,
            actual_in,
            actual_out,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.actual_in.is_some() && self.actual_out.is_some()
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// Treats empty and whitespace-only cells as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn parses_day_first_dates() {
        let d = parse_date("01/05/2025").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    }

    #[test]
    fn rejects_month_first_dates() {
        assert!(parse_date("05/31/2025").is_none());
        assert!(parse_date("2025-05-01").is_none());
    }

    #[test]
    fn parses_year_first_timestamps() {
        let ts = parse_timestamp(" 2025/05/01 09:15:30 ").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert_eq!(ts.time(), NaiveTime::from_hms_opt(9, 15, 30).unwrap());
    }

    #[test]
    fn timestamp_requires_seconds() {
        assert!(parse_timestamp("2025/05/01 09:15").is_none());
    }

    #[test]
    fn blank_cells_are_absent() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" x ")), Some("x"));
    }

    #[test]
    fn completeness_needs_both_times() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let ts = date.and_hms_opt(9, 0, 0).unwrap();
        assert!(AttendanceRecord::new(date, Some(ts), Some(ts)).is_complete());
        assert!(!AttendanceRecord::new(date, Some(ts), None).is_complete());
        assert!(!AttendanceRecord::new(date, None, Some(ts)).is_complete());
    }
}
