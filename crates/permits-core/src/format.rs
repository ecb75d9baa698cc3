use crate::permission::PermissionEntry;
use chrono::{NaiveDateTime, Timelike};

/// Period marker before noon.
pub const AM_MARKER: &str = "ص";
/// Period marker from noon on.
pub const PM_MARKER: &str = "م";

pub const HEADERS: [&str; 3] = ["From", "To", "Duration (Minutes)"];

/// Render as `dd/MM/yy hh:mm <marker>` on a 12-hour clock.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    let (is_pm, hour12) = dt.hour12();
    let marker = if is_pm { PM_MARKER } else { AM_MARKER };
    format!(
        "{} {:02}:{:02} {}",
        dt.format("%d/%m/%y"),
        hour12,
        dt.minute(),
        marker
    )
}

/// Tab-separated terminal table, header line first.
pub fn table_lines(entries: &[PermissionEntry]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADERS.join("\t\t"));
    lines.extend(entries.iter().map(|e| {
        format!(
            "{}\t{}\t{}",
            format_timestamp(&e.from),
            format_timestamp(&e.to),
            e.minutes
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::PermissionKind;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn morning_uses_am_marker() {
        assert_eq!(format_timestamp(&ts(9, 5)), "06/05/25 09:05 ص");
    }

    #[test]
    fn afternoon_uses_pm_marker() {
        assert_eq!(format_timestamp(&ts(17, 30)), "06/05/25 05:30 م");
    }

    #[test]
    fn midnight_and_noon_render_as_twelve() {
        assert_eq!(format_timestamp(&ts(0, 0)), "06/05/25 12:00 ص");
        assert_eq!(format_timestamp(&ts(12, 0)), "06/05/25 12:00 م");
    }

    #[test]
    fn table_has_header_and_rows() {
        let entries = [PermissionEntry {
            line: 2,
            kind: PermissionKind::LateArrival,
            from: ts(9, 0),
            to: ts(9, 15),
            minutes: 15,
        }];
        let lines = table_lines(&entries);
        assert_eq!(lines[0], "From\t\tTo\t\tDuration (Minutes)");
        assert_eq!(lines[1], "06/05/25 09:00 ص\t06/05/25 09:15 ص\t15");
        assert_eq!(lines.len(), 2);
    }
}
