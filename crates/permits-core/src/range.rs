use crate::error::{PermitsError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Calendar-date filter, inclusive at both ends. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(PermitsError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Range that admits every date.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(d(2025, 5, 1)), Some(d(2025, 5, 31))).unwrap();
        assert!(range.contains(d(2025, 5, 1)));
        assert!(range.contains(d(2025, 5, 31)));
        assert!(!range.contains(d(2025, 4, 30)));
        assert!(!range.contains(d(2025, 6, 1)));
    }

    #[test]
    fn open_bounds() {
        let from = DateRange::new(Some(d(2025, 5, 1)), None).unwrap();
        assert!(from.contains(d(2030, 1, 1)));
        assert!(!from.contains(d(2025, 4, 30)));

        let until = DateRange::new(None, Some(d(2025, 5, 31))).unwrap();
        assert!(until.contains(d(2000, 1, 1)));
        assert!(!until.contains(d(2025, 6, 1)));

        assert!(DateRange::all().contains(d(1999, 12, 31)));
        assert!(!DateRange::all().is_bounded());
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::new(Some(d(2025, 5, 7)), Some(d(2025, 5, 7))).unwrap();
        assert!(range.contains(d(2025, 5, 7)));
        assert!(!range.contains(d(2025, 5, 8)));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateRange::new(Some(d(2025, 6, 1)), Some(d(2025, 5, 1))).unwrap_err();
        assert!(matches!(err, PermitsError::InvalidRange { .. }));
    }
}
