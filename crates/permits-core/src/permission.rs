use crate::config::Workday;
use crate::range::DateRange;
use crate::record::AttendanceRecord;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

// ---------------------------------------------------------------------------
// PermissionEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    LateArrival,
    EarlyLeave,
}

/// A window of absence inside the expected workday. `minutes` is always >= 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    /// Source line of the attendance record the window came from.
    pub line: usize,
    pub kind: PermissionKind,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub minutes: i64,
}

impl PermissionEntry {
    fn window(
        line: usize,
        kind: PermissionKind,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Option<Self> {
        // num_minutes truncates toward zero
        let minutes = (to - from).num_minutes();
        (minutes >= 1).then_some(Self {
            line,
            kind,
            from,
            to,
            minutes,
        })
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Latest time the employee may leave: `actual_in + shift`, never past the workday end.
pub fn exit_limit(date: NaiveDate, actual_in: NaiveDateTime, workday: &Workday) -> NaiveDateTime {
    let cap = date.and_time(workday.end);
    // An unrepresentable shift end lies past any workday end.
    TimeDelta::try_minutes(workday.shift_minutes)
        .and_then(|shift| actual_in.checked_add_signed(shift))
        .map_or(cap, |shift_end| shift_end.min(cap))
}

/// Evaluate a single record. Late arrival comes before early leave.
pub fn evaluate(record: &AttendanceRecord, workday: &Workday) -> Vec<PermissionEntry> {
    let (Some(actual_in), Some(actual_out)) = (record.actual_in, record.actual_out) else {
        return Vec::new();
    };

    let start = record.date.and_time(workday.start);
    let limit = exit_limit(record.date, actual_in, workday);

    let mut entries = Vec::with_capacity(2);
    if actual_in > start {
        entries.extend(PermissionEntry::window(
            record.line,
            PermissionKind::LateArrival,
            start,
            actual_in,
        ));
    }
    if actual_out < limit {
        entries.extend(PermissionEntry::window(
            record.line,
            PermissionKind::EarlyLeave,
            actual_out,
            limit,
        ));
    }
    entries
}

/// Produce permission entries for every complete record inside `range`, in input order.
pub fn extract(
    records: &[AttendanceRecord],
    range: &DateRange,
    workday: &Workday,
) -> Vec<PermissionEntry> {
    records
        .iter()
        .filter(|r| r.is_complete() && range.contains(r.date))
        .flat_map(|r| evaluate(r, workday))
        .collect()
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub entries: usize,
    pub late_arrivals: usize,
    pub early_leaves: usize,
    pub total_minutes: i64,
}

pub fn summarize(entries: &[PermissionEntry]) -> Summary {
    let late_arrivals = entries
        .iter()
        .filter(|e| e.kind == PermissionKind::LateArrival)
        .count();
    Summary {
        entries: entries.len(),
        late_arrivals,
        early_leaves: entries.len() - late_arrivals,
        total_minutes: entries.iter().map(|e| e.minutes).sum(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
