//! Spreadsheet export of permission entries.

use crate::error::Result;
use crate::format::{format_timestamp, HEADERS};
use crate::io::atomic_write;
use crate::permission::PermissionEntry;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const SHEET_NAME: &str = "Permissions";

/// Render the workbook in memory.
pub fn render_workbook(entries: &[PermissionEntry]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    sheet.set_column_width(0, 20)?;
    sheet.set_column_width(1, 20)?;
    sheet.set_column_width(2, 20)?;

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, format_timestamp(&entry.from))?;
        sheet.write_string(row, 1, format_timestamp(&entry.to))?;
        sheet.write_number(row, 2, entry.minutes as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write the workbook to `path`, replacing any existing file.
pub fn write_workbook(path: &Path, entries: &[PermissionEntry]) -> Result<()> {
    let buffer = render_workbook(entries)?;
    atomic_write(path, &buffer)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "workbook written");
    Ok(())
}
