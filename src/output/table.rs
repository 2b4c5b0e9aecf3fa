//! Fixed-width text table output.
//!
//! Same column layout the analyzer prints on stdout, so existing
//! line-based consumers can keep parsing it.

use super::json::prepare_output_path;
use crate::parser::schema::LayoutRecord;
use crate::utils::config::ROOT_DISPLAY_PATH;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const PATH_WIDTH: usize = 70;
const COLUMN_WIDTH: usize = 10;
const HEADERS: [&str; 10] = [
    "Type", "Root_W", "Root_D", "Child_W", "Child_D", "Child_X", "Child_Y", "Lines", "Methods",
    "Attrs",
];

/// Render records as a fixed-width table
///
/// The root row shows `N/A` for the columns that only make sense
/// relative to a parent. Paths longer than the column are kept whole.
pub fn render_table(records: &[LayoutRecord]) -> String {
    let mut out = String::new();

    out.push_str(&pad("Path", PATH_WIDTH));
    for header in HEADERS {
        out.push_str(&pad(header, COLUMN_WIDTH));
    }
    out.push('\n');
    out.push_str(&"-".repeat(PATH_WIDTH + COLUMN_WIDTH * HEADERS.len()));
    out.push('\n');

    for record in records {
        out.push_str(&render_row(record));
        out.push('\n');
    }

    out
}

fn render_row(record: &LayoutRecord) -> String {
    let is_root = record.path == ROOT_DISPLAY_PATH;
    let relative = |value: f64| {
        if is_root {
            "N/A".to_string()
        } else {
            format!("{:.2}", value)
        }
    };

    let cells = [
        record.kind.to_string(),
        format!("{:.2}", record.root_w),
        format!("{:.2}", record.root_d),
        relative(record.child_w),
        relative(record.child_d),
        relative(record.child_x),
        relative(record.child_y),
        record.lines.to_string(),
        record.methods.to_string(),
        record.attributes.to_string(),
    ];

    let mut row = pad_path(&record.path);
    for cell in &cells {
        row.push_str(&pad(cell, COLUMN_WIDTH));
    }
    row.trim_end().to_string()
}

fn pad(value: &str, width: usize) -> String {
    format!("{:<width$} ", value, width = width.saturating_sub(1))
}

// Paths must stay whole: consumers split rows on whitespace.
fn pad_path(path: &str) -> String {
    if path.chars().count() >= PATH_WIDTH {
        format!("{} ", path)
    } else {
        pad(path, PATH_WIDTH)
    }
}

/// Write a rendered table to a file
pub fn write_table(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing table to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}
