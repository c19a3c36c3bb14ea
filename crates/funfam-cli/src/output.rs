//! Rendering and saving result tables

use crate::api::{ScanResults, PRIMARY_SCAN_KEY, RESOLVED_SCAN_KEY};
use crate::error::Result;
use clap::ValueEnum;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use funfam_common::table::cell_text;
use funfam_common::HitTable;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the full scan table
pub const PRIMARY_CSV: &str = "funfam_scan.csv";

/// File name of the resolved scan table
pub const RESOLVED_CSV: &str = "funfam_resolved_scan.csv";

/// How results are printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Format both result sets for display
pub fn render(results: &ScanResults, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format!(
            "{}\n{}\n{}\n{}",
            PRIMARY_SCAN_KEY,
            format_as_table(&results.primary),
            RESOLVED_SCAN_KEY,
            format_as_table(&results.resolved)
        )),
        OutputFormat::Csv => Ok(format!(
            "# {}\n{}# {}\n{}",
            PRIMARY_SCAN_KEY,
            results.primary.to_csv(),
            RESOLVED_SCAN_KEY,
            results.resolved.to_csv()
        )),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                PRIMARY_SCAN_KEY: results.primary.to_records(),
                RESOLVED_SCAN_KEY: results.resolved.to_records(),
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
    }
}

/// Format one table for the terminal
fn format_as_table(table: &HitTable) -> String {
    if table.is_empty() {
        return "(no hits)\n".to_string();
    }

    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(&table.columns);

    for row in &table.rows {
        out.add_row(row.iter().map(cell_text).collect::<Vec<_>>());
    }

    format!("{}\n", out)
}

/// Write both tables as CSV into `dir`.
///
/// Both files are rendered before either is written, and each is written to
/// a temporary file in `dir` and renamed into place, so a failure never
/// leaves a half-written table behind.
pub fn write_result_files(results: &ScanResults, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let primary = results.primary.to_csv();
    let resolved = results.resolved.to_csv();

    std::fs::create_dir_all(dir)?;

    let primary_path = dir.join(PRIMARY_CSV);
    let resolved_path = dir.join(RESOLVED_CSV);

    write_atomic(dir, &primary_path, &primary)?;
    write_atomic(dir, &resolved_path, &resolved)?;

    Ok((primary_path, resolved_path))
}

fn write_atomic(dir: &Path, path: &Path, contents: &str) -> Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = contents.len(), "Wrote result table");
    Ok(())
}
