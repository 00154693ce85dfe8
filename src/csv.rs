//! Bidirectional materialization of a store to the flat delimited file.
//!
//! The format is deliberately naive: the first two lines are opaque
//! header/metadata, every later line is five comma-separated fields in the
//! fixed order `date,stockLabel,brand,itemId,status`. There is no quoting
//! or escaping, so a comma inside a field is not representable. The derived
//! key is never written.
//!
//! Loading is diagnostic-driven rather than fail-fast: malformed rows and
//! duplicate identifiers are reported in the [`LoadReport`] and the load
//! continues with the remaining rows.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::record::StockRecord;
use crate::tree::StockTree;

/// Number of leading header/metadata lines, passed through unexamined on
/// load and reproduced verbatim on save.
pub const HEADER_LINES: usize = 2;

/// Number of columns a data row must provide.
const FIELDS_PER_ROW: usize = 5;

/// A recoverable per-row condition encountered during a bulk load.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LoadDiagnostic {
    /// The row split into fewer than five fields and was skipped.
    #[error("skipping invalid row: {line}")]
    MalformedRow { line: String },
    /// The row parsed but its identifier's key was already stored.
    #[error("duplicate item id ({item_id}); entry not added")]
    DuplicateId { item_id: String },
}

/// Outcome of a bulk load: how many records went in, and what was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records successfully inserted into the store.
    pub inserted: usize,
    /// Rows that were skipped, in input order.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Parses one data row into a record, or `None` if the row splits into
/// fewer than five fields. Fields are trimmed; columns past the fifth are
/// ignored.
#[must_use]
pub fn parse_line(line: &str) -> Option<StockRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < FIELDS_PER_ROW {
        return None;
    }
    Some(StockRecord::new(fields[0], fields[1], fields[2], fields[3], fields[4]))
}

/// Renders one record as a data row.
#[must_use]
pub fn format_record(record: &StockRecord) -> String {
    format!(
        "{},{},{},{},{}",
        record.date(),
        record.stock_label(),
        record.brand(),
        record.item_id(),
        record.status()
    )
}

/// Loads records from `lines` into `tree`.
///
/// The first two lines are discarded unconditionally as headers. Malformed
/// rows and duplicate identifiers become diagnostics, not failures; loading
/// continues with the remaining rows.
pub fn load_lines<'a, I>(tree: &mut StockTree, lines: I) -> LoadReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = LoadReport::default();

    for line in lines.into_iter().skip(HEADER_LINES) {
        let Some(record) = parse_line(line) else {
            warn!("skipping invalid row: {line}");
            report.diagnostics.push(LoadDiagnostic::MalformedRow { line: line.to_owned() });
            continue;
        };

        match tree.insert(record) {
            Ok(()) => report.inserted += 1,
            Err(duplicate) => {
                warn!("{duplicate}");
                report.diagnostics.push(LoadDiagnostic::DuplicateId { item_id: duplicate.0 });
            }
        }
    }

    report
}

/// Loads records from the file at `path` into `tree`.
///
/// # Errors
///
/// Fails only on I/O; records already inserted before a mid-read failure
/// stay in the store.
pub fn load_path<P: AsRef<Path>>(tree: &mut StockTree, path: P) -> io::Result<LoadReport> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }

    let report = load_lines(tree, lines.iter().map(String::as_str));
    debug!(
        "loaded {} records from {} ({} rows skipped)",
        report.inserted,
        path.display(),
        report.diagnostics.len()
    );
    Ok(report)
}

/// Renders every record in traversal order as data rows, headers excluded.
#[must_use]
pub fn export_lines(tree: &StockTree) -> Vec<String> {
    tree.iter().map(format_record).collect()
}

/// Renders the full file content: the given header lines verbatim, then
/// one data row per record in traversal order.
pub fn render<'a, I>(tree: &StockTree, headers: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for header in headers {
        out.push_str(header);
        out.push('\n');
    }
    for line in export_lines(tree) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Rewrites the file at `path` with the store's contents, preserving the
/// file's existing first two lines verbatim.
///
/// This is a full overwrite, not an append. Any confirmation gating before
/// the destructive write is the caller's responsibility.
///
/// # Errors
///
/// Fails on I/O, including when the target does not already exist to supply
/// its header lines. In-memory state is unaffected by a failure.
pub fn save_path<P: AsRef<Path>>(tree: &StockTree, path: P) -> io::Result<()> {
    let path = path.as_ref();

    // Scope the read handle so it is released before the rewrite opens.
    let headers = {
        let reader = BufReader::new(File::open(path)?);
        let mut headers = Vec::with_capacity(HEADER_LINES);
        for line in reader.lines().take(HEADER_LINES) {
            headers.push(line?);
        }
        headers
    };

    let mut writer = BufWriter::new(File::create(path)?);
    for header in &headers {
        writeln!(writer, "{header}")?;
    }
    for record in tree {
        writeln!(writer, "{}", format_record(record))?;
    }
    writer.flush()?;

    debug!("wrote {} records to {}", tree.len(), path.display());
    Ok(())
}
