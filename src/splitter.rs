use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cancellation::CancellationToken;
use crate::error::SortError;
use crate::progress::{ProgressReport, ProgressSink};
use crate::row::Row;

pub(crate) const SPLIT_OPERATION: &str = "Splitting file";

/// Path of run file `index` for `input`: the input's stem plus a numeric
/// suffix, placed alongside the input. Deterministic, so the merger can
/// reconstruct the whole run set from the run count alone.
pub(crate) fn run_file_path(input: &Path, index: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_{}", stem, index))
}

/// Split `input` into sorted run files of at most `chunk_size` rows each.
///
/// Returns `(run_count, total_rows)`. An empty input produces zero runs and
/// creates no files. The exact row count is unknown until the pass
/// completes, so progress is estimated from bytes consumed.
pub(crate) fn split_file(
    input: &Path,
    chunk_size: usize,
    progress: &dyn ProgressSink,
    cancellation: &CancellationToken,
) -> Result<(usize, usize), SortError> {
    let length = input.metadata()?.len();
    let mut reader = BufReader::new(File::open(input)?);
    let mut rows: Vec<Row> = Vec::with_capacity(chunk_size);
    let mut run_count = 0;
    let mut total_rows = 0;
    let mut bytes_read: u64 = 0;
    let mut reported_percent: u8 = 0;
    progress.report(ProgressReport::new(SPLIT_OPERATION, 0));

    let mut line = String::new();
    loop {
        cancellation.ensure_active()?;
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            break;
        }
        bytes_read += bytes as u64;
        if line.ends_with('\n') {
            line.pop();
        }
        rows.push(Row::parse(line)?);
        total_rows += 1;
        line = String::new();

        if rows.len() == chunk_size {
            let chunk = std::mem::replace(&mut rows, Vec::with_capacity(chunk_size));
            write_run(&run_file_path(input, run_count), chunk)?;
            run_count += 1;
        }

        let percent = (bytes_read * 100 / length) as u8;
        if percent / 10 > reported_percent / 10 {
            reported_percent = percent - percent % 10;
            progress.report(ProgressReport::new(SPLIT_OPERATION, reported_percent));
        }
    }

    if !rows.is_empty() {
        write_run(&run_file_path(input, run_count), rows)?;
        run_count += 1;
    }

    if reported_percent != 100 {
        progress.report(ProgressReport::new(SPLIT_OPERATION, 100));
    }
    log::info!(
        "Split {} into {} sorted runs, {} rows",
        input.display(),
        run_count,
        total_rows
    );
    Ok((run_count, total_rows))
}

fn write_run(path: &Path, mut rows: Vec<Row>) -> Result<(), SortError> {
    rows.sort_unstable();
    let mut writer = BufWriter::new(File::create(path)?);
    for row in &rows {
        writeln!(writer, "{}", row.line())?;
    }
    writer.flush()?;
    Ok(())
}
