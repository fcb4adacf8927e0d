use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cancellation::CancellationToken;
use crate::error::SortError;
use crate::progress::{ProgressReport, ProgressSink};
use crate::run_reader::RunReader;
use crate::splitter::run_file_path;

pub(crate) const MERGE_OPERATION: &str = "Merging large file";

fn merged_file_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_merged", stem))
}

/// Merge `run_count` sorted runs back into a single sorted file at `input`.
///
/// Memory use is bounded by one buffered row per still active run. The
/// merged result is written next to the input and renamed over it only on
/// completion; each run file is deleted as soon as its reader is done with
/// it, so peak disk use stays bounded during very large merges.
pub(crate) fn merge_runs(
    input: &Path,
    run_count: usize,
    total_rows: usize,
    progress: &dyn ProgressSink,
    cancellation: &CancellationToken,
) -> Result<(), SortError> {
    log::info!("Merging {} sorted runs into {}", run_count, input.display());
    let mut frontier: BinaryHeap<Reverse<RunReader>> = BinaryHeap::with_capacity(run_count);
    for index in 0..run_count {
        cancellation.ensure_active()?;
        let run_reader = RunReader::open(run_file_path(input, index))?;
        if run_reader.head().is_some() {
            frontier.push(Reverse(run_reader));
        }
    }

    let merged_path = merged_file_path(input);
    let mut writer = BufWriter::new(File::create(&merged_path)?);
    let progress_segment = std::cmp::max(total_rows / 10, 1);
    let mut rows_written = 0;

    while let Some(Reverse(mut run_reader)) = frontier.pop() {
        cancellation.ensure_active()?;
        if let Some(row) = run_reader.next_row()? {
            writeln!(writer, "{}", row.line())?;
            rows_written += 1;
            if rows_written % progress_segment == 0 || rows_written == total_rows {
                let percent = (rows_written as u64 * 100 / total_rows as u64) as u8;
                progress.report(ProgressReport::new(MERGE_OPERATION, percent));
            }
        }
        if run_reader.head().is_some() {
            frontier.push(Reverse(run_reader));
        }
        // exhausted readers drop here and delete their run files
    }

    writer.flush()?;
    std::fs::rename(&merged_path, input)?;
    log::info!(
        "Finished merging, {} rows written to {}",
        rows_written,
        input.display()
    );
    Ok(())
}
