use std::cmp::{max, min};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use rlimit::{getrlimit, setrlimit, Resource};

use crate::cancellation::CancellationToken;
use crate::error::SortError;
use crate::merger;
use crate::progress::ProgressSink;
use crate::row::Row;
use crate::splitter;

/// Rows buffered in memory before a sorted run is flushed to disk.
const DEFAULT_CHUNK_SIZE: usize = 1024 * 10;

/// Sort a `<number>. <text>` row file in place.
///
/// The file is split into sorted runs of at most `chunk_size` rows, written
/// alongside the input, and merged back with a k-way streaming merge. Rows
/// are ordered by the text portion first, byte for byte, then by the numeric
/// prefix on text ties.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use row_file_sort::cancellation::CancellationToken;
/// use row_file_sort::progress::NullProgress;
/// use row_file_sort::sort::Sort;
///
/// fn sort_rows(input: PathBuf) -> Result<(), row_file_sort::error::SortError> {
///     let mut row_file_sort = Sort::new(input);
///
///     // set the number of rows buffered in memory per run. The default is
///     // 10240 rows; larger chunks mean fewer runs and fewer open files
///     // during the merge.
///     row_file_sort.with_chunk_size(100_000);
///
///     row_file_sort.sort(&NullProgress, &CancellationToken::new())
/// }
/// ```
pub struct Sort {
    input: PathBuf,
    chunk_size: usize,
}

impl Sort {
    /// Create a default Sort definition for `input`.
    ///
    /// * runs are written alongside the input, named after it plus a run
    ///   index, and removed as they are consumed by the merge
    /// * the chunk size defaults to 10240 rows per run
    ///
    /// The implementation will raise the file descriptor rlimit for the
    /// duration of the merge to accommodate one open run file per chunk.
    pub fn new(input: PathBuf) -> Sort {
        Sort {
            input,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the number of rows buffered in memory per run. A value of zero is
    /// treated as one.
    pub fn with_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size;
    }

    /// Sort the input file in place.
    ///
    /// Progress is reported to `progress` in two phases, `Splitting file`
    /// and `Merging large file`, each ranging 0 to 100. The token is polled
    /// once per row read and once per merge step; when canceled the
    /// operation unwinds with [SortError::Canceled] and the original file is
    /// left unreplaced.
    pub fn sort(
        &self,
        progress: &dyn ProgressSink,
        cancellation: &CancellationToken,
    ) -> Result<(), SortError> {
        self.validate_input()?;
        let chunk_size = max(self.chunk_size, 1);
        let (run_count, total_rows) =
            splitter::split_file(&self.input, chunk_size, progress, cancellation)?;
        if run_count == 0 {
            return Ok(());
        }
        cancellation.ensure_active()?;

        let (current_soft, current_hard) = Self::get_rlimits()?;
        log::info!(
            "Current rlimit NOFILE, soft: {}, hard: {}",
            current_soft,
            current_hard
        );
        let new_soft = min(max((run_count + 256) as u64, current_soft), current_hard);
        Self::set_rlimits(new_soft, current_hard)?;
        let merged = merger::merge_runs(&self.input, run_count, total_rows, progress, cancellation);
        Self::set_rlimits(current_soft, current_hard)?;
        merged
    }

    /// Verify that the input file is already sorted.
    ///
    /// A single sequential pass; rows that fail to parse surface the same
    /// [SortError::MalformedRow] the sort itself would.
    pub fn check(&self, cancellation: &CancellationToken) -> Result<bool, SortError> {
        self.validate_input()?;
        let mut reader = BufReader::new(File::open(&self.input)?);
        let mut previous: Option<Row> = None;
        let mut line = String::new();
        loop {
            cancellation.ensure_active()?;
            let bytes = reader.read_line(&mut line)?;
            if bytes == 0 {
                break;
            }
            if line.ends_with('\n') {
                line.pop();
            }
            let current = Row::parse(line)?;
            if let Some(previous_row) = &previous {
                if previous_row > &current {
                    return Ok(false);
                }
            }
            previous = Some(current);
            line = String::new();
        }
        Ok(true)
    }

    fn validate_input(&self) -> Result<(), SortError> {
        if self.input.to_string_lossy().trim().is_empty() {
            return Err(SortError::InvalidArgument(
                "provide a non-blank file path".to_string(),
            ));
        }
        if !self.input.exists() {
            return Err(SortError::MissingInput(self.input.clone()));
        }
        Ok(())
    }

    fn get_rlimits() -> Result<(u64, u64), std::io::Error> {
        getrlimit(Resource::NOFILE)
    }

    fn set_rlimits(soft: u64, hard: u64) -> Result<(), std::io::Error> {
        setrlimit(Resource::NOFILE, soft, hard)
    }
}
