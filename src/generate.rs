use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use rand::distributions::{Alphanumeric, DistString};
use rand::Rng;

use crate::cancellation::CancellationToken;
use crate::error::SortError;
use crate::progress::{ProgressReport, ProgressSink};

pub(crate) const GENERATE_OPERATION: &str = "Generating file";

/// Share of rows that get a freshly generated text portion; the rest reuse
/// a pooled string so the sorter has text ties to resolve by number.
const UNIQUENESS_PERCENTAGE: u32 = 80;
const MAX_TEXT_LENGTH: usize = 1024;
const MAX_STRING_POOL_LENGTH: usize = 10_000;

/// Generate a synthetic `<number>. <text>` row file for testing and
/// benchmarking.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use row_file_sort::cancellation::CancellationToken;
/// use row_file_sort::generate::Generate;
/// use row_file_sort::progress::NullProgress;
///
/// fn generate_rows(output: PathBuf) -> Result<(), row_file_sort::error::SortError> {
///     let generate = Generate::new(output, 1_000_000);
///     generate.generate(&NullProgress, &CancellationToken::new())
/// }
/// ```
pub struct Generate {
    output: PathBuf,
    rows: usize,
}

impl Generate {
    pub fn new(output: PathBuf, rows: usize) -> Generate {
        Generate {
            output,
            rows,
        }
    }

    /// Write `rows` pseudo-random rows to the output path, overwriting it.
    ///
    /// Around 80% of rows get a unique text portion between 10 and 1024
    /// characters; the rest repeat one of up to 10000 pooled strings.
    pub fn generate(
        &self,
        progress: &dyn ProgressSink,
        cancellation: &CancellationToken,
    ) -> Result<(), SortError> {
        if self.output.to_string_lossy().trim().is_empty() {
            return Err(SortError::InvalidArgument(
                "provide a non-blank file path".to_string(),
            ));
        }
        if self.rows == 0 {
            return Err(SortError::InvalidArgument(
                "provide a positive number of rows to generate".to_string(),
            ));
        }

        let mut rng = rand::thread_rng();
        let mut writer = BufWriter::new(File::create(&self.output)?);
        let unique_rows = std::cmp::max(self.rows * UNIQUENESS_PERCENTAGE as usize / 100, 1);
        let pool_length = self.rows.saturating_sub(unique_rows).min(MAX_STRING_POOL_LENGTH);
        let mut string_pool: Vec<String> = Vec::with_capacity(pool_length);
        let progress_segment = std::cmp::max(self.rows / 10, 1);

        for i in 1..=self.rows {
            cancellation.ensure_active()?;
            let number = rng.gen_range(0..unique_rows);
            if rng.gen_range(0..100) < UNIQUENESS_PERCENTAGE || string_pool.is_empty() {
                let length = rng.gen_range(10..=MAX_TEXT_LENGTH);
                let text = Alphanumeric.sample_string(&mut rng, length);
                if string_pool.len() < pool_length {
                    string_pool.push(text.clone());
                }
                writeln!(writer, "{}. {}", number, text)?;
            } else {
                let pooled = &string_pool[rng.gen_range(0..string_pool.len())];
                writeln!(writer, "{}. {}", number, pooled)?;
            }

            if i % progress_segment == 0 || i == self.rows {
                let percent = (i as u64 * 100 / self.rows as u64) as u8;
                progress.report(ProgressReport::new(GENERATE_OPERATION, percent));
            }
        }
        writer.flush()?;
        log::info!("Generated {} rows at {}", self.rows, self.output.display());
        Ok(())
    }
}
