//! This crate implements an external merge sort for text files of
//! `<number>. <text>` rows, for example `415. Apple`.
//!
//! Files far larger than available memory are sorted by splitting them into
//! chunks of a bounded number of rows, sorting each chunk in memory and
//! flushing it to a temporary run file, then streaming all runs through a
//! k-way merge driven by a binary heap. Rows are ordered by the text portion
//! first, byte for byte, and by the numeric prefix when the texts are equal.
//! The input file is replaced by its sorted content in place.
//!
//! Progress reporting and cooperative cancellation are delegated to the
//! caller through the [progress::ProgressSink] trait and the
//! [cancellation::CancellationToken] flag.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use row_file_sort::cancellation::CancellationToken;
//! use row_file_sort::progress::{ProgressReport, ProgressSink};
//! use row_file_sort::sort::Sort;
//!
//! // report progress to the console at roughly 10% steps
//! struct ConsoleProgress;
//!
//! impl ProgressSink for ConsoleProgress {
//!     fn report(&self, report: ProgressReport) {
//!         println!("{}: {}%", report.operation(), report.percent());
//!     }
//! }
//!
//! fn sort_rows(input: PathBuf) -> Result<(), row_file_sort::error::SortError> {
//!     let mut row_file_sort = Sort::new(input);
//!
//!     // set the number of rows buffered in memory before a sorted run is
//!     // flushed to disk. The default is 10240.
//!     row_file_sort.with_chunk_size(100_000);
//!
//!     row_file_sort.sort(&ConsoleProgress, &CancellationToken::new())
//! }
//! ```

pub(crate) mod merger;
pub(crate) mod row;
pub(crate) mod run_reader;
pub(crate) mod splitter;

pub mod cancellation;
pub mod error;
pub mod generate;
pub mod progress;
pub mod sort;
