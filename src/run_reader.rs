use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::error::SortError;
use crate::row::Row;

/// Cursor over one sorted run file.
///
/// Holds the next unconsumed row of the run and owns the backing temp file:
/// the file is removed when the reader is dropped, whether the run was
/// drained, abandoned early or unwound by an error.
#[derive(Debug)]
pub(crate) struct RunReader {
    path: PathBuf,
    reader: BufReader<File>,
    head: Option<Row>,
}

impl RunReader {
    /// Open a run and buffer its first row.
    pub(crate) fn open(path: PathBuf) -> Result<RunReader, SortError> {
        let file = File::open(&path)?;
        let mut run_reader = RunReader {
            path,
            reader: BufReader::new(file),
            head: None,
        };
        run_reader.next_row()?;
        Ok(run_reader)
    }

    /// Return the buffered row and pre-load the one after it.
    ///
    /// Returns None once the run is exhausted.
    pub(crate) fn next_row(&mut self) -> Result<Option<Row>, SortError> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        let next = if bytes > 0 {
            if line.ends_with('\n') {
                line.pop();
            }
            Some(Row::parse(line)?)
        } else {
            None
        };
        Ok(std::mem::replace(&mut self.head, next))
    }

    pub(crate) fn head(&self) -> Option<&Row> {
        self.head.as_ref()
    }
}

impl Drop for RunReader {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            log::warn!("Failed to remove run file {}: {}", self.path.display(), e);
        }
    }
}

impl Eq for RunReader {}

impl PartialEq<Self> for RunReader {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for RunReader {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RunReader {
    fn cmp(&self, other: &Self) -> Ordering {
        // an exhausted reader orders greater than any reader with a row,
        // so it can never win the minimum selection
        match (&self.head, &other.head) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(y),
        }
    }
}
