use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use data_encoding::HEXLOWER;

use row_file_sort::progress::{ProgressReport, ProgressSink};

/// Sink that records every snapshot it receives.
#[allow(dead_code)]
pub struct RecordingProgress {
    reports: Mutex<Vec<(String, u8)>>,
}

#[allow(dead_code)]
impl RecordingProgress {
    pub fn new() -> RecordingProgress {
        RecordingProgress {
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn reports(&self) -> Vec<(String, u8)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, report: ProgressReport) {
        self.reports
            .lock()
            .unwrap()
            .push((report.operation().to_string(), report.percent()));
    }
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &Path) -> PathBuf {
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    dir.join(name)
}

#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().map(|x| x.unwrap()).collect();
    Ok(lines)
}

#[allow(dead_code)]
pub fn write_lines(path: &Path, lines: &[&str]) -> Result<(), anyhow::Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Reference comparison key: text portion first, numeric prefix second.
#[allow(dead_code)]
pub fn row_key(line: &str) -> (String, i64) {
    let dot = line.find('.').unwrap();
    let number = line[..dot].parse::<i64>().unwrap();
    let text = line[dot + 2..].to_string();
    (text, number)
}

/// In-memory reference sort used to validate the external sort output.
#[allow(dead_code)]
pub fn sorted_copy(lines: &[String]) -> Vec<String> {
    let mut result = lines.to_vec();
    result.sort_by_key(|line| row_key(line));
    result
}

/// Files next to `input` whose names look like its run files.
#[allow(dead_code)]
pub fn leftover_run_files(input: &Path) -> Vec<PathBuf> {
    let stem = input.file_stem().unwrap().to_string_lossy().into_owned();
    let mut leftovers = Vec::new();
    for entry in std::fs::read_dir(input.parent().unwrap()).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(&format!("{}_", stem)) {
            leftovers.push(entry.path());
        }
    }
    leftovers
}
