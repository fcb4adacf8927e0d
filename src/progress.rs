/// An immutable progress snapshot: which operation is running and how far
/// along it is, in whole percent.
#[derive(Clone, Debug)]
pub struct ProgressReport {
    operation: String,
    percent: u8,
}

impl ProgressReport {
    pub fn new(operation: &str, percent: u8) -> ProgressReport {
        ProgressReport {
            operation: operation.to_string(),
            percent,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }
}

/// Collaborator that consumes [ProgressReport] snapshots.
///
/// Reports are emitted at a bounded cadence, roughly every 10% of an
/// operation, never per row. Implementations must not block; the sort treats
/// the sink as fire and forget.
pub trait ProgressSink {
    fn report(&self, report: ProgressReport);
}

/// Sink that discards all reports.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _report: ProgressReport) {}
}
