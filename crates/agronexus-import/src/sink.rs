//! Destination for committed records.

use crate::error::SinkError;
use crate::record::ValidatedRecord;

/// A record store that accepts valid import rows.
///
/// Each call either fully persists the record or fails without effect. The
/// coordinator never retries; a retry policy belongs to the implementation.
pub trait RecordSink {
    /// Persist one record and return its generated identifier.
    fn add(&mut self, record: &ValidatedRecord) -> Result<String, SinkError>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn add(&mut self, record: &ValidatedRecord) -> Result<String, SinkError> {
        (**self).add(record)
    }
}
