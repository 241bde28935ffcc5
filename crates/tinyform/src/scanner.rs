//! Request line scanning.

use anyhow::Error;

use crate::transport::Connection;

/// Request line prefix marking a form submission.
pub(crate) const SUBMISSION_PREFIX: &str = "GET /ajax_inputs";

/// Terminal state of scanning one incoming request.
pub(crate) enum ScanOutcome {
    /// A submission request line was found; carries the whole line.
    Submission(String),
    /// Headers ended without a submission, serve a fresh page.
    HeadersDone,
    /// The peer went away before either, nothing to do.
    Disconnected,
}

/// Read request lines until a submission marker or the end of the headers.
///
/// If the connection closes or runs out of data first, the scan ends with no
/// action taken. No response is sent; the client will retry or time out.
pub(crate) fn scan<C>(connection: &mut C) -> Result<ScanOutcome, Error>
where
    C: Connection,
{
    while connection.is_open() && connection.has_data()? {
        let Some(line) = connection.read_line()? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            return Ok(ScanOutcome::HeadersDone);
        }

        if line.starts_with(SUBMISSION_PREFIX) {
            return Ok(ScanOutcome::Submission(line.to_string()));
        }
    }

    Ok(ScanOutcome::Disconnected)
}
