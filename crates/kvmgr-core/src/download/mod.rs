//! Blocking HTTP fetch of a release artifact into a local sink.
//!
//! One GET per install via a curl easy handle. The body is streamed
//! chunk-wise; the progress callback runs after every chunk is written,
//! before the next read. The HTTP status is deliberately not inspected here:
//! a 404 served with an HTML body streams through like any payload and is
//! rejected later by content sniffing. Only transport-level failures surface
//! as errors from this stage.

mod progress;

pub use progress::ProgressCounter;

use std::io::Write;

use thiserror::Error;

/// Failure modes of a single fetch, split so the caller can tell a dead
/// connection from a full disk.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl transport failure: resolution, connection, aborted transfer.
    #[error("transport failure: {0}")]
    Transport(#[from] curl::Error),
    /// The local sink refused a chunk.
    #[error("write to destination failed: {0}")]
    Sink(#[source] std::io::Error),
}

/// Streams `url` into `sink`, invoking `on_progress` with the cumulative
/// byte count after every chunk written. Returns the total byte count on
/// completion of the stream.
///
/// No timeout is applied and redirects are not followed; both are the curl
/// defaults. A stalled connection therefore blocks until the peer gives up.
pub fn fetch<W, F>(url: &str, sink: &mut W, mut on_progress: F) -> Result<u64, FetchError>
where
    W: Write,
    F: FnMut(u64),
{
    let mut counter = ProgressCounter::new();
    let mut sink_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;

    let outcome = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            match sink.write_all(data) {
                Ok(()) => {
                    on_progress(counter.add(data.len() as u64));
                    Ok(data.len())
                }
                Err(e) => {
                    sink_error = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = outcome {
        // A short write count makes libcurl report a write error; surface
        // the sink's own error in that case, not the curl wrapper.
        return Err(match sink_error.take() {
            Some(io) => FetchError::Sink(io),
            None => FetchError::Transport(e),
        });
    }

    sink.flush().map_err(FetchError::Sink)?;
    Ok(counter.total())
}
