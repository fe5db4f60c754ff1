//! Install attempt error taxonomy.
//!
//! Every component failure is carried up as a value; the CLI layer is the
//! single place that decides process exit and terminal reporting. One
//! attempt, no automatic retries.

use thiserror::Error;

use crate::platform::UnsupportedPlatform;

#[derive(Debug, Error)]
pub enum InstallError {
    /// Host OS or architecture has no published kubectl artifact.
    /// Raised before any store or network activity.
    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatform),

    /// The requested version is already present in the store. Nothing was
    /// mutated and no network request was made.
    #[error("kubectl {0} is already installed")]
    AlreadyInstalled(String),

    /// Transport-level download failure (resolution, connection, aborted
    /// transfer). The staging file has been cleaned up.
    #[error("download failed: {source}")]
    Network {
        #[source]
        source: curl::Error,
    },

    /// Downloaded bytes carry no known executable or archive signature,
    /// typically an HTML error page for a version that does not exist. The
    /// staging file has been cleaned up.
    #[error("downloaded content is not a kubectl binary; is the version correct?")]
    InvalidBinaryContent,

    /// Local filesystem failure (create, read-back, chmod, rename).
    #[error("{context}: {source}")]
    Filesystem {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    pub(crate) fn fs(context: impl Into<String>, source: std::io::Error) -> Self {
        InstallError::Filesystem {
            context: context.into(),
            source,
        }
    }
}
