//! The install pipeline: one attempt, start to finish, on one thread.
//!
//! Sequences platform resolution, the store existence check, the streaming
//! download into a staging path, content verification, and the atomic
//! publish. Blocking throughout; the only suspension points are the HTTP
//! transfer and filesystem calls.

mod error;

pub use error::InstallError;

use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;

use crate::artifact;
use crate::download::{self, FetchError};
use crate::platform::{HostInfo, Platform};
use crate::store::VersionStore;
use crate::verify;

/// Pipeline phase of one install attempt. `Failed` is terminal for the
/// attempt; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Checking,
    Downloading,
    Verifying,
    Finalizing,
    Done,
    Failed,
}

/// One-shot installer for a single kubectl version. Owns the attempt's
/// lifecycle end-to-end; the store stays the sole authority on paths.
pub struct Installer<S: VersionStore> {
    store: S,
    base_url: String,
    host: Option<HostInfo>,
    phase: Phase,
}

impl<S: VersionStore> Installer<S> {
    pub fn new(store: S, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            host: None,
            phase: Phase::Idle,
        }
    }

    /// Uses a fixed host identity instead of probing uname(2).
    pub fn with_host(mut self, host: HostInfo) -> Self {
        self.host = Some(host);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, next: Phase) {
        tracing::debug!(from = ?self.phase, to = ?next, "install phase");
        self.phase = next;
    }

    fn fail(&mut self, err: InstallError) -> InstallError {
        self.enter(Phase::Failed);
        err
    }

    /// Runs the whole pipeline for `version`, reporting the cumulative byte
    /// count to `on_progress` after every chunk written.
    ///
    /// On success the installed binary's final path is returned. On failure
    /// the attempt is over: nothing is visible at the final path and staging
    /// content has been removed.
    pub fn install<F>(&mut self, version: &str, mut on_progress: F) -> Result<PathBuf, InstallError>
    where
        F: FnMut(u64),
    {
        // Platform resolution comes first: an unsupported host must fail
        // before any store or network activity.
        let host = match self.host.clone() {
            Some(h) => h,
            None => HostInfo::detect()
                .map_err(|e| self.fail(InstallError::fs("reading host identification", e)))?,
        };
        let platform = Platform::from_host(&host).map_err(|e| self.fail(e.into()))?;

        self.enter(Phase::Checking);
        if self.store.exists(version) {
            return Err(self.fail(InstallError::AlreadyInstalled(version.to_string())));
        }

        self.enter(Phase::Downloading);
        let url = artifact::release_url(&self.base_url, version, &platform);
        tracing::info!(%url, version, %platform, "downloading kubectl");
        let staging = self.store.staging_path_for(version);
        let mut out = File::create(&staging)
            .map_err(|e| self.fail(InstallError::fs("creating staging file", e)))?;
        let total = match download::fetch(&url, &mut out, &mut on_progress) {
            Ok(n) => n,
            Err(e) => {
                drop(out);
                // Partial staging content is removed before reporting.
                let _ = fs::remove_file(&staging);
                return Err(self.fail(match e {
                    FetchError::Transport(source) => InstallError::Network { source },
                    FetchError::Sink(source) => InstallError::fs("writing staging file", source),
                }));
            }
        };
        drop(out);
        tracing::debug!(bytes = total, "download complete");

        self.enter(Phase::Verifying);
        let head = read_leading_bytes(&staging)
            .map_err(|e| self.fail(InstallError::fs("reading back staging file", e)))?;
        if !verify::looks_like_release_artifact(&head) {
            let _ = fs::remove_file(&staging);
            return Err(self.fail(InstallError::InvalidBinaryContent));
        }

        self.enter(Phase::Finalizing);
        let final_path = self
            .store
            .publish(&staging, version)
            .map_err(|e| self.fail(InstallError::fs("publishing into the store", e)))?;

        self.enter(Phase::Done);
        tracing::info!(path = %final_path.display(), version, "installed");
        Ok(final_path)
    }
}

/// Up to [`verify::SNIFF_LEN`] leading bytes of the file at `path`.
fn read_leading_bytes(path: &std::path::Path) -> std::io::Result<Vec<u8>> {
    let mut f = File::open(path)?;
    let mut buf = vec![0u8; verify::SNIFF_LEN];
    let mut filled = 0;
    while filled < buf.len() {
        let n = f.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}
