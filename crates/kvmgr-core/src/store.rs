//! Version store: the on-disk namespace for installed kubectl binaries.
//!
//! One executable file per version under the store root, named
//! `kubectl-<version>` (default root `~/.kvmgr`). Downloads land at a `.part`
//! staging path in the same directory so publish is a single atomic rename;
//! unverified content is never visible at a final path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File name prefix for store entries.
pub const BINARY_PREFIX: &str = "kubectl-";

/// Staging suffix appended to the final path while a download is in flight.
pub const STAGING_SUFFIX: &str = ".part";

/// Subdirectory of the home directory holding the default store.
const DEFAULT_STORE_DIR: &str = ".kvmgr";

/// Path resolution, existence and publish authority for installed versions.
///
/// The install pipeline only sees this trait, so tests can run it against a
/// store rooted in a temp directory.
pub trait VersionStore {
    /// Final path for a version. Pure: no filesystem access.
    fn path_for(&self, version: &str) -> PathBuf;

    /// Staging path for a version: the final path with [`STAGING_SUFFIX`]
    /// appended. Same directory as the final path, so the publish rename
    /// never crosses a filesystem boundary.
    fn staging_path_for(&self, version: &str) -> PathBuf {
        let mut p = self.path_for(version).into_os_string();
        p.push(STAGING_SUFFIX);
        PathBuf::from(p)
    }

    /// True iff a file is already present at the final path.
    fn exists(&self, version: &str) -> bool {
        self.path_for(version).is_file()
    }

    /// Makes verified staged content visible at the final path and marks it
    /// executable. Atomic with respect to observers: the final path either
    /// holds the complete artifact or nothing.
    fn publish(&self, staging: &Path, version: &str) -> io::Result<PathBuf>;
}

/// Store rooted at a directory on the local disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Default store under the user's home directory (`~/.kvmgr`).
    /// Creates the root if missing.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().context("could not determine the home directory")?;
        Self::at_root(home.join(DEFAULT_STORE_DIR))
            .context("could not create the kvmgr store directory")
    }

    /// Store rooted at an explicit directory (config override, tests).
    /// Creates the root if missing.
    pub fn at_root(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Versions currently installed, sorted by store file name. Staging
    /// leftovers and foreign files are skipped.
    pub fn installed_versions(&self) -> io::Result<Vec<String>> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().into_string().unwrap_or_default();
            if name.ends_with(STAGING_SUFFIX) {
                continue;
            }
            if let Some(version) = name.strip_prefix(BINARY_PREFIX) {
                versions.push(version.to_string());
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// Deletes one installed version's file.
    pub fn remove(&self, version: &str) -> io::Result<()> {
        fs::remove_file(self.path_for(version))
    }
}

impl VersionStore for DiskStore {
    fn path_for(&self, version: &str) -> PathBuf {
        self.root.join(format!("{BINARY_PREFIX}{version}"))
    }

    fn publish(&self, staging: &Path, version: &str) -> io::Result<PathBuf> {
        let final_path = self.path_for(version);
        make_executable(staging)?;
        fs::rename(staging, &final_path)?;
        Ok(final_path)
    }
}

/// chmod 0755: execute permission for owner, group and other.
pub fn make_executable(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
