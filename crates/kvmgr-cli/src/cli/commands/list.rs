//! `kvmgr list` – show installed kubectl versions.

use anyhow::Result;
use indicatif::HumanBytes;
use kvmgr_core::store::{DiskStore, VersionStore};

pub fn run_list(store: &DiskStore) -> Result<()> {
    let versions = store.installed_versions()?;
    if versions.is_empty() {
        println!("No kubectl versions installed.");
        return Ok(());
    }
    println!("{:<16} {:<10} {}", "VERSION", "SIZE", "PATH");
    for version in versions {
        let path = store.path_for(&version);
        let size = std::fs::metadata(&path)
            .map(|m| HumanBytes(m.len()).to_string())
            .unwrap_or_else(|_| "-".to_string());
        println!("{:<16} {:<10} {}", version, size, path.display());
    }
    Ok(())
}
