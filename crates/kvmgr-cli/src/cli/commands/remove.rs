//! `kvmgr remove <version>` – delete an installed version.

use anyhow::{ensure, Context, Result};
use kvmgr_core::store::{DiskStore, VersionStore};

pub fn run_remove(store: &DiskStore, version: &str) -> Result<()> {
    ensure!(
        store.exists(version),
        "kubectl {version} is not installed"
    );
    store
        .remove(version)
        .with_context(|| format!("removing kubectl {version}"))?;
    println!("Removed kubectl {version}");
    Ok(())
}
