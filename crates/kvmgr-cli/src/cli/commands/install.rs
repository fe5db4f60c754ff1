//! `kvmgr install <version>` – run the install pipeline.

use anyhow::{ensure, Result};
use kvmgr_core::config::KvmgrConfig;
use kvmgr_core::install::Installer;
use kvmgr_core::store::DiskStore;

use crate::cli::progress::ProgressLine;

pub fn run_install(cfg: &KvmgrConfig, store: DiskStore, version: &str) -> Result<()> {
    ensure!(
        !version.trim().is_empty(),
        "specify a kubectl version to install"
    );

    let mut line = ProgressLine::new();
    let mut installer = Installer::new(store, cfg.base_url.clone());
    let result = installer.install(version, |total| line.update(total));
    line.finish();
    let path = result?;

    println!("Installed kubectl {version} to {}", path.display());
    Ok(())
}
