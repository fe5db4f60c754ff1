//! Command implementations for the kvmgr CLI.

mod install;
mod list;
mod remove;

pub use install::run_install;
pub use list::run_list;
pub use remove::run_remove;
