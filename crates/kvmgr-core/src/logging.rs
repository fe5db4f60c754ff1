//! Logging init: file under the XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer handed to the subscriber per event: the log file, or stderr when
/// the file handle cannot be cloned.
enum LogWriter {
    File(fs::File),
    Stderr,
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kvmgr=debug"))
}

/// Initialize structured logging to `~/.local/state/kvmgr/kvmgr.log`.
/// Returns Err when the state dir is unwritable so the caller can fall back
/// to [`init_stderr`].
pub fn init() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kvmgr")?;
    let log_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&log_dir)?;
    let log_path: PathBuf = log_dir.join("kvmgr.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let writer = BoxMakeWriter::new(move || match file.try_clone() {
        Ok(f) => LogWriter::File(f),
        Err(_) => LogWriter::Stderr,
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("kvmgr logging initialized at {}", log_path.display());
    Ok(())
}

/// Initialize logging to stderr only. Use when [`init`] fails so the CLI
/// still reports what it is doing.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
