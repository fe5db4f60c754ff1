//! Single-line download progress rendering.
//!
//! The pipeline reports a cumulative byte count after every chunk; this
//! renders it as one continuously overwritten stderr line. It runs inline
//! with the write path, so it does nothing beyond formatting and emitting
//! one line of text.

use indicatif::HumanBytes;
use std::io::{self, Write};

pub struct ProgressLine {
    rendered: bool,
}

impl ProgressLine {
    pub fn new() -> Self {
        Self { rendered: false }
    }

    /// Overwrites the current line with the new cumulative count.
    pub fn update(&mut self, total_bytes: u64) {
        self.rendered = true;
        eprint!("\rDownloading... {} ", HumanBytes(total_bytes));
        let _ = io::stderr().flush();
    }

    /// Terminates the progress line so following output starts clean.
    pub fn finish(&mut self) {
        if self.rendered {
            eprintln!();
            self.rendered = false;
        }
    }
}
