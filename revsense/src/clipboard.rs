//! Write-only clipboard access.
//!
//! The terminal is the only clipboard the TUI can reach portably, including
//! over SSH: an OSC 52 escape sequence with a base64 payload asks the
//! terminal emulator to set the system clipboard.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// OSC 52 clipboard written to stderr, the stream the UI is drawn on.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut err = io::stderr().lock();
        err.write_all(osc52_sequence(text).as_bytes())?;
        err.flush()
    }
}

pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
