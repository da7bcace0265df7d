// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Console Reporter
 * Line-oriented run output gated by verbosity:
 *   [*] progress (high), [!] findings (always), [?] diagnostics (medium+)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tracing::warn;

use crate::types::{TestVerdict, VerdictMessage, Verbosity};

pub struct ConsoleReporter {
    verbosity: Verbosity,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    pub fn stdout(verbosity: Verbosity) -> Self {
        Self::with_writer(verbosity, Box::new(std::io::stdout()))
    }

    pub fn with_writer(verbosity: Verbosity, out: Box<dyn Write + Send>) -> Self {
        Self {
            verbosity,
            out: Mutex::new(out),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn start(&self) {
        self.line("Starting test run...");
    }

    pub fn running(&self, name: &str) {
        if self.verbosity >= Verbosity::High {
            self.line(&format!("[*] Running '{}'...", name));
        }
    }

    pub fn finding(&self, text: &str) {
        self.line(&format!("[!] {}", text));
    }

    pub fn diagnostic(&self, text: &str) {
        if self.verbosity >= Verbosity::Medium {
            self.line(&format!("[?] {}", text));
        }
    }

    /// Print a verdict's messages in the order the test recorded them
    pub fn verdict(&self, verdict: &TestVerdict) {
        for message in &verdict.messages {
            match message {
                VerdictMessage::Finding(text) => self.finding(text),
                VerdictMessage::Diagnostic(text) => self.diagnostic(text),
            }
        }
    }

    pub fn fault(&self, name: &str, reason: &str) {
        self.line(&format!("[-] '{}' aborted: {}", name, reason));
    }

    pub fn summary(&self, failures: usize) {
        self.line(&summary_line(failures));
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!("[Report] Failed to write console output: {}", e);
        }
    }
}

/// Final line of a run
pub fn summary_line(failures: usize) -> String {
    match failures {
        0 => "Found no failures. Tokens seem sane.".to_string(),
        1 => "Found 1 failure.".to_string(),
        n => format!("Found {} failures.", n),
    }
}

/// Cloneable in-memory writer, for capturing console output
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
