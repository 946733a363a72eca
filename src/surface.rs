//! Terminal rendering of notifications and replies.

use warmer_core::Surface;
use warmer_protocols::Severity;

/// Shows notifications on stderr and replies on stdout.
pub(crate) struct TerminalSurface;

impl Surface for TerminalSurface {
    fn notify(&self, severity: Severity, title: &str, message: &str) {
        let marker = match severity {
            Severity::Loading => "...",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        eprintln!("[{marker}] {title}: {message}");
    }

    fn show_response(&self, text: &str) {
        println!("{text}");
    }
}
