//! Clipboard access modeled as a capability.
//!
//! Failure to reach the clipboard is an expected condition (headless
//! machines, SSH sessions); it is reported as `false` so callers can fall
//! back to displaying the text instead.

use log::warn;

/// Writes text to a clipboard-like destination.
pub trait ClipboardWriter {
    /// Returns `true` when the text reached the clipboard.
    fn write_text(&self, text: &str) -> bool;
}

/// The OS clipboard.
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> bool {
        let result =
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string()));

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Clipboard unavailable: {e}");
                false
            }
        }
    }
}

/// Clipboard that discards everything.
#[derive(Default)]
pub struct NoopClipboard;

impl ClipboardWriter for NoopClipboard {
    fn write_text(&self, _text: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_clipboard_reports_failure() {
        assert!(!NoopClipboard.write_text("anything"));
    }
}
