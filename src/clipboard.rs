//! Clipboard access for the caption copy action.

use std::time::{Duration, Instant};

use crate::foundation::error::{StudioError, StudioResult};

/// How long the "copied" confirmation stays visible after a successful copy.
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(1800);

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> StudioResult<()>;
}

/// The desktop clipboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> StudioResult<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| StudioError::clipboard(format!("clipboard unavailable: {e}")))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> StudioResult<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| StudioError::clipboard(e.to_string()))
    }
}

/// In-process clipboard for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write.
    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> StudioResult<()> {
        if self.fail {
            return Err(StudioError::clipboard("clipboard write rejected"));
        }
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Transient "copied" confirmation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyIndicator {
    shown_at: Option<Instant>,
}

impl CopyIndicator {
    pub fn show(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.shown_at = None;
    }

    pub fn is_shown_at(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_CONFIRMATION)
    }

    pub fn is_shown(&self) -> bool {
        self.is_shown_at(Instant::now())
    }
}

#[cfg(test)]
#[path = "../tests/unit/clipboard.rs"]
mod tests;
