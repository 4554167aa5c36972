//! Per-file transfer progress
//!
//! [`ProgressTracker`] turns byte counts into a permille value (0-1000) for a
//! progress bar and a `"X / Y"` label. It is owned by one caller.
//!
//! To share progress between the transfer and a display running elsewhere, use
//! [`progress_channel`]: the [`ProgressReporter`] owns the tracker and publishes
//! a complete [`ProgressSnapshot`] on every update through a
//! `tokio::sync::watch` channel, so a [`ProgressWatcher`] never observes a
//! half-updated state.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::utils::format_bytes;

/// Full scale of the permille value
pub const PERMILLE_MAX: u16 = 1000;

/// Label shown for the maximum before it is known
pub const UNKNOWN_SIZE_LABEL: &str = "????";

/// Result of [`ProgressTracker::update_current`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Progress in 0..=1000
    pub permille: u16,
    /// `"<current> / <maximum>"`, humanized
    pub label: String,
}

/// Progress tracking for one transfer
///
/// # Scaling
///
/// The permille value is `current / scale_divisor` with
/// `scale_divisor = maximum / 1000`, floored at 1. While the divisor sits at
/// its floor (maxima below 2000 bytes) it would overstate progress by up to
/// a factor of two, so those files are scaled proportionally
/// (`current * 1000 / maximum`) instead. Above that the integer divisor
/// truncates by less than one part in `scale_divisor`: a 2048-byte file reads
/// 512 at its midpoint. A maximum of zero reads as 0. The value is clamped to
/// 1000 when a transfer overshoots its announced size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    maximum: Option<u64>,
    current: u64,
    scale_divisor: u64,
}

impl ProgressTracker {
    /// Create a tracker with an unknown maximum
    pub fn new() -> Self {
        Self {
            maximum: None,
            current: 0,
            scale_divisor: 1,
        }
    }

    /// Create a tracker for a transfer of `maximum` bytes
    pub fn with_maximum(maximum: u64) -> Self {
        let mut tracker = Self::new();
        tracker.set_maximum(maximum);
        tracker
    }

    /// Set the expected size in bytes
    pub fn set_maximum(&mut self, maximum: u64) {
        self.maximum = Some(maximum);
        self.scale_divisor = (maximum / u64::from(PERMILLE_MAX)).max(1);
    }

    /// Record the bytes transferred so far and return the derived display values
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_dl::ProgressTracker;
    ///
    /// let mut tracker = ProgressTracker::with_maximum(2048);
    /// let update = tracker.update_current(1024);
    ///
    /// assert_eq!(update.permille, 512);
    /// assert_eq!(update.label, "1.0 KB / 2.0 KB");
    /// ```
    pub fn update_current(&mut self, current: u64) -> ProgressUpdate {
        self.current = current;
        ProgressUpdate {
            permille: self.permille(),
            label: self.label(),
        }
    }

    /// Progress in 0..=1000
    pub fn permille(&self) -> u16 {
        let scaled = match self.maximum {
            None | Some(0) => 0,
            Some(max) if self.scale_divisor == 1 => {
                u128::from(self.current) * u128::from(PERMILLE_MAX) / u128::from(max)
            }
            Some(_) => u128::from(self.current / self.scale_divisor),
        };
        // clamped, so the narrowing cannot truncate
        scaled.min(u128::from(PERMILLE_MAX)) as u16
    }

    /// Progress in percent, with one decimal of precision
    pub fn percent(&self) -> f64 {
        f64::from(self.permille()) / 10.0
    }

    /// `"<current> / <maximum>"`; the maximum reads `????` until it is set
    pub fn label(&self) -> String {
        let maximum = self
            .maximum
            .map(format_bytes)
            .unwrap_or_else(|| UNKNOWN_SIZE_LABEL.to_string());
        format!("{} / {}", format_bytes(self.current), maximum)
    }

    /// Bytes transferred so far
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Expected size, if set
    pub fn maximum(&self) -> Option<u64> {
        self.maximum
    }

    /// Divisor applied to `current` for files of at least 1000 bytes; never zero
    pub fn scale_divisor(&self) -> u64 {
        self.scale_divisor
    }

    /// Whether the transfer reached its maximum
    pub fn is_complete(&self) -> bool {
        self.maximum.is_some_and(|max| self.current >= max)
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current: self.current,
            maximum: self.maximum,
            permille: self.permille(),
            label: self.label(),
        }
    }
}

/// Point-in-time view of a tracker, as seen by a display
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Bytes transferred so far
    pub current: u64,
    /// Expected size, if known
    pub maximum: Option<u64>,
    /// Progress in 0..=1000
    pub permille: u16,
    /// `"<current> / <maximum>"`
    pub label: String,
}

/// Create a connected reporter/watcher pair for one transfer
///
/// ```
/// use catalog_dl::progress::progress_channel;
///
/// let (mut reporter, watcher) = progress_channel();
/// reporter.set_maximum(500);
/// reporter.update_current(250);
///
/// assert_eq!(watcher.snapshot().permille, 500);
/// ```
pub fn progress_channel() -> (ProgressReporter, ProgressWatcher) {
    let tracker = ProgressTracker::new();
    let (tx, rx) = watch::channel(tracker.snapshot());
    (ProgressReporter { tracker, tx }, ProgressWatcher { rx })
}

/// Producer side of a progress channel, owned by the transfer
///
/// Dropping it closes the channel; watchers then see [`ProgressWatcher::changed`]
/// return `None`.
#[derive(Debug)]
pub struct ProgressReporter {
    tracker: ProgressTracker,
    tx: watch::Sender<ProgressSnapshot>,
}

impl ProgressReporter {
    /// Set the expected size and publish the new state
    pub fn set_maximum(&mut self, maximum: u64) {
        self.tracker.set_maximum(maximum);
        tracing::debug!(maximum, "transfer size known");
        self.publish();
    }

    /// Record progress and publish the new state
    pub fn update_current(&mut self, current: u64) -> ProgressUpdate {
        let update = self.tracker.update_current(current);
        tracing::trace!(current, permille = update.permille, "transfer progress");
        self.publish();
        update
    }

    /// The tracker behind this reporter
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Create another watcher for this transfer
    pub fn watch(&self) -> ProgressWatcher {
        ProgressWatcher {
            rx: self.tx.subscribe(),
        }
    }

    fn publish(&self) {
        // send_replace stores the value even when no watcher is left
        self.tx.send_replace(self.tracker.snapshot());
    }
}

/// Consumer side of a progress channel, owned by a display
#[derive(Clone, Debug)]
pub struct ProgressWatcher {
    rx: watch::Receiver<ProgressSnapshot>,
}

impl ProgressWatcher {
    /// Latest published state
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next update
    ///
    /// Returns `None` once the reporter is gone.
    pub async fn changed(&mut self) -> Option<ProgressSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
