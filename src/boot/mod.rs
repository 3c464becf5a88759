//! Boot-completion handling: debounce repeated boot signals and forward a
//! single reschedule request to the external alarm scheduler.
//!
//! The host delivers every boot broadcast here; this module decides whether
//! it is a genuine new boot (forward it) or a repeat within the debounce
//! window (drop it). It never decides when notifications fire — that is the
//! scheduler's job, reached through [`AlarmForwarder`].

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::errors::Result;
use crate::store::KeyValueStore;

/// Platform action string for a completed boot.
pub const ACTION_BOOT_COMPLETED: &str = "android.intent.action.BOOT_COMPLETED";
/// Platform action string for a boot completed while the device is locked.
pub const ACTION_LOCKED_BOOT_COMPLETED: &str = "android.intent.action.LOCKED_BOOT_COMPLETED";

/// Name of the key-value store holding the debounce state.
pub const PREFS_STORE_NAME: &str = "boot_receiver_prefs";
/// Store key for the last handled boot, milliseconds since epoch.
pub const LAST_BOOT_TIME_KEY: &str = "last_boot_time";
/// Debounce window: boots within 5 minutes of a handled one are repeats.
pub const DEFAULT_DEBOUNCE_WINDOW_MS: i64 = 5 * 60 * 1000;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Classified boot signal action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootAction {
    /// The device finished booting.
    BootCompleted,
    /// The device finished booting but is still locked (direct-boot).
    LockedBootCompleted,
    /// Any other broadcast action; always ignored.
    Other(String),
}

impl BootAction {
    /// Classify a raw platform action string.
    #[must_use]
    pub fn parse(action: &str) -> Self {
        match action {
            ACTION_BOOT_COMPLETED => Self::BootCompleted,
            ACTION_LOCKED_BOOT_COMPLETED => Self::LockedBootCompleted,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this action qualifies as a boot-completion signal.
    #[must_use]
    pub const fn is_boot(&self) -> bool {
        matches!(self, Self::BootCompleted | Self::LockedBootCompleted)
    }
}

/// A boot signal as delivered by the host: the classified action plus an
/// opaque payload that is forwarded to the scheduler unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootEvent {
    /// Classified broadcast action.
    pub action: BootAction,
    /// Host-supplied payload; never inspected, never persisted.
    pub payload: serde_json::Value,
}

impl BootEvent {
    /// Build an event from a raw action string and its payload.
    #[must_use]
    pub fn new(action: &str, payload: serde_json::Value) -> Self {
        Self {
            action: BootAction::parse(action),
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Forwarding seam
// ---------------------------------------------------------------------------

/// Entry point into the external alarm-scheduling collaborator.
///
/// Fire-and-forget: the forwarder reports failure through its `Result`, and
/// the caller logs and discards it by policy. Implementations must not
/// block on downstream completion.
pub trait AlarmForwarder: Send + Sync {
    /// Enqueue a "reprocess pending notifications" request.
    fn enqueue(&self, event: &BootEvent) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Debounce forwarder
// ---------------------------------------------------------------------------

/// What [`BootDebounceForwarder::handle`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// The action was not a boot-completion signal; nothing happened.
    IgnoredAction,
    /// A boot was already handled inside the debounce window; dropped.
    Suppressed,
    /// The event was forwarded to the scheduler.
    Forwarded,
    /// Forwarding failed; the failure was logged and swallowed. The
    /// persisted timestamp was still advanced.
    ForwardFailed,
}

/// Debounces boot signals against a persisted timestamp and forwards the
/// first genuine one to the scheduler.
pub struct BootDebounceForwarder {
    store: Arc<dyn KeyValueStore>,
    scheduler: Arc<dyn AlarmForwarder>,
    window_ms: i64,
}

impl BootDebounceForwarder {
    /// Forwarder with the stock 5-minute window.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, scheduler: Arc<dyn AlarmForwarder>) -> Self {
        Self::with_window(store, scheduler, DEFAULT_DEBOUNCE_WINDOW_MS)
    }

    /// Forwarder with an explicit window (from [`crate::Config`]).
    #[must_use]
    pub fn with_window(
        store: Arc<dyn KeyValueStore>,
        scheduler: Arc<dyn AlarmForwarder>,
        window_ms: i64,
    ) -> Self {
        Self {
            store,
            scheduler,
            window_ms,
        }
    }

    /// Handle a boot signal observed at `now_ms` (milliseconds since epoch).
    ///
    /// Never returns an error: forwarding failure is logged and reported
    /// through the outcome, per the fire-and-forget contract. The timestamp
    /// is persisted before the forward call, so a failed forward still
    /// counts as a handled boot (matching the shipped behavior; see
    /// DESIGN.md for the ordering trade-off).
    pub fn handle(&self, event: &BootEvent, now_ms: i64) -> BootOutcome {
        if !event.action.is_boot() {
            debug!(action = ?event.action, "ignoring non-boot action");
            return BootOutcome::IgnoredAction;
        }

        let last_boot_ms = match self.store.get_i64(LAST_BOOT_TIME_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                // Unreadable state is treated as "never handled": forwarding
                // twice is recoverable, never forwarding is not.
                warn!(code = e.code(), error = %e, "prefs read failed, treating last boot as absent");
                0
            }
        };

        if now_ms.saturating_sub(last_boot_ms) < self.window_ms {
            debug!(now_ms, last_boot_ms, "boot already handled recently, skipping");
            return BootOutcome::Suppressed;
        }

        if let Err(e) = self.store.put_i64(LAST_BOOT_TIME_KEY, now_ms) {
            warn!(code = e.code(), error = %e, "failed to persist last boot time");
        }

        match self.scheduler.enqueue(event) {
            Ok(()) => {
                debug!(now_ms, "boot reschedule request enqueued");
                BootOutcome::Forwarded
            }
            Err(e) => {
                error!(code = e.code(), error = %e, "boot reschedule forwarding failed");
                BootOutcome::ForwardFailed
            }
        }
    }

    /// [`Self::handle`] with the current wall-clock time.
    pub fn handle_now(&self, event: &BootEvent) -> BootOutcome {
        self.handle(event, Utc::now().timestamp_millis())
    }
}
