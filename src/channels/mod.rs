//! Notification channel registration.
//!
//! Declares the two fixed delivery channels with the host notification
//! subsystem at app start. Registration is idempotent by platform contract:
//! re-declaring an existing channel id neither duplicates it nor resets
//! user-customized settings. Hosts without a channel concept are skipped
//! cleanly via the capability check, never by catching a failure.

use serde::Serialize;
use tracing::{debug, info};

/// Channel id for standard upcoming-subscription reminders.
pub const CHANNEL_SUBSCRIPTION_REMINDERS: &str = "subscription_reminders";
/// Channel id for imminent-billing alerts that bypass do-not-disturb.
pub const CHANNEL_CRITICAL_ALERTS: &str = "critical_alerts";

/// Delivery priority of a channel. Serialized out with [`ChannelSpec`],
/// never parsed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Heads-up delivery.
    High,
    /// Highest priority the platform offers.
    Max,
}

/// Static description of one delivery channel. External components address
/// notifications to these ids, so they are stable identifiers. Serialized
/// (not parsed) when handed across the host bridge, hence no `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSpec {
    /// Stable channel identifier.
    pub id: &'static str,
    /// User-visible channel name.
    pub name: &'static str,
    /// User-visible description.
    pub description: &'static str,
    /// Delivery priority.
    pub importance: Importance,
    /// Vibrate on delivery.
    pub vibration: bool,
    /// Flash the notification light on delivery.
    pub lights: bool,
    /// Deliver even while do-not-disturb is active.
    pub bypass_dnd: bool,
}

/// The two channels SubGuard ships with, in registration order.
#[must_use]
pub const fn builtin_channels() -> [ChannelSpec; 2] {
    [
        ChannelSpec {
            id: CHANNEL_SUBSCRIPTION_REMINDERS,
            name: "Subscription Reminders",
            description: "Standard reminders for upcoming subscriptions",
            importance: Importance::High,
            vibration: true,
            lights: true,
            bypass_dnd: false,
        },
        ChannelSpec {
            id: CHANNEL_CRITICAL_ALERTS,
            name: "Critical Billing Alerts",
            description: "Critical alerts for imminent billing",
            importance: Importance::Max,
            vibration: true,
            lights: true,
            bypass_dnd: true,
        },
    ]
}

/// Host notification subsystem seam.
///
/// `create_channel` is only called after `supports_channels` returns true,
/// and must uphold the platform's idempotency contract for repeated ids.
pub trait NotificationBackend {
    /// Whether this host has a notification-channel concept at all.
    fn supports_channels(&self) -> bool;

    /// Declare one channel with the host.
    fn create_channel(&self, spec: &ChannelSpec);
}

/// What [`register_channels`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Host has no channel concept; nothing was declared.
    Skipped,
    /// All channels were declared with the host.
    Registered(usize),
}

/// Declare the built-in channels with the host. Invoked once at UI start;
/// safe to invoke on every launch.
pub fn register_channels(backend: &dyn NotificationBackend) -> RegistrationOutcome {
    if !backend.supports_channels() {
        debug!("host has no notification channel support, skipping registration");
        return RegistrationOutcome::Skipped;
    }

    let channels = builtin_channels();
    for spec in &channels {
        backend.create_channel(spec);
    }
    info!(count = channels.len(), "notification channels registered");
    RegistrationOutcome::Registered(channels.len())
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::{
        CHANNEL_CRITICAL_ALERTS, CHANNEL_SUBSCRIPTION_REMINDERS, ChannelSpec, Importance,
        NotificationBackend, RegistrationOutcome, builtin_channels, register_channels,
    };

    /// Backend double that mimics the platform's dedup-by-id contract.
    #[derive(Default)]
    struct RecordingBackend {
        supported: bool,
        channels: Mutex<Vec<ChannelSpec>>,
    }

    impl RecordingBackend {
        fn supporting() -> Self {
            Self {
                supported: true,
                channels: Mutex::new(Vec::new()),
            }
        }
    }

    impl NotificationBackend for RecordingBackend {
        fn supports_channels(&self) -> bool {
            self.supported
        }

        fn create_channel(&self, spec: &ChannelSpec) {
            let mut channels = self.channels.lock();
            // Re-registration with an existing id is a no-op, as the
            // platform guarantees.
            if !channels.iter().any(|existing| existing.id == spec.id) {
                channels.push(spec.clone());
            }
        }
    }

    #[test]
    fn builtin_channels_match_shipped_attributes() {
        let [standard, critical] = builtin_channels();

        assert_eq!(standard.id, CHANNEL_SUBSCRIPTION_REMINDERS);
        assert_eq!(standard.name, "Subscription Reminders");
        assert_eq!(standard.importance, Importance::High);
        assert!(standard.vibration && standard.lights);
        assert!(!standard.bypass_dnd);

        assert_eq!(critical.id, CHANNEL_CRITICAL_ALERTS);
        assert_eq!(critical.name, "Critical Billing Alerts");
        assert_eq!(critical.importance, Importance::Max);
        assert!(critical.vibration && critical.lights);
        assert!(critical.bypass_dnd);
    }

    #[test]
    fn registers_both_channels_in_order() {
        let backend = RecordingBackend::supporting();
        assert_eq!(
            register_channels(&backend),
            RegistrationOutcome::Registered(2)
        );
        let channels = backend.channels.lock();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].id, CHANNEL_SUBSCRIPTION_REMINDERS);
        assert_eq!(channels[1].id, CHANNEL_CRITICAL_ALERTS);
    }

    #[test]
    fn repeated_registration_leaves_exactly_two_channels() {
        let backend = RecordingBackend::supporting();
        register_channels(&backend);
        register_channels(&backend);
        assert_eq!(backend.channels.lock().len(), 2);
    }

    #[test]
    fn unsupported_host_is_skipped_cleanly() {
        let backend = RecordingBackend::default();
        assert_eq!(register_channels(&backend), RegistrationOutcome::Skipped);
        assert!(backend.channels.lock().is_empty());
    }

    #[test]
    fn spec_serializes_for_host_bridge() {
        let [standard, _] = builtin_channels();
        let json = serde_json::to_string(&standard).unwrap();
        assert!(json.contains("\"id\":\"subscription_reminders\""));
        assert!(json.contains("\"importance\":\"high\""));
    }
}
