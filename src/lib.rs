//! Platform-integration glue for the SubGuard app.
//!
//! Two leaf components that sit between the host OS and the cross-platform
//! application layer:
//!
//! - [`boot::BootDebounceForwarder`] — reacts to a device boot-completion
//!   signal, suppresses duplicates within a fixed window using a persisted
//!   timestamp, and forwards a single reschedule request to the external
//!   alarm-scheduling collaborator.
//! - [`channels::register_channels`] — declares the two fixed notification
//!   delivery channels with the host notification subsystem at app start.
//!
//! The scheduling engine itself (when notifications fire, what they say) is
//! an external collaborator reached through the [`boot::AlarmForwarder`]
//! seam; this crate never decides fire times or content.

pub mod boot;
pub mod channels;
pub mod core;
pub mod store;

pub use crate::boot::{AlarmForwarder, BootAction, BootDebounceForwarder, BootEvent, BootOutcome};
pub use crate::channels::{
    ChannelSpec, Importance, NotificationBackend, RegistrationOutcome, register_channels,
};
pub use crate::core::config::Config;
pub use crate::core::errors::{GlueError, Result};
pub use crate::store::{FilePrefsStore, KeyValueStore, MemoryStore};
