//! The in-memory registry behind the Burrow URL shortener.
//!
//! [`Registry`] owns the mapping from short code to [`UrlRecord`] and
//! guards it with a single readers-writer lock. Expired records are
//! evicted lazily, when they are next observed. [`Autosave`] persists
//! the registry on a fixed cadence and once more on shutdown.
//!
//! [`UrlRecord`]: burrow_core::UrlRecord

pub mod autosave;
mod clock;
pub mod error;
mod registry;
mod snapshot;

pub use autosave::{Autosave, AutosaveSettings, DEFAULT_SAVE_INTERVAL};
pub use clock::{Clock, SystemClock};
pub use error::{RegistryError, Result};
pub use registry::{Registry, RegistrySettings, DEFAULT_TTL};
