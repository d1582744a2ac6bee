use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::snapshot::{self, Records};
use burrow_core::{ShortCode, Shortener, UrlRecord};
use burrow_generator::{Generator, RandomGenerator};
use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// How long a record stays resolvable after creation unless configured otherwise.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Configures a [`Registry`] instance.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RegistrySettings {
    /// Lifetime of every record, measured from its creation.
    #[builder(default = DEFAULT_TTL)]
    pub ttl: SignedDuration,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The mapping from short code to [`UrlRecord`].
///
/// The whole map sits behind one `RwLock`: `create`, `resolve` and the
/// swap in `restore` take it exclusively, `inspect` and the encode phase
/// of `snapshot` share it. No file I/O happens while it is held.
///
/// Expired records are evicted lazily. They stay in the map until the
/// next `resolve` or `inspect` of their code (or a `purge_expired` sweep),
/// but are never reported as found.
pub struct Registry<G = RandomGenerator, C = SystemClock> {
    records: RwLock<Records>,
    generator: G,
    clock: C,
    ttl: SignedDuration,
}

impl Registry {
    /// Creates a registry drawing 6-character random codes and using wall-clock time.
    pub fn new(settings: RegistrySettings) -> Self {
        Self::with_generator(settings, RandomGenerator::new())
    }
}

impl<G: Generator> Registry<G> {
    /// Creates a registry with a custom code generator.
    pub fn with_generator(settings: RegistrySettings, generator: G) -> Self {
        Self::with_clock(settings, generator, SystemClock)
    }
}

impl<G: Generator, C: Clock> Registry<G, C> {
    /// Creates a registry with a custom code generator and time source.
    pub fn with_clock(settings: RegistrySettings, generator: G, clock: C) -> Self {
        Self {
            records: RwLock::new(Records::new()),
            generator,
            clock,
            ttl: settings.ttl,
        }
    }

    /// Stores `target` under a newly generated code and returns the code.
    ///
    /// A drawn code that belongs to a live record is discarded and a new one
    /// drawn; an expired record holding the code is replaced.
    pub fn create(&self, target: impl Into<String>) -> ShortCode {
        let now = self.clock.now();
        let record = UrlRecord::new(target, self.expiry_from(now));

        let mut records = self.records.write();
        let code = loop {
            let candidate = self.generator.generate();
            match records.get(&candidate) {
                Some(existing) if !existing.is_expired_at(now) => {
                    warn!(code = %candidate, "generated code is already live, drawing again");
                }
                _ => break candidate,
            }
        };

        debug!(code = %code, expires_at = %record.expires_at, "created short code");
        records.insert(code.clone(), record);
        code
    }

    /// Resolves `code` to its target and counts the access.
    ///
    /// The existence check, the expiry check and the increment (or the
    /// eviction) all happen under one exclusive guard.
    pub fn resolve(&self, code: &ShortCode) -> Option<String> {
        let now = self.clock.now();
        let mut records = self.records.write();

        let expired = records.get(code)?.is_expired_at(now);
        if expired {
            records.remove(code);
            debug!(code = %code, "evicted expired record on resolve");
            return None;
        }

        let record = records.get_mut(code)?;
        record.access_count = record.access_count.saturating_add(1);
        Some(record.target.clone())
    }

    /// Returns the access count of `code` without incrementing it.
    ///
    /// Runs under the shared lock. Only when it observes an expired record
    /// does it take the exclusive lock to evict it, re-checking first since
    /// the code may have been re-created in between.
    pub fn inspect(&self, code: &ShortCode) -> Option<u64> {
        let now = self.clock.now();
        {
            let records = self.records.read();
            let record = records.get(code)?;
            if !record.is_expired_at(now) {
                return Some(record.access_count);
            }
        }

        self.evict_if_expired(code, now);
        None
    }

    /// Evicts `code` if its record is still expired at `now`.
    fn evict_if_expired(&self, code: &ShortCode, now: Timestamp) {
        let mut records = self.records.write();
        if records.get(code).is_some_and(|r| r.is_expired_at(now)) {
            records.remove(code);
            debug!(code = %code, "evicted expired record on inspect");
        }
    }

    /// Writes every record currently held, expired or not, to `path`.
    ///
    /// The map is encoded under the shared lock into a buffer, then the
    /// buffer is written without holding any lock.
    pub fn snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (bytes, count) = {
            let records = self.records.read();
            (snapshot::encode(&records)?, records.len())
        };

        snapshot::write(path, &bytes)?;
        info!(path = %path.display(), records = count, "snapshot written");
        Ok(())
    }

    /// Replaces the whole registry with the contents of the snapshot at `path`.
    ///
    /// The file is read and decoded before the exclusive lock is taken; on
    /// any failure the current records are left untouched. Returns the
    /// number of records loaded.
    pub fn restore(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let loaded = snapshot::read(path)?;
        let count = loaded.len();

        *self.records.write() = loaded;
        info!(path = %path.display(), records = count, "snapshot restored");
        Ok(count)
    }

    /// Like [`Registry::restore`], but a snapshot that does not exist yet is
    /// treated as an empty history rather than an error. Unreadable or
    /// corrupt snapshots are still reported.
    pub fn restore_if_present(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        match self.restore(path) {
            Err(e) if e.is_missing_source() => {
                info!(path = %path.display(), "no snapshot found, starting empty");
                Ok(0)
            }
            other => other,
        }
    }

    /// Removes every expired record and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        let purged = before - records.len();

        if purged > 0 {
            debug!(purged, "purged expired records");
        }
        purged
    }

    /// Number of records physically held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Drops every record.
    pub fn clear(&self) {
        self.records.write().clear();
    }

    fn expiry_from(&self, now: Timestamp) -> Timestamp {
        now.checked_add(self.ttl).unwrap_or(Timestamp::MAX)
    }
}

impl<G: Generator, C: Clock + 'static> Shortener for Registry<G, C> {
    fn shorten(&self, target: &str) -> ShortCode {
        self.create(target)
    }

    fn resolve(&self, code: &ShortCode) -> Option<String> {
        Registry::resolve(self, code)
    }

    fn stats(&self, code: &ShortCode) -> Option<u64> {
        self.inspect(code)
    }
}
