use crate::clock::Clock;
use crate::error::{RegistryError, Result};
use crate::registry::Registry;
use burrow_generator::Generator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use typed_builder::TypedBuilder;

/// Default time between two periodic snapshots.
pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Configures an [`Autosave`] task.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AutosaveSettings {
    /// Where snapshots are written.
    #[builder(setter(into))]
    pub path: PathBuf,
    #[builder(default = DEFAULT_SAVE_INTERVAL)]
    pub interval: Duration,
    /// Drop expired records before each save so they don't linger on disk.
    #[builder(default = false)]
    pub sweep_before_save: bool,
}

/// Periodically snapshots a [`Registry`] from a background tokio task.
///
/// The first snapshot is taken one full interval after spawning. Failed
/// saves are logged and the schedule continues. [`Autosave::shutdown`]
/// stops the task and takes one last snapshot.
pub struct Autosave<G, C> {
    registry: Arc<Registry<G, C>>,
    settings: AutosaveSettings,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl<G, C> Autosave<G, C>
where
    G: Generator,
    C: Clock + 'static,
{
    /// Spawns the autosave task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    pub fn spawn(registry: Arc<Registry<G, C>>, settings: AutosaveSettings) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            path = %settings.path.display(),
            interval_secs = settings.interval.as_secs(),
            sweep_before_save = settings.sweep_before_save,
            "starting autosave"
        );

        let handle = tokio::spawn(Self::run(
            Arc::clone(&registry),
            settings.clone(),
            shutdown_rx,
        ));

        Self {
            registry,
            settings,
            shutdown_tx,
            handle,
        }
    }

    /// Stops the periodic task and writes a final snapshot.
    pub async fn shutdown(self) -> Result<()> {
        // The receiver only disappears once the task has already exited.
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "autosave task did not stop cleanly");
        }

        debug!("taking final snapshot");
        save(&self.registry, &self.settings).await
    }

    async fn run(
        registry: Arc<Registry<G, C>>,
        settings: AutosaveSettings,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = save(&registry, &settings).await {
                        error!(error = %e, "periodic snapshot failed");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("autosave task stopped");
    }
}

/// Runs one sweep-and-snapshot pass on the blocking pool.
async fn save<G, C>(registry: &Arc<Registry<G, C>>, settings: &AutosaveSettings) -> Result<()>
where
    G: Generator,
    C: Clock + 'static,
{
    let registry = Arc::clone(registry);
    let path = settings.path.clone();
    let sweep = settings.sweep_before_save;

    tokio::task::spawn_blocking(move || {
        if sweep {
            registry.purge_expired();
        }
        registry.snapshot(&path)
    })
    .await
    .map_err(|e| RegistryError::Background(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_clock::TestClock;
    use crate::registry::{RegistrySettings, DEFAULT_TTL};
    use burrow_generator::RandomGenerator;
    use jiff::Timestamp;

    async fn wait_for_file(path: &std::path::Path) {
        for _ in 0..200 {
            if path.exists() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("snapshot {} was never written", path.display());
    }

    #[tokio::test]
    async fn saves_periodically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let registry = Arc::new(Registry::new(RegistrySettings::default()));
        let code = registry.create("https://example.com");

        let settings = AutosaveSettings::builder()
            .path(&path)
            .interval(Duration::from_millis(20))
            .build();
        let autosave = Autosave::spawn(Arc::clone(&registry), settings);

        wait_for_file(&path).await;
        autosave.shutdown().await.unwrap();

        let restored = Registry::new(RegistrySettings::default());
        assert_eq!(restored.restore(&path).unwrap(), 1);
        assert_eq!(
            restored.resolve(&code).as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn shutdown_writes_final_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let registry = Arc::new(Registry::new(RegistrySettings::default()));

        let autosave = Autosave::spawn(
            Arc::clone(&registry),
            AutosaveSettings::builder()
                .path(&path)
                .interval(Duration::from_secs(3600))
                .build(),
        );

        // created after spawning, captured only by the shutdown save
        let code = registry.create("https://late.example");
        registry.resolve(&code);
        assert!(!path.exists());

        autosave.shutdown().await.unwrap();

        let restored = Registry::new(RegistrySettings::default());
        restored.restore(&path).unwrap();
        assert_eq!(restored.inspect(&code), Some(1));
    }

    #[tokio::test]
    async fn shutdown_reports_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(Registry::new(RegistrySettings::default()));

        let autosave = Autosave::spawn(
            Arc::clone(&registry),
            AutosaveSettings::builder()
                .path(dir.path().join("missing").join("urls.json"))
                .interval(Duration::from_secs(3600))
                .build(),
        );

        let err = autosave.shutdown().await.unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }

    #[tokio::test]
    async fn sweep_before_save_drops_expired_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let clock = TestClock::new(Timestamp::from_second(1_000_000).unwrap());
        let registry = Arc::new(Registry::with_clock(
            RegistrySettings::default(),
            RandomGenerator::new(),
            clock.clone(),
        ));

        registry.create("https://expired.example");
        clock.advance(DEFAULT_TTL);
        let live = registry.create("https://live.example");

        let autosave = Autosave::spawn(
            Arc::clone(&registry),
            AutosaveSettings::builder()
                .path(&path)
                .interval(Duration::from_secs(3600))
                .sweep_before_save(true)
                .build(),
        );
        autosave.shutdown().await.unwrap();

        assert_eq!(registry.len(), 1);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains(live.as_str()));
        assert!(!saved.contains("https://expired.example"));
    }
}
