mod cli;
mod menu;

use crate::cli::CLI;
use anyhow::Context;
use burrow_generator::Generator;
use burrow_registry::{Autosave, AutosaveSettings, Clock, Registry, RegistrySettings};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    burrow_telemetry::init(config.log_format)?;

    info!(
        snapshot_path = %config.snapshot_path.display(),
        ttl = %config.ttl,
        save_interval = %config.save_interval,
        "starting burrow"
    );

    let registry = Arc::new(Registry::new(
        RegistrySettings::builder().ttl(config.ttl).build(),
    ));
    let restored = registry
        .restore_if_present(&config.snapshot_path)
        .context("refusing to start over an unusable snapshot")?;
    info!(records = restored, "registry ready");

    let autosave = Autosave::spawn(
        Arc::clone(&registry),
        AutosaveSettings::builder()
            .path(config.snapshot_path.clone())
            .interval(config.save_interval.unsigned_abs())
            .sweep_before_save(config.sweep_before_save)
            .build(),
    );

    // stdin is blocking, keep it off the runtime threads
    let menu_registry = Arc::clone(&registry);
    run_session(autosave, move || {
        menu::run(
            &*menu_registry,
            std::io::stdin().lock(),
            std::io::stdout().lock(),
        )
    })
    .await
}

/// Runs `menu` on a blocking thread, then takes the final snapshot.
///
/// The snapshot is taken even when the menu fails; the menu error wins
/// if both fail.
async fn run_session<G, C, F>(autosave: Autosave<G, C>, menu: F) -> anyhow::Result<()>
where
    G: Generator,
    C: Clock + 'static,
    F: FnOnce() -> io::Result<()> + Send + 'static,
{
    let menu = tokio::task::spawn_blocking(menu).await;
    let saved = autosave.shutdown().await;

    match menu {
        Ok(Ok(())) => saved.context("final snapshot failed"),
        menu => {
            if let Err(e) = saved {
                error!(error = %e, "final snapshot failed");
            }
            menu.context("menu task failed")?.context("menu i/o failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_generator::RandomGenerator;
    use burrow_registry::SystemClock;
    use std::io::Write;
    use std::path::Path;
    use std::time::Duration;

    /// Accepts output until the menu prints a created code, then fails.
    struct BrokenPipe(Vec<u8>);

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if String::from_utf8_lossy(&self.0).contains("Short URL: ") {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
            }
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn spawn_autosave(
        registry: &Arc<Registry>,
        path: &Path,
    ) -> Autosave<RandomGenerator, SystemClock> {
        Autosave::spawn(
            Arc::clone(registry),
            AutosaveSettings::builder()
                .path(path)
                .interval(Duration::from_secs(3600))
                .build(),
        )
    }

    #[tokio::test]
    async fn menu_failure_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let registry = Arc::new(Registry::new(RegistrySettings::default()));
        let autosave = spawn_autosave(&registry, &path);

        let menu_registry = Arc::clone(&registry);
        let result = run_session(autosave, move || {
            menu::run(
                &*menu_registry,
                &b"1\nhttps://a.example\n2\n4\n"[..],
                BrokenPipe(Vec::new()),
            )
        })
        .await;

        assert!(result.is_err());
        let restored = Registry::new(RegistrySettings::default());
        assert_eq!(restored.restore(&path).unwrap(), 1);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("https://a.example"));
    }

    #[tokio::test]
    async fn clean_exit_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let registry = Arc::new(Registry::new(RegistrySettings::default()));
        let autosave = spawn_autosave(&registry, &path);

        let menu_registry = Arc::clone(&registry);
        run_session(autosave, move || {
            menu::run(
                &*menu_registry,
                &b"1\nhttps://a.example\n4\n"[..],
                io::sink(),
            )
        })
        .await
        .unwrap();

        let restored = Registry::new(RegistrySettings::default());
        restored.restore(&path).unwrap();
        assert_eq!(restored.len(), 1);
    }
}
