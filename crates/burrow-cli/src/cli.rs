use burrow_telemetry::LogFormat;
use clap::Parser;
use jiff::SignedDuration;
use std::path::PathBuf;

pub const SNAPSHOT_PATH_ENV: &str = "BURROW_SNAPSHOT_PATH";
pub const TTL_ENV: &str = "BURROW_TTL";
pub const SAVE_INTERVAL_ENV: &str = "BURROW_SAVE_INTERVAL";
pub const SWEEP_BEFORE_SAVE_ENV: &str = "BURROW_SWEEP_BEFORE_SAVE";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_SNAPSHOT_PATH: &str = "urls.json";
pub const DEFAULT_TTL: &str = "24h";
pub const DEFAULT_SAVE_INTERVAL: &str = "5m";

#[derive(Debug, Parser)]
#[command(
    name = "burrow",
    about = "Interactive URL shortener backed by a JSON snapshot"
)]
pub struct CLI {
    /// File the registry is restored from at start and saved to.
    #[arg(long, env = SNAPSHOT_PATH_ENV, default_value = DEFAULT_SNAPSHOT_PATH)]
    pub snapshot_path: PathBuf,

    /// Lifetime of a short code, e.g. `24h` or `90m`.
    #[arg(
        long,
        env = TTL_ENV,
        default_value = DEFAULT_TTL,
        value_parser = parse_positive_duration,
    )]
    pub ttl: SignedDuration,

    /// Time between two automatic saves.
    #[arg(
        long,
        env = SAVE_INTERVAL_ENV,
        default_value = DEFAULT_SAVE_INTERVAL,
        value_parser = parse_positive_duration,
    )]
    pub save_interval: SignedDuration,

    /// Drop expired records before every save.
    #[arg(long, env = SWEEP_BEFORE_SAVE_ENV)]
    pub sweep_before_save: bool,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
}

fn parse_positive_duration(value: &str) -> Result<SignedDuration, String> {
    let duration: SignedDuration = value.parse().map_err(|e| format!("{e}"))?;
    if !duration.is_positive() {
        return Err(format!("duration must be greater than zero, got {value}"));
    }
    Ok(duration)
}
