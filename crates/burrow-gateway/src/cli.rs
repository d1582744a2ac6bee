use burrow_telemetry::LogFormat;
use clap::Parser;
use jiff::SignedDuration;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "BURROW_GATEWAY_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "BURROW_GATEWAY_PUBLIC_BASE_URL";
pub const SNAPSHOT_PATH_ENV: &str = "BURROW_SNAPSHOT_PATH";
pub const TTL_ENV: &str = "BURROW_TTL";
pub const SAVE_INTERVAL_ENV: &str = "BURROW_SAVE_INTERVAL";
pub const SWEEP_BEFORE_SAVE_ENV: &str = "BURROW_SWEEP_BEFORE_SAVE";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SNAPSHOT_PATH: &str = "urls.json";
pub const DEFAULT_TTL: &str = "24h";
pub const DEFAULT_SAVE_INTERVAL: &str = "5m";

#[derive(Debug, Parser)]
#[command(
    name = "burrow-gateway",
    about = "HTTP front end for the burrow URL shortener"
)]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix combined with a code to form the public short link.
    #[arg(
        long,
        env = PUBLIC_BASE_URL_ENV,
        default_value = DEFAULT_PUBLIC_BASE_URL
    )]
    pub public_base_url: String,

    #[arg(long, env = SNAPSHOT_PATH_ENV, default_value = DEFAULT_SNAPSHOT_PATH)]
    pub snapshot_path: PathBuf,

    #[arg(
        long,
        env = TTL_ENV,
        default_value = DEFAULT_TTL,
        value_parser = parse_positive_duration,
    )]
    pub ttl: SignedDuration,

    #[arg(
        long,
        env = SAVE_INTERVAL_ENV,
        default_value = DEFAULT_SAVE_INTERVAL,
        value_parser = parse_positive_duration,
    )]
    pub save_interval: SignedDuration,

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["burrow-gateway"]).unwrap();
        assert_eq!(cli.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cli.public_base_url, "http://127.0.0.1:8080");
        assert_eq!(cli.ttl, SignedDuration::from_hours(24));
        assert_eq!(cli.save_interval, SignedDuration::from_mins(5));
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let args = ["burrow-gateway", "--listen-addr", "localhost"];
        assert!(CLI::try_parse_from(args).is_err());
    }
}
