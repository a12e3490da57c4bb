use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use instabot::config::{Config, LogConfig};
use instabot::input::{envelopes, valid_envelopes};
use instabot::{EventKind, Messaging};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Extracts flat event records from messaging webhook envelopes
#[derive(Debug, Parser)]
#[command(about, version)]
struct Args {
    /// Kind of the events, e.g. `text_message` or `image_message`
    #[arg(short, long, required_unless_present = "init_config")]
    kind: Option<EventKind>,
    /// File with one envelope per line [default: stdin]
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Pretty print the records
    #[arg(long)]
    pretty: bool,
    /// Enable debug logging, overrides `RUST_LOG` and the configured filter
    #[arg(short, long)]
    verbose: bool,
    /// Write the default config file to `--config` or the default location and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.init_config {
        return match &args.config {
            Some(path) => Config::default().save_new_at(path),
            None => Config::default().save_new(),
        };
    }

    let config = Config::load_or_default(args.config.as_deref())?;
    let _guard = init_logger(&config.log, args.verbose)?;
    log_panics::init();

    let Some(kind) = args.kind else {
        anyhow::bail!("missing event kind");
    };

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let pretty = args.pretty || config.output.pretty;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let input: Box<dyn Iterator<Item = _>> = if config.output.skip_invalid {
        Box::new(valid_envelopes(reader))
    } else {
        Box::new(envelopes(reader))
    };

    let mut count = 0;
    for messaging in input {
        let messaging: Messaging = messaging?;
        let event = messaging.extract(kind);
        debug!(%kind, sender = %event.origin().sender.id, "extracted event");
        if pretty {
            serde_json::to_writer_pretty(&mut out, &event)?;
        } else {
            serde_json::to_writer(&mut out, &event)?;
        }
        writeln!(out)?;
        count += 1;
    }

    info!(%kind, count, "done");
    Ok(())
}

fn init_logger(config: &LogConfig, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = log_filter(config, verbose, rust_log.as_deref())?;

    match &config.path {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// `-v` wins over `RUST_LOG`, which wins over the configured filter
fn log_filter(
    config: &LogConfig,
    verbose: bool,
    rust_log: Option<&str>,
) -> anyhow::Result<EnvFilter> {
    let directives = match rust_log {
        _ if verbose => "debug",
        Some(rust_log) if !rust_log.trim().is_empty() => rust_log,
        _ => config.filter.as_str(),
    };
    EnvFilter::try_new(directives).context("invalid log filter")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_precedence() -> anyhow::Result<()> {
        let config = LogConfig {
            path: None,
            filter: "warn".to_string(),
        };
        let expected = |directives: &str| EnvFilter::new(directives).to_string();

        assert_eq!(log_filter(&config, false, None)?.to_string(), expected("warn"));
        assert_eq!(log_filter(&config, false, Some(""))?.to_string(), expected("warn"));
        assert_eq!(
            log_filter(&config, false, Some("instabot=trace"))?.to_string(),
            expected("instabot=trace")
        );
        assert_eq!(
            log_filter(&config, true, Some("instabot=trace"))?.to_string(),
            expected("debug")
        );
        assert_eq!(log_filter(&config, true, None)?.to_string(), expected("debug"));
        Ok(())
    }

    #[test]
    fn test_init_config_at_given_path() -> anyhow::Result<()> {
        let args = Args::try_parse_from(["instabot", "--init-config", "--config", "custom.toml"])?;
        assert!(args.init_config);
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("custom.toml")));
        assert!(args.kind.is_none());

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/custom.toml");
        Config::default().save_new_at(&path)?;
        assert_eq!(Config::load_or_default(Some(&path))?, Config::default());
        assert!(Config::default().save_new_at(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_kind_required_without_init_config() {
        assert!(Args::try_parse_from(["instabot"]).is_err());
        let args = Args::try_parse_from(["instabot", "--kind", "image_message", "-v"]).unwrap();
        assert_eq!(args.kind, Some(EventKind::ImageMessage));
        assert!(args.verbose);
    }
}
