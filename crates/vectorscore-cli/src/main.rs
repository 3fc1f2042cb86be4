//! vectorscore - CVSS vector scoring CLI
//!
//! Scores a single CVSS v3.0/v3.1/v4.0 vector string and prints the
//! score, severity rating and canonical clean vector.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use vectorscore_common::{Config, LogConfig, LogFormat};

/// CVSS vector scoring tool
#[derive(Parser, Debug)]
#[command(name = "vectorscore")]
#[command(version)]
#[command(about = "Score CVSS v3.x/v4.0 vector strings", long_about = None)]
struct Args {
    /// CVSS vector string (e.g. "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H")
    vector: String,

    /// Configuration file path
    #[arg(short, long, default_value = "/etc/vectorscore/config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,

    /// Emit the result as a single JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };
    let config = config.merge_env();

    let level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level);
    let format = args
        .log_format
        .as_deref()
        .unwrap_or(&config.logging.format);
    vectorscore_common::init_logging(
        LogConfig::new()
            .level(level)
            .format(LogFormat::from_name(format)),
    );

    debug!(vector = %args.vector, "scoring vector");

    let result = vectorscore_engine::compute(&args.vector)
        .inspect_err(|err| error!(code = err.code(), "failed to score vector"))?;

    if args.json || config.output.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("Score: {:.1}", result.score);
        println!("Severity: {}", result.severity);
        println!("Vector: {}", result.vector);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "vectorscore",
            "--json",
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
        ])
        .unwrap();
        assert!(args.json);
        assert!(args.vector.starts_with("CVSS:3.1/"));
        assert!(args.log_level.is_none());
    }
}
