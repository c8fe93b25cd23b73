//! Command-line interface for Reqstat
//!
//! Provides argument parsing and subcommand handling for the Reqstat binary.

use clap::{Parser, Subcommand};

/// Per-route HTTP request metrics server
#[derive(Parser)]
#[command(name = "reqstat")]
#[command(version)]
#[command(about = "Per-route HTTP request metrics with Prometheus export")]
#[command(
    long_about = "Reqstat serves an instrumented HTTP pipeline: every request through the \
    server is counted and timed, partitioned by status code, method, and path, and the \
    accumulated metrics are exposed at /metrics in Prometheus text format."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Reqstat Configuration

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 3000

[metrics]
# Namespace prefixed to both metric names, producing
# <namespace>_requests_total and <namespace>_request_duration_milliseconds
namespace = "http"

# Latency histogram bucket upper bounds in milliseconds (strictly increasing).
# Remove the line to use the built-in defaults shown here.
buckets = [300.0, 1000.0, 2500.0, 5000.0]

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Clap's built-in verification for the CLI structure
        Cli::command().debug_assert();
    }

    #[test]
    fn default_config_path() {
        let cli = Cli::parse_from(["reqstat"]);
        assert_eq!(cli.config, "config.toml");
        assert!(cli.command.is_none());
    }

    #[test]
    fn custom_config_path() {
        let cli = Cli::parse_from(["reqstat", "--config", "custom.toml"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::parse_from(["reqstat", "config"]);
        assert!(matches!(cli.command, Some(Command::Config { output: None })));
    }

    #[test]
    fn config_subcommand_with_output() {
        let cli = Cli::parse_from(["reqstat", "config", "-o", "my-config.toml"]);
        assert!(matches!(
            cli.command,
            Some(Command::Config { output: Some(ref path) }) if path == "my-config.toml"
        ));
    }

    #[test]
    fn template_is_valid_toml() {
        let template = generate_config_template();
        let result: Result<toml::Value, _> = toml::from_str(template);
        assert!(
            result.is_ok(),
            "Template should be valid TOML: {:?}",
            result.err()
        );
    }

    #[test]
    fn template_has_all_sections() {
        let template = generate_config_template();
        assert!(template.contains("[server]"));
        assert!(template.contains("[metrics]"));
        assert!(template.contains("[observability]"));
    }
}
