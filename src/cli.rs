use clap::Parser;
use std::path::PathBuf;

use crate::config::ConventionKind;

/// Headless form driver - reads commands from stdin and prints rendered props
#[derive(Parser, Debug, Clone)]
#[command(name = "miniform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "MINIFORM_CONFIG", default_value = "miniform.toml")]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MINIFORM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// How form data is merged into props
    #[arg(long, env = "MINIFORM_CONVENTION", value_enum)]
    pub convention: Option<ConventionKind>,

    /// Key form data is nested under
    #[arg(long, env = "MINIFORM_DATA_KEY")]
    pub data_key: Option<String>,

    /// External props of the form, as a JSON object
    #[arg(long, default_value = "{}")]
    pub props: String,

    /// Minimum accepted age in the signup form
    #[arg(long, env = "MINIFORM_MIN_AGE", default_value_t = 18.0)]
    pub min_age: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["miniform"]);
        assert_eq!(cli.config, PathBuf::from("miniform.toml"));
        assert!(cli.log_level.is_none());
        assert!(cli.convention.is_none());
        assert!(cli.data_key.is_none());
        assert_eq!(cli.props, "{}");
        assert_eq!(cli.min_age, 18.0);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "miniform",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "--convention",
            "flat",
            "--props",
            r#"{"title":"Join"}"#,
            "--min-age",
            "21",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert_eq!(cli.convention, Some(ConventionKind::Flat));
        assert_eq!(cli.props, r#"{"title":"Join"}"#);
        assert_eq!(cli.min_age, 21.0);
    }
}
