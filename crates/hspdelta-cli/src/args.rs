//! Command-line surface
//!
//! Usage: hspdelta <HOST> <API_USERNAME> <API_PASSWORD> [OPTIONS]

use clap::{Parser, ValueEnum};
use hspdelta_client::DEFAULT_API_HOSTNAME;
use hspdelta_core::logging_facility::Profile;
use hspdelta_core::ReportView;

#[derive(Parser)]
#[command(name = "hspdelta")]
#[command(
    about = "Show how a host's system profile changed over time",
    long_about = None
)]
pub struct Cli {
    /// Inventory ID or display name of the host
    pub host: String,

    /// API username
    #[arg(env = "HSPDELTA_API_USERNAME")]
    pub api_username: String,

    /// API password
    #[arg(env = "HSPDELTA_API_PASSWORD", hide_env_values = true)]
    pub api_password: String,

    /// API hostname to connect to (a URL with scheme is used as-is)
    #[arg(
        short = 'a',
        long = "api-hostname",
        visible_alias = "api_hostname",
        env = "HSPDELTA_API_HOSTNAME",
        default_value = DEFAULT_API_HOSTNAME
    )]
    pub api_hostname: String,

    /// Disable TLS certificate verification (only useful for testing)
    #[arg(long = "disable-ssl-verify")]
    pub disable_ssl_verify: bool,

    /// Show a unified diff of the normalized profiles instead of the report
    #[arg(long)]
    pub diff: bool,

    /// Earliest profile to include (e.g. 2020-03-30, yesterday, "3 days ago")
    #[arg(long)]
    pub from: Option<String>,

    /// Latest day to include, inclusive
    #[arg(long)]
    pub to: Option<String>,

    /// Log output format on stderr
    #[arg(long, value_enum, env = "HSPDELTA_LOG_FORMAT", default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("host", &self.host)
            .field("api_username", &self.api_username)
            .field("api_password", &"***REDACTED***")
            .field("api_hostname", &self.api_hostname)
            .field("disable_ssl_verify", &self.disable_ssl_verify)
            .field("diff", &self.diff)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Human => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

impl Cli {
    pub fn view(&self) -> ReportView {
        if self.diff {
            ReportView::UnifiedDiff
        } else {
            ReportView::Structured
        }
    }
}
