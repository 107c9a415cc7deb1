//! Report command
//!
//! Assembles the client and report configuration from the parsed arguments
//! and prints the outcome to stdout.

use crate::args::Cli;
use hspdelta_client::{ClientConfig, HttpProfileService};
use hspdelta_core::errors::ExError;
use hspdelta_core_types::Sensitive;
use hspdelta_engine::{run_report, DateRange, ReportOptions};

/// Execute the report
pub fn execute(cli: Cli) -> Result<(), ExError> {
    let view = cli.view();
    let range = DateRange::parse(cli.from.as_deref(), cli.to.as_deref(), chrono::Utc::now())
        .map_err(|e| ExError::from(e).with_op("parse_date_range"))?;
    let options = ReportOptions { view, range };

    let config = ClientConfig::new(
        &cli.api_hostname,
        cli.api_username,
        Sensitive::new(cli.api_password),
        !cli.disable_ssl_verify,
    )
    .map_err(|e| ExError::from(e).with_op("configure"))?;
    tracing::debug!(base_url = %config.base_url, verify_tls = config.verify_tls, "client configured");

    let service =
        HttpProfileService::new(config).map_err(|e| ExError::from(e).with_op("configure"))?;

    let outcome = run_report(&service, &cli.host, &options)?;
    for line in outcome.lines() {
        println!("{}", line);
    }

    Ok(())
}
