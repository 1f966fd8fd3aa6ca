//! Contract Harness binary.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use harness::cli::{Cli, Command, ReportFormat};
use harness_application::SuiteRunner;
use harness_infrastructure::{ReqwestHttpClient, load_settings, render_json, render_text};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    let registry = harness::registry();

    match cli.command {
        Command::List(filter) => {
            for suite in registry.list(&filter.selection()) {
                println!("{}", suite.name);
                for case in suite.cases {
                    println!("  {case}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(args) => {
            args.apply(&mut settings);
            tracing::info!(
                "Starting contract harness v{} against {}",
                env!("CARGO_PKG_VERSION"),
                settings.base_url
            );

            let client = ReqwestHttpClient::new(&settings)?;
            let runner = SuiteRunner::new(Arc::new(client), settings);
            let report = runner
                .run_all(registry.suites(), &args.filter.selection())
                .await;

            let rendered = match args.format {
                ReportFormat::Text => render_text(&report),
                ReportFormat::Json => render_json(&report)?,
            };
            print!("{rendered}");

            Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
