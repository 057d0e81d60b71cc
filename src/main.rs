use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use superdev::presentation::cli::{Cli, CliApp};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout belongs to the report and the logger protocol
    let default_filter = if cli.verbose { "superdev=debug" } else { "superdev=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color && atty::is(atty::Stream::Stderr))
                .with_target(false),
        )
        .with(filter)
        .init();

    CliApp::from_cli(cli).run().await
}
