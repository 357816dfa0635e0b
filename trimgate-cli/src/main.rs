//! Entry point for the `trimgate` binary.

use clap::Parser;

use trimgate_cli::cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let code = trimgate_cli::run(cli).await;
    std::process::exit(code);
}
