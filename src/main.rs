use anyhow::Result;
use clap::Parser;
use recap::cli::{
    handle_config_command, handle_submit_command, Cli, CliCommand,
};
use recap::upload::UploadKind;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        CliCommand::Version => {
            println!("recap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Audio(args) => handle_submit_command(UploadKind::Audio, args).await,
        CliCommand::Text(args) => handle_submit_command(UploadKind::Text, args).await,
        CliCommand::Config(args) => handle_config_command(args),
    }
}
