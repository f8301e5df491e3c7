//! CLI surface.
//!
//! Thin presentation layer over the upload controller: flags map to core
//! operations, the resulting notification and summary state get rendered to
//! the terminal.

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::notify::NotificationQueue;
use crate::summary::SummaryModal;
use crate::upload::{HttpTransport, UploadController, UploadKind, UploadOutcome};

#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(about = "Meeting summarizer client", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Summarize an audio recording of a meeting
    Audio(SubmitCliArgs),
    /// Summarize a plain-text meeting transcript
    Text(SubmitCliArgs),
    /// Show or change the client configuration
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct SubmitCliArgs {
    /// File to upload
    pub file: PathBuf,
    /// Email address for receiving the minutes
    #[arg(short, long)]
    pub email: Option<String>,
    /// Override the configured service base URL
    #[arg(long)]
    pub base_url: Option<String>,
    /// Request deadline in seconds (default: wait indefinitely)
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Copy the summary to the clipboard
    #[arg(short, long)]
    pub copy: bool,
    /// Write meeting_summary.md into this directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Do not show a spinner while waiting
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,
    /// Update configuration values
    Set {
        /// Base URL of the summarizer service
        #[arg(long)]
        base_url: Option<String>,
        /// Default email sent with uploads
        #[arg(long)]
        email: Option<String>,
        /// Request deadline in seconds (0 clears it)
        #[arg(long)]
        timeout: Option<u64>,
        /// Send the tunnel interstitial-bypass header
        #[arg(long)]
        skip_browser_warning: Option<bool>,
    },
}

/// Handle the audio/text submit commands.
pub async fn handle_submit_command(kind: UploadKind, args: SubmitCliArgs) -> Result<()> {
    // Validate before touching config so a typo'd path fails fast.
    if !args.file.exists() {
        bail!("{} file not found: {}", kind, args.file.display());
    }

    let config = Config::load()?;
    let base_url = args.base_url.unwrap_or(config.service.base_url);
    let timeout = args
        .timeout
        .or(config.service.timeout_seconds)
        .map(Duration::from_secs);

    let transport = HttpTransport::new(&base_url, timeout, config.service.skip_browser_warning)?;
    let notifications = NotificationQueue::default();
    let modal = SummaryModal::default();
    let mut controller =
        UploadController::new(Box::new(transport), notifications.clone(), modal.clone());

    controller.set_email(args.email.unwrap_or(config.submit.email));
    controller.select_path(kind, &args.file).await?;

    let spinner = if args.no_progress {
        None
    } else {
        Some(create_spinner())
    };

    let submit_result = controller.submit(kind).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    render_notification(&notifications).await;

    match submit_result? {
        UploadOutcome::Success { summary_text } => {
            println!("{}", summary_text);

            if args.copy {
                match modal.copy_to_clipboard().await {
                    Ok(true) => eprintln!("Summary copied to clipboard!"),
                    Ok(false) => {}
                    Err(err) => eprintln!("Failed to copy summary: {}", err),
                }
            }

            if let Some(dir) = &args.output {
                if let Some(path) = modal.export_as_file(dir).await? {
                    eprintln!("Summary saved to: {}", path.display());
                }
            }

            Ok(())
        }
        UploadOutcome::MalformedResponse | UploadOutcome::Failure { .. } => {
            bail!("{} upload failed", kind)
        }
    }
}

pub fn handle_config_command(args: ConfigCliArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("base_url: {}", config.service.base_url);
            match config.service.timeout_seconds {
                Some(secs) => println!("timeout_seconds: {}", secs),
                None => println!("timeout_seconds: (unset, requests wait indefinitely)"),
            }
            println!(
                "skip_browser_warning: {}",
                config.service.skip_browser_warning
            );
            if config.submit.email.is_empty() {
                println!("email: (blank, placeholder is sent)");
            } else {
                println!("email: {}", config.submit.email);
            }
            Ok(())
        }
        ConfigCommand::Set {
            base_url,
            email,
            timeout,
            skip_browser_warning,
        } => {
            let mut config = Config::load()?;

            if let Some(url) = base_url {
                config.service.base_url = url.trim_end_matches('/').to_string();
            }
            if let Some(email) = email {
                config.submit.email = email;
            }
            if let Some(secs) = timeout {
                config.service.timeout_seconds = if secs == 0 { None } else { Some(secs) };
            }
            if let Some(skip) = skip_browser_warning {
                config.service.skip_browser_warning = skip;
            }

            config.save()?;
            println!("Configuration updated.");
            Ok(())
        }
    }
}

async fn render_notification(notifications: &NotificationQueue) {
    if let Some(notification) = notifications.current().await {
        eprintln!(
            "[{}] {}",
            notification.severity.as_str(),
            notification.message
        );
    }
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Summarizing...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
