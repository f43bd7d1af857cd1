//! mys-downloader - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mys_downloader::{
    api::HttpClient,
    cli::Args,
    config::{parse_uid, validate_config, Config},
    download::{CrawlSession, ProgressEvent, SessionState},
    error::{exit_codes, Error, Result},
    fs::get_date_root,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_session_stats,
        print_success, print_warning, StatusLine,
    },
    shutdown::install_signal_handler,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_)
                | Error::UrlParse(_)
                | Error::InvalidIdentifier(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api(_) | Error::AccountNotFound(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "No config file at {}, using defaults",
            args.config.display()
        ));
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let raw_uid = config
        .target
        .uid
        .clone()
        .ok_or_else(|| Error::MissingConfig("uid".into()))?;
    let uid = parse_uid(&raw_uid)?;
    if uid != raw_uid.trim() {
        print_info(&format!("Extracted user ID {} from link", uid));
    }

    let transport = Arc::new(HttpClient::new(&config.network)?);
    let date_root = get_date_root(&config);

    print_info("Checking user...");
    let mut session = match CrawlSession::open(transport, &config, &uid, &date_root).await {
        Ok(session) => session,
        Err(Error::AccountNotFound(_)) => {
            return Err(Error::AccountNotFound(format!(
                "{} (check that the user ID is correct)",
                uid
            )))
        }
        Err(e) => return Err(e),
    };

    print_success(&format!("Found user {}", session.display_name()));
    print_config_summary(
        &uid,
        session.display_name(),
        &session.save_path().display().to_string(),
    );

    let status = StatusLine::new(!args.quiet);
    let mut observer = |event: &ProgressEvent| status.update(event);

    let cancel = install_signal_handler();

    if config.options.count_posts_first {
        let total = session.count_posts(&cancel, &mut observer).await;
        print_info(&format!("User has {} posts", total));

        if cancel.is_cancelled() {
            status.finish();
            print_warning("Stopped by user");
            return Ok(());
        }
    }

    let outcome = session.run(&cancel, &mut observer).await;
    status.finish();

    print_session_stats(&outcome);

    match outcome.state {
        SessionState::Failed(message) => Err(Error::Api(message)),
        _ => Ok(()),
    }
}
