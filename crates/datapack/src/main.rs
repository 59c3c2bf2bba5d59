mod cli;
mod config;
mod logging;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use datapack_install::InstallError;

use crate::cli::App;
use crate::config::DatapackConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();

    let result = async move {
        let config = DatapackConfig::load(app.config.as_deref()).context("failed to load configuration")?;
        logging::init(&config.log_level);
        tracing::debug!(?config, "configuration loaded");
        app.cmd.run(&config).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e.downcast_ref::<InstallError>().is_some_and(InstallError::is_retryable) {
                eprintln!("The operation can be retried.");
            }
            ExitCode::FAILURE
        }
    }
}
