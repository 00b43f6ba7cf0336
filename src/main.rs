//! # Roster Main Entry Point

use anyhow::Result;
use roster::cmd_args::CommandLineArgs;
use roster::{config, logging, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    let log_path = config::expand_path(cmd_args.log_file().unwrap_or(config::DEFAULT_LOG_PATH));
    logging::init_tracing_subscriber(&log_path, cmd_args.verbose())?;

    let mut app = AppController::new(&cmd_args)?;
    let result = app.run().await;
    if let Err(e) = &result {
        tracing::error!("Application error: {:#}", e);
    }
    result
}
