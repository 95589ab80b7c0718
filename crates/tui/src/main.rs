mod app;
mod client;
mod config;
mod error;
mod session;
mod ui;

use std::{fs, path::Path, sync::Mutex};

use crate::{config::AppConfig, error::Result, session::Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let session = Session::load(&config.session_path)?;
    let mut app = app::App::new(config, session)?;
    let result = app.run().await;
    if let Err(err) = &result {
        tracing::error!("pokeadmin exited with error: {err}");
    }
    result
}

/// The terminal is taken by the UI, so logs go to a file.
fn init_tracing(config: &AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_file).parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pokeadmin_tui={level},listing={level}",
            level = config.level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
