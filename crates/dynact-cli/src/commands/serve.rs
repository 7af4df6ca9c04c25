//! REST API server command

use super::{cancel_on_ctrl_c, load_manifest};
use crate::error::CliResult;
use dynact_server::AppState;
use std::path::Path;

pub struct ServeCommand;

impl ServeCommand {
    pub async fn run(config: &Path, addr: &str) -> CliResult<()> {
        tracing::info!("Manifest: {}", config.display());
        let loaded = load_manifest(config)?;
        let app_state = AppState::from_config(&loaded).await?;

        cancel_on_ctrl_c(app_state.shutdown.clone());
        dynact_server::serve(app_state, addr).await?;
        Ok(())
    }
}
