pub mod enrich;
pub mod serve;
pub mod validate;

pub use enrich::EnrichCommand;
pub use serve::ServeCommand;
pub use validate::ValidateCommand;

use crate::error::CliResult;
use crate::utils::validate_file_exists;
use dynact_config::{ConfigLoader, LoadedConfig};
use std::path::Path;
use tokio_util::sync::CancellationToken;

fn load_manifest(path: &Path) -> CliResult<LoadedConfig> {
    validate_file_exists(path)?;
    Ok(ConfigLoader::default().load_from_file(path)?)
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, shutting down");
            token.cancel();
        }
    });
}
