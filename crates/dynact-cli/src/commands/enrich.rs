//! One-shot enrichment command

use super::{cancel_on_ctrl_c, load_manifest};
use crate::error::CliResult;
use crate::utils::{read_values, ColoredOutput};
use dynact_server::AppState;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct EnrichCommand;

impl EnrichCommand {
    pub async fn run(
        config: &Path,
        connection: &str,
        action: &str,
        values: Option<String>,
        values_file: Option<PathBuf>,
        pretty: bool,
    ) -> CliResult<()> {
        let user_values = read_values(values, values_file.as_deref())?;
        let loaded = load_manifest(config)?;
        let app_state = AppState::from_config(&loaded).await?;
        cancel_on_ctrl_c(app_state.shutdown.clone());

        let start = Instant::now();
        let enriched = app_state
            .service
            .enrich_for_connection_with_cancel(connection, action, user_values, &app_state.shutdown)
            .await?;

        let output = if pretty {
            serde_json::to_string_pretty(&enriched)?
        } else {
            serde_json::to_string(&enriched)?
        };
        println!("{}", output);
        eprintln!(
            "{} {}",
            ColoredOutput::success("Enriched"),
            ColoredOutput::dim(&format!("{} in {}ms", action, start.elapsed().as_millis()))
        );
        Ok(())
    }
}
