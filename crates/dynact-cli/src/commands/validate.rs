//! Manifest validation command

use super::load_manifest;
use crate::error::CliResult;
use crate::utils::ColoredOutput;
use dynact_store::{MemoryConnectionStore, MemoryConnectorStore, MemorySchemaCatalog};
use std::path::Path;

pub struct ValidateCommand;

impl ValidateCommand {
    pub async fn run(config: &Path) -> CliResult<()> {
        let loaded = load_manifest(config)?;

        // Loading into throwaway stores also reads every schema file
        loaded
            .populate(&MemoryConnectorStore::new(), &MemoryConnectionStore::new(), &MemorySchemaCatalog::new())
            .await?;

        for connector in &loaded.connectors {
            println!("{} {}", ColoredOutput::highlight(&connector.id), connector.name);
            for action in &connector.actions {
                let required = action.definition.unresolved_required(|_| false).len();
                println!(
                    "  {} {} ({} steps, {} required properties)",
                    action.id(),
                    ColoredOutput::dim(&action.name),
                    action.definition.steps().len(),
                    required
                );
            }
        }

        match loaded.verifier_settings() {
            Ok(settings) => println!("verifier: {}", settings.url),
            Err(e) => println!("{} {}", ColoredOutput::warning("verifier:"), e),
        }

        println!(
            "{} {} connectors, {} actions, {} connections, {} schemas",
            ColoredOutput::success("Valid:"),
            loaded.connectors.len(),
            loaded.action_count(),
            loaded.connections.len(),
            loaded.schemas.len()
        );
        Ok(())
    }
}
