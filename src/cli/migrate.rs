//! Migrate command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::repositories::Container;

use super::App;

impl App {
    /// Builds the container, which applies pending migrations on the way.
    pub async fn run_migrate(&self, config: &Config) -> Result<()> {
        let store = super::connect(config).await?;

        let container = Container::build_with(store, config.lock.clone())
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Migration failed: {}", e))?;

        let version = container.config.load().await?.migration;
        tracing::info!("Store is at migration v{}", version);
        Ok(())
    }
}
