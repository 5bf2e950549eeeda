//! Status command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::migrations::create_register;
use crate::repositories::{ConfigRepository, Lock};

use super::App;

impl App {
    /// Prints the applied migration version and what is still pending.
    ///
    /// Read-only: nothing is migrated.
    pub async fn run_status(&self, config: &Config) -> Result<()> {
        let store = super::connect(config).await?;
        let lock = Lock::new(store.clone(), config.lock.clone()).await?;
        let current = ConfigRepository::new(store, lock).load().await?.migration;

        let register = create_register();
        let pending: Vec<_> = register.pending(current).collect();

        println!("applied: v{}", current);
        println!("latest:  v{}", register.latest_version());
        if pending.is_empty() {
            println!("up to date");
        } else {
            for migration in pending {
                println!(
                    "pending: v{} {} - {}",
                    migration.version(),
                    migration.id(),
                    migration.description()
                );
            }
        }
        Ok(())
    }
}
