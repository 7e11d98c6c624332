use crate::commands::Commands;
use envdoctor_config::Config;
use envdoctor_core::Result;
use std::sync::Arc;

impl Commands {
    pub async fn execute(self, config: Arc<Config>) -> Result<()> {
        match self {
            Commands::Scan => crate::commands::scan::execute(config).await,
            Commands::Fix { all } => crate::commands::fix::execute(config, all).await,
            Commands::Report => crate::commands::report::execute(config),
            Commands::Reset => crate::commands::reset::execute(config),
            Commands::Doctor => {
                crate::commands::doctor::execute();
                Ok(())
            }
        }
    }
}
