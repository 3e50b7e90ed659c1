use anyhow::Result;

use super::{Command, CommandContext};
use crate::cli::ConfigCommands;

pub struct ConfigCommand {
    pub command: ConfigCommands,
}

impl Command for ConfigCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            ConfigCommands::Show => {
                println!("# Effective edu-portal configuration");
                print!("{}", ctx.config.to_toml()?);
            }
        }
        Ok(())
    }
}
