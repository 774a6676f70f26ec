pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fitcoach")]
#[command(about = "FitCoach CLI - tenant provisioning and database bootstrap")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Tenant management and API key issuance")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::tenant::TenantCommands,
    },

    #[command(about = "Apply pending database migrations")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Tenant { cmd } => commands::tenant::run(cmd).await,
        Commands::Migrate => commands::migrate::run().await,
    }
}
