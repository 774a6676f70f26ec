use anyhow::{Context, Result};
use clap::Subcommand;

use crate::database::manager::DatabaseManager;
use crate::database::repository::tenants;

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "Provision a new tenant and print its API key")]
    Create {
        #[arg(help = "Company name (unique)")]
        company_name: String,
    },

    #[command(about = "List provisioned tenants")]
    List,
}

pub async fn run(cmd: TenantCommands) -> Result<()> {
    let pool = DatabaseManager::pool().await.context("failed to connect to database")?;

    match cmd {
        TenantCommands::Create { company_name } => {
            let tenant = tenants::create(&pool, &company_name)
                .await
                .with_context(|| format!("failed to create tenant '{}'", company_name))?;

            // The API key is shown exactly once, at provisioning time
            println!("{}", serde_json::to_string_pretty(&tenant)?);
        }
        TenantCommands::List => {
            let all = tenants::list(&pool).await.context("failed to list tenants")?;
            // Keys stay out of listings
            let rows: Vec<serde_json::Value> = all
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "company_name": t.company_name,
                        "created_at": t.created_at,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
