use household_inventory::{config::EnvConfig, policy, AppError, PostgresService};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init();
    let config = EnvConfig::from_env()?;
    let policy = policy::from_config(&config)?;

    info!(policy = ?config.access_policy, "Provisioning household_inventory...");
    let service = PostgresService::new(&config.db_url, policy).await?;
    service.ping().await?;
    info!("household_inventory is ready.");

    Ok(())
}
