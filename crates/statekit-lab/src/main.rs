use anyhow::Result;
use statekit_config::AppConfig;
use statekit_fetch::ReqwestTransport;
use statekit_storage::FileStorage;
use std::sync::Arc;

mod exercises;
mod logger;
mod middleware;
mod slices;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting statekit-lab");

    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {:?}", path),
        Err(e) => log::debug!("No .env file loaded: {}", e),
    }

    let config = AppConfig::load();
    let transport = Arc::new(ReqwestTransport::new(config.request_timeout())?);
    let storage_dir = config.resolve_storage_dir()?;
    log::info!("Persisting slices to {:?}", storage_dir);
    let storage = Arc::new(FileStorage::new(storage_dir));

    let lab = store::configure_store(&config, transport, storage)?;
    let subscription = lab
        .store
        .subscribe(|state| println!("  {}", exercises::summary(state)));

    exercises::run_all(&lab).await?;
    println!("Decrement alerts raised: {}", lab.decrement_alert.alerts());

    subscription.unsubscribe();
    lab.store.dispose();

    log::info!("Exiting statekit-lab");
    println!("Log written to {}", log_file.display());
    Ok(())
}
