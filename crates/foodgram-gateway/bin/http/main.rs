mod cli;

use crate::cli::{LogFormatArg, StorageBackendArg, CLI};
use clap::Parser;
use foodgram_core::{CodeRegistry, RecipeCatalog};
use foodgram_gateway::telemetry::{init_tracing, shutdown_signal};
use foodgram_gateway::{App, AppState};
use foodgram_generator::{GeneratorSettings, ShortCodeGenerator};
use foodgram_shortlink::ShortLinkService;
use foodgram_storage::{InMemoryCatalog, InMemoryRegistry, MySqlCatalog, MySqlRegistry};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::try_parse()?;

    init_tracing(config.log_format == LogFormatArg::Json)?;

    let generator = ShortCodeGenerator::new(
        GeneratorSettings::builder()
            .salt(config.short_code_salt.clone())
            .min_length(config.short_code_min_length)
            .build(),
    )?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        min_length = config.short_code_min_length,
        "starting foodgram gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            let catalog = match &config.recipes_file {
                Some(path) => {
                    let catalog = InMemoryCatalog::from_json_file(path)?;
                    info!(recipes = catalog.len(), path = %path.display(), "recipes loaded");
                    catalog
                }
                None => {
                    warn!("no recipes file given, serving an empty catalog");
                    InMemoryCatalog::new()
                }
            };
            run_server(&config, InMemoryRegistry::new(), catalog, generator).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let registry = MySqlRegistry::connect(mysql_dsn).await?;
            registry.migrate().await?;
            info!("migrations completed");

            let catalog = MySqlCatalog::new(registry.pool().clone());
            run_server(&config, registry, catalog, generator).await?;
        }
    }

    Ok(())
}

async fn run_server<R: CodeRegistry, C: RecipeCatalog>(
    config: &CLI,
    registry: R,
    catalog: C,
    generator: ShortCodeGenerator,
) -> std::io::Result<()> {
    let catalog = Arc::new(catalog);
    let links = ShortLinkService::from_shared(Arc::new(registry), catalog.clone(), generator);
    let state = AppState::new(Arc::new(links), catalog, config.base_url.clone());

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("gateway shutdown complete");

    Ok(())
}
