//! `toggleboard run` — start the API server.
//!
//! Opens the configured store, builds the Axum router around it, and
//! serves until Ctrl+C / SIGTERM. The store handle is created here and
//! dropped when the server stops.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::error::ToggleError;
use crate::logging;
use crate::server::{self, AppState};
use crate::store::memory::MemoryStore;
use crate::store::ToggleStore;

pub async fn execute(args: RunArgs) -> Result<(), ToggleError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let store = open_store(&args).await?;
    let backend = store.name();
    let state = Arc::new(AppState::new(store));

    let router = server::build_router(state, args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, store = backend, "toggleboard started");

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("toggleboard stopped");
    Ok(())
}

async fn open_store(args: &RunArgs) -> Result<Arc<dyn ToggleStore>, ToggleError> {
    #[cfg(feature = "mongodb")]
    if let Some(ref url) = args.mongodb_url {
        let store =
            crate::store::mongodb_store::MongoStore::new(url, &args.mongodb_database).await?;
        tracing::info!(database = %args.mongodb_database, "connected to mongodb");
        return Ok(Arc::new(store));
    }

    #[cfg(not(feature = "mongodb"))]
    let _ = args;

    tracing::warn!("no database configured, feature toggles are kept in memory");
    Ok(Arc::new(MemoryStore::new()))
}
