use sea_orm::DatabaseConnection;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::net::SocketAddr;
use tracing::{error, info};
use tracking_api::{config::app_config, database, server};

#[tokio::main]
pub async fn main() {
    let cfg = app_config();

    shared::tracer::init("tracking_api", cfg.is_development).expect("failed to init tracer");

    let db = database::db::connect(&cfg.db_url).await;

    if cfg.run_migrations {
        database::db::run_migrations(&db).await;
    }

    listen_to_shutdown_signals(!cfg.is_development, db.clone());

    let addr = SocketAddr::new(cfg.http_host, cfg.http_port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|_| panic!("[WEB] failed to get address {}", addr));

    info!("[WEB] listening on {}", addr);

    axum::serve(listener, server::controller::new(db, cfg))
        .await
        .unwrap_or_else(|_| panic!("[WEB] failed to serve app on address {}", addr));
}

/// Listen to shutdown signals `SIGINT` and `SIGTERM`, on a signal gracefully shutdowns down the application
#[allow(clippy::never_loop)]
fn listen_to_shutdown_signals(gracefully_shutdown: bool, db: DatabaseConnection) {
    let mut signals = Signals::new([SIGINT, SIGTERM]).expect("failed to setup signals hook");
    let runtime = tokio::runtime::Handle::current();

    // waiting on signals blocks the thread, so keep it off the async workers
    tokio::task::spawn_blocking(move || {
        for sig in signals.forever() {
            if gracefully_shutdown {
                info!("[APP] received signal: {}, shutting down", sig);

                info!("[APP] closing database connections");
                if let Err(e) = runtime.block_on(db.close()) {
                    error!("[DB] failed to close db connection: {e}")
                }
            }

            std::process::exit(sig)
        }
    });
}
