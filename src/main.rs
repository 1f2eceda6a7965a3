use dotenvy::dotenv;
use tracing::{error, info, warn};

use lingo_connect::config::AppConfig;
use lingo_connect::database::{pool, schema};
use lingo_connect::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Logging (RUST_LOG)
    tracing_subscriber::fmt::init();

    // 2. Config + database
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Connecting to database: {}", config.database_url);

    let pool = pool::connect_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("could not connect to the database");
    schema::ensure_schema(&pool)
        .await
        .expect("could not create the schema");

    // 3. Routes
    let app = web::build_router(pool);

    // 4. Serve, falling back to PORT+1 when the port is taken
    let addr = config.listen_addr().expect("could not parse HOST/PORT");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = config
                .fallback_addr()
                .expect("could not parse fallback address");
            warn!("could not bind {}: {}. Trying fallback {}", addr, e, fallback);
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("could not bind the fallback port")
        }
    };

    let bound_addr = listener
        .local_addr()
        .expect("listener has no local address");
    info!("Server running on http://{}", bound_addr);

    axum::serve(listener, app).await.expect("server error");
}
