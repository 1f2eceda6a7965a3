use dotenvy::dotenv;
use tracing::{error, info};

use lingo_connect::config::AppConfig;
use lingo_connect::database::{pool, schema};
use lingo_connect::services::friend_graph_service;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("friend graph repair: {}", e);
            std::process::exit(1);
        }
    };
    let pool = match pool::connect_pool(&config.database_url, 1).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("friend graph repair: could not connect to the database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = schema::ensure_schema(&pool).await {
        error!("friend graph repair: could not create the schema: {}", e);
        std::process::exit(1);
    }

    match friend_graph_service::repair_friend_graph(&pool).await {
        Ok(report) => {
            info!(
                "friend graph repair: accepted={}, edges_added={}",
                report.accepted, report.edges_added
            );
        }
        Err(e) => {
            error!("friend graph repair failed: {}", e);
            std::process::exit(1);
        }
    }
}
