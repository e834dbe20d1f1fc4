mod error;
mod routes;
mod server;

use error::ServerResult;
use server::{ServerOptions, TabSessionServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ServerResult<()> {
    // initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = TabSessionServer::new(ServerOptions {
        host: "127.0.0.1".to_string(),
        ..Default::default()
    });

    server.start().await?;

    Ok(())
}
