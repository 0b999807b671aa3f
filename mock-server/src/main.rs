use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let defaults = MockConfig::default();
    let config = MockConfig {
        token: std::env::var("MEGAPHONE_TOKEN").unwrap_or(defaults.token),
        network_id: std::env::var("MEGAPHONE_NETWORK_ID").unwrap_or(defaults.network_id),
        organization_id: std::env::var("MEGAPHONE_ORGANIZATION_ID")
            .unwrap_or(defaults.organization_id),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, network_id = %config.network_id, "mock megaphone api listening under /api");
    mock_server::run(listener, config).await
}
