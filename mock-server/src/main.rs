use mock_server::{Account, Fixture, DEFAULT_PASSWORD, DEFAULT_USER};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let account = Account {
        user: std::env::var("TESTRAIL_USER").unwrap_or_else(|_| DEFAULT_USER.to_string()),
        password: std::env::var("TESTRAIL_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string()),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, user = %account.user, "mock TestRail listening");
    mock_server::run_with(listener, account, Fixture::default()).await
}
