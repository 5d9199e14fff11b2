use piter::config::Config;
use piter::server::{build_app, serve};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "piter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Starting P.I.T.E.R on {} (backend at {})",
        config.address(),
        config.backend_url
    );

    let host = config.host.clone();
    let port = config.port;

    let (_state, app) = build_app(config).expect("Failed to build application");

    let (actual_port, handle) = serve(app, &host, port).await.expect("Failed to bind address");
    tracing::info!("Listening on http://{}:{}", host, actual_port);

    handle.await.expect("Server task failed");
}
