use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tube_board::config::BoardConfig;
use tube_board::directory::StationDirectory;
use tube_board::poller::Poller;
use tube_board::tfl::{MockTflClient, TflClient, TflConfig, TransitSource};
use tube_board::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default static assets directory, relative to the workspace root.
const DEFAULT_STATIC_DIR: &str = "tube-board/static";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tube_board=info")),
        )
        .init();

    let config = BoardConfig::default();

    // Pick the arrivals source: recorded fixtures or the live API
    let source: Arc<dyn TransitSource> = match std::env::var("TUBE_BOARD_MOCK_DIR") {
        Ok(dir) => {
            let client = MockTflClient::new(&dir).expect("Failed to load mock TfL data");
            info!(
                dir = %dir,
                stops_with_arrivals = client.available_stops().len(),
                "using mock TfL data"
            );
            Arc::new(client)
        }
        Err(_) => {
            let mut tfl_config = TflConfig::new().with_timeout(config.request_timeout_secs);
            match std::env::var("TFL_APP_KEY") {
                Ok(key) => tfl_config = tfl_config.with_app_key(key),
                Err(_) => warn!("TFL_APP_KEY not set, using anonymous rate limits"),
            }
            if let Ok(url) = std::env::var("TFL_BASE_URL") {
                tfl_config = tfl_config.with_base_url(url);
            }
            Arc::new(TflClient::new(tfl_config).expect("Failed to create TfL client"))
        }
    };

    let directory = StationDirectory::load_or_empty(source.as_ref(), &config).await;

    let poller = Poller::new(source, &config);
    let state = AppState::new(directory, poller);

    let static_dir =
        std::env::var("TUBE_BOARD_STATIC").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
    let app = create_router(state, &static_dir);

    let addr: SocketAddr = std::env::var("TUBE_BOARD_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .expect("TUBE_BOARD_ADDR must be a socket address");

    info!("Tube departure board listening on http://{addr}");
    info!("  GET  /              - Board page (?station=<id> to restore a selection)");
    info!("  POST /select        - Change the selected station");
    info!("  GET  /board         - Current board (HTML or JSON)");
    info!("  GET  /api/stations  - Station directory");
    info!("  GET  /health        - Health check");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
