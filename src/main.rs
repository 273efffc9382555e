use clap::Parser;

use ucast::catt::client::CattClient;
use ucast::http::state::AppState;
use ucast::media::store::MediaStore;
use ucast::{cli, config, http};

/// Wait for the first Ctrl+C (graceful shutdown), then arm a second listener
/// that force-exits if Ctrl+C arrives again while requests drain.
async fn wait_for_shutdown() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Shutting down — draining in-flight requests...");
    tokio::spawn(async {
        let _ = tokio::signal::ctrl_c().await;
        eprintln!("\nucast: forced exit");
        std::process::exit(1);
    });
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref()).and_then(|path| {
        match config::load_config(&path) {
            Ok(cfg) => {
                tracing::debug!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    });

    let config = config::Config::resolve(file_config, &args);

    if let Err(e) = std::fs::create_dir_all(&config.media_dir) {
        eprintln!(
            "error: cannot create media directory {}: {}",
            config.media_dir.display(),
            e
        );
        std::process::exit(1);
    }

    let state = AppState {
        client: CattClient::new(config.catt.clone()),
        store: MediaStore::new(config.media_dir.clone()),
        ffmpeg: config.ffmpeg.clone(),
    };
    let app = http::build_router(state);

    let bind_addr = if config.localhost {
        format!("127.0.0.1:{}", config.port)
    } else {
        format!("0.0.0.0:{}", config.port)
    };
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "ucast listening on http://{} (media dir: {}, catt: {})",
        bind_addr,
        config.media_dir.display(),
        config.catt.display()
    );

    // Wait for the first Ctrl+C; in-flight requests drain, then the
    // listener closes. Detached cast processes keep running on their own.
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Goodbye.");
}
