use std::{
    process::ExitCode,
    sync::Arc,
};

use tracing::{
    error,
    info,
    warn,
};
use tracing_subscriber::EnvFilter;

pub mod collector;
pub mod config;
pub mod currency;
pub mod error;
pub mod extractor;
pub mod period;
pub mod rate_point;
pub mod retry;
pub mod shared_state;
pub mod storage;
pub mod transport;

use collector::Collector;
use config::{
    CollectorConfig,
    StorageKind,
};
use shared_state::SharedState;
use storage::{
    json_files::JsonFiles,
    stdout::Stdout,
    SeriesStore,
};
use transport::ReqwestTransport;



fn tracing_init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}



#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional, defaults cover a complete run.
    let dotenv_result = dotenv::from_path(".env");

    tracing_init();

    match dotenv_result {
        Ok(()) => info!("loaded configuration from .env"),
        Err(e) if e.not_found() => {},
        Err(e) => warn!("could not load .env, using environment only: {}", e),
    }

    let config = match CollectorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return ExitCode::FAILURE
        }
    };

    info!(
        url = %config.url,
        currencies = config.currencies.len(),
        periods = config.periods.len(),
        "starting collection"
    );

    let store: Box<dyn SeriesStore> = match config.storage {
        StorageKind::JsonFiles => Box::new(JsonFiles::new(config.results_dir.clone())),
        StorageKind::Stdout => Box::new(Stdout::new()),
    };

    let state = Arc::new(SharedState::default());

    let state_signal = state.clone();
    tokio::spawn(async move {
        if let Ok(..) = tokio::signal::ctrl_c().await {
            warn!("interrupt received, finishing current series");
            state_signal.request_shutdown();
        }
    });

    let collector = Collector::new(config, ReqwestTransport::new(), store);
    let summary = collector.run(&state).await;

    if summary.interrupted {
        return ExitCode::from(130)
    }

    ExitCode::SUCCESS
}
