use std::path::PathBuf;

#[tokio::main]
async fn main() {
    solace_lib::init_tracing();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(solace_lib::DEFAULT_CONFIG_PATH));

    if let Err(e) = solace_lib::run(config_path).await {
        tracing::error!("Solace exited with error: {}", e);
        std::process::exit(1);
    }
}
