use log::error;
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    if let Err(e) = tokio::fs::create_dir_all(&config.upload_dir).await {
        error!(
            "Failed to create upload directory {}: {e}",
            config.upload_dir
        );
        std::process::exit(1);
    }

    let app_state = service::AppState::new(config);

    if let Err(e) = web::init_server(app_state).await {
        error!("Failed to start server: {e}");
        std::process::exit(1);
    }
}
