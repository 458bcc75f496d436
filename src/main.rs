use domain::gateway::oauth::registry_from_config;
use log::*;
use service::{config::Config, logging::Logger};
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
        std::process::exit(1);
    }

    info!("Starting OAuth login gateway...");

    let registry = match registry_from_config(&config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to configure identity providers: {e:?}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, registry);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped with error: {e}");
        std::process::exit(1);
    }
}
