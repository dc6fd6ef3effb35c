use actix_cors::Cors;
use actix_web::{web, HttpServer};
use dotenv::dotenv;
use imobiai_server::config::CorsConfig;
use imobiai_server::{build_app, AppError, AppState, Settings};
use std::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        // CORS disabled - use most restrictive settings
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Content-Type"])
            .supports_credentials()
    };

    cors.max_age(config.max_age as usize)
}

#[actix_web::main]
async fn main() -> imobiai_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Settings::new()?;
    info!(environment = %config.environment, "Configuration loaded successfully");

    let state = web::Data::new(AppState::new(config.clone()).await?);

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    info!("Listening on http://{}:{}", config.server.host, config.server.port);

    let app_state = state.clone();
    let cors_config = config.cors.clone();
    HttpServer::new(move || build_app(app_state.clone()).wrap(cors(&cors_config)))
        .listen(listener)?
        .workers(config.server.workers as usize)
        .run()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    state.shutdown().await?;
    info!("Server stopped");

    Ok(())
}
