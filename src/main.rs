use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use ideahub::api::{HttpIdeaApi, IdeaApi};
use ideahub::auth::session;
use ideahub::config::{AppConfig, session_key};
use ideahub::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let secret_key = session_key(std::env::var("SESSION_KEY").ok());

    let client = HttpIdeaApi::new(&config.api_base_url, config.api_timeout).map_err(|e| {
        log::error!("Cannot build API client for {}: {e}", config.api_base_url);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let api: Arc<dyn IdeaApi> = Arc::new(client);

    log::info!(
        "Starting {} at http://{} (API {})",
        config.app_name,
        config.bind_addr,
        config.api_base_url
    );

    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.cookie_secure;
    let api = web::Data::from(api);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(session::middleware(secret_key.clone(), cookie_secure))
            .wrap(middleware::Logger::default())
            .app_data(api.clone())
            .app_data(config.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
