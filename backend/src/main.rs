mod captioner;
mod config;
mod error;
mod routes;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use captioner::{GeminiCaptioner, DEFAULT_GEMINI_ENDPOINT};
use config::AppConfig;
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    let api_key = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
    let endpoint =
        env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_ENDPOINT.to_string());
    let gemini = GeminiCaptioner::new(endpoint, api_key);

    let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    let bind_addr = config.bind_addr.clone();
    log::info!("Starting caption server on {}", bind_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.allowed_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(gemini.clone()))
            .configure(|cfg| configure_routes::<GeminiCaptioner>(cfg, frontend_dir.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
