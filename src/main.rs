use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use pets_hub::{
    api::state::AppState,
    domain::{ai::{photo::MAX_UPLOAD_BYTES, service::AiDispatcher}, user::seed::ensure_admin},
    infrastructure::{
        database::mongo_context::MongoContext,
        gemini::gemini_client::GeminiClient,
        mongo::{
            booking_repository::MongoBookingRepository, message_repository::MongoMessageRepository,
            pet_repository::MongoPetRepository, user_repository::MongoUserRepository,
        },
    },
    routes::{private_routes, public_routes},
    utils::config::AppConfig,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mongo_context = match MongoContext::init(
        &config.mongo_uri(),
        config.mongo_credentials(),
        &config.database_name,
    ).await {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let gemini = match GeminiClient::new(&config.gemini_base_url) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build Gemini client: {}", e);
            std::process::exit(1);
        }
    };

    let ai = AiDispatcher::new(Arc::new(gemini), config.gemini_keys.clone(), config.gemini_models.clone());

    if ai.has_keys() {
        log::info!("{} Gemini key(s), models: {}", config.gemini_keys.len(), ai.models().join(", "));
    } else {
        log::warn!("No GEMINI_CHAVE_* configured, AI endpoints will answer with a key error");
    }

    let app_state = AppState {
        users: Arc::new(MongoUserRepository::new(&mongo_context)),
        pets: Arc::new(MongoPetRepository::new(&mongo_context)),
        messages: Arc::new(MongoMessageRepository::new(&mongo_context)),
        bookings: Arc::new(MongoBookingRepository::new(&mongo_context)),
        ai: Arc::new(ai),
        secret_key: Arc::new(config.secret_key.clone()),
    };

    if let (Some(handle), Some(password)) = (&config.admin_user, &config.admin_pass) {
        match ensure_admin(app_state.users.as_ref(), handle, password).await {
            Ok(true) => log::info!("Created admin account '{}'", handle),
            Ok(false) => log::debug!("Admin account '{}' already exists", handle),
            Err(e) => log::error!("Failed to seed admin account: {}", e),
        }
    }

    log::info!("Server running at http://{}", config.bind_address);

    HttpServer::new(move || {
        let secret_key = app_state.secret_key.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .configure(public_routes)
            .configure(move |cfg| private_routes(cfg, secret_key))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
