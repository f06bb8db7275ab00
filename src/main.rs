use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::from_fn, web, App, HttpServer};
use tracing::info;

use leadgate::api::middleware::AuthMiddleware;
use leadgate::api::services::{
    admin_v1_routes, health_routes, leads_routes, tracking_routes, AppStartTime,
};
use leadgate::config::{get_config, init_config, CorsConfig};
use leadgate::repository::{LeadRepository, RepositoryFactory};
use leadgate::services::{CapiForwarder, LeadService};

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    let repository = RepositoryFactory::create(&config.database)
        .await
        .expect("Failed to create repository");
    info!("Using storage backend: {}", repository.backend_name());

    let forwarder = Arc::new(CapiForwarder::new(config.tracking.clone()));
    if forwarder.is_enabled() {
        info!("Conversion forwarding enabled (CAPI)");
    } else {
        info!("Conversion forwarding disabled (tracking credentials not set)");
    }

    let lead_service = Arc::new(LeadService::new(
        repository.clone(),
        forwarder.clone(),
        config.tracking.clone(),
    ));

    let admin_prefix = config.admin.route_prefix.clone();
    if config.admin.token.is_empty() {
        info!("Admin API is disabled (admin token not set)");
    } else {
        info!("Admin API available at: {}", admin_prefix);
    }

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let workers = config.server.cpu_count;
    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(lead_service.clone()))
            .app_data(web::Data::new(forwarder.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(
                web::scope("/api")
                    .wrap(build_cors(&cors_config))
                    .service(leads_routes())
                    .service(tracking_routes()),
            )
            .service(
                web::scope(&admin_prefix)
                    .wrap(from_fn(AuthMiddleware::admin_auth))
                    .service(admin_v1_routes()),
            )
            .service(health_routes())
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
