use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use testing_hub_lib::api;
use testing_hub_lib::config::Config;
use testing_hub_lib::db::DbPool;
use testing_hub_lib::middleware;
use testing_hub_lib::services;

async fn health_check() -> bool {
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Container health probe: only validates configuration
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check().await {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Testing Hub Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = DbPool::new(&config)
        .await
        .expect("Failed to initialize database");
    info!("Database connection established");

    pool.run_migrations()
        .await
        .expect("Failed to run migrations");

    match services::ensure_seeded(&pool).await {
        Ok(0) => info!("Practice articles already present"),
        Ok(count) => info!("Seeded {} practice articles", count),
        Err(e) => error!("Failed to seed practice articles: {}", e),
    }

    let bind_address = config.bind_address();
    let is_development = config.is_development();
    let max_upload_size = config.max_upload_size;
    info!(
        "Upload limit: {}KB per artifact, generator default base URL: {}",
        max_upload_size / 1024,
        config.default_base_url
    );

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Starting server at http://{} ({} workers)", bind_address, cpus);
        cpus
    };
    info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let openapi = api::ApiDoc::openapi();
    let config = web::Data::new(config);

    let server = HttpServer::new(move || {
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .expose_headers(vec![header::CONTENT_DISPOSITION])
                .max_age(3600)
        } else {
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .wrap(middleware::RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            // Multipart framing adds overhead on top of the artifact itself
            .app_data(web::PayloadConfig::new(max_upload_size * 2))
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .service(web::scope("/api/v1").configure(api::configure_api_routes))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
