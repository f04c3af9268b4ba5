//! API endpoint modules.

pub mod generator;
pub mod health;
pub mod junit;
pub mod metrics;
pub mod openapi;
pub mod openapi_specs;
pub mod practices;
pub mod upload;

use actix_web::web;

pub use generator::configure_routes as configure_generator_routes;
pub use health::configure_health_routes;
pub use junit::configure_routes as configure_junit_routes;
pub use metrics::configure_routes as configure_metrics_routes;
pub use openapi::ApiDoc;
pub use openapi_specs::configure_routes as configure_spec_routes;
pub use practices::configure_routes as configure_practice_routes;

/// Register every `/api/v1` route.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_junit_routes)
        .configure(configure_spec_routes)
        .configure(configure_metrics_routes)
        .configure(configure_generator_routes)
        .configure(configure_practice_routes);
}
