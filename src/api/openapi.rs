//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Testing Hub Server",
        version = "0.1.0",
        description = "Ingests JUnit reports and OpenAPI specs, computes quality metrics and generates RestAssured test scaffolds"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        api::health::info,
        // JUnit endpoints
        api::junit::upload_junit,
        api::junit::get_suite,
        api::junit::get_suite_cases,
        // OpenAPI spec endpoints
        api::openapi_specs::upload_spec,
        api::openapi_specs::get_spec,
        api::openapi_specs::get_spec_endpoints,
        // Metrics endpoints
        api::metrics::get_summary,
        api::metrics::get_trends,
        api::metrics::get_api_coverage,
        // Generator endpoints
        api::generator::generate_restassured,
        api::generator::preview,
        // Practice endpoints
        api::practices::list_practices,
        api::practices::get_practice,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            api::health::ServerInfoResponse,
            // Test runs
            models::SuiteStatus,
            models::CaseStatus,
            models::TestSuiteRun,
            models::TestCaseRun,
            api::junit::JunitUploadResponse,
            api::junit::SuiteCasesResponse,
            // Specs
            models::HttpMethod,
            models::SpecFormat,
            models::ApiSpec,
            models::ApiEndpoint,
            api::openapi_specs::SpecUploadResponse,
            api::openapi_specs::SpecEndpointsResponse,
            // Metrics
            models::SummaryMetrics,
            models::ApiCoverage,
            models::TrendResponse,
            // Generator
            api::generator::GeneratorRequest,
            api::generator::GeneratorRequestOptions,
            api::generator::PreviewResponse,
            // Practices
            models::Practice,
            api::practices::PracticeListResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "JUnit", description = "JUnit report ingestion"),
        (name = "OpenAPI", description = "OpenAPI spec ingestion"),
        (name = "Metrics", description = "Pass, failure, flaky, coverage and trend metrics"),
        (name = "Generator", description = "RestAssured test scaffold generation"),
        (name = "Practices", description = "Testing practice knowledge base")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/api/v1/junit/upload".to_string()));
        assert!(paths.contains(&"/api/v1/metrics/api-coverage/{spec_id}".to_string()));
        assert!(paths.contains(&"/api/v1/generator/restassured".to_string()));
    }
}
