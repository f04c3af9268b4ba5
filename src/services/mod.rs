//! Business logic services.

pub mod generator;
pub mod junit_ingestion;
pub mod metrics;
pub mod openapi_ingestion;
pub mod practices;

pub use generator::{GeneratedArtifact, GeneratorOptions};
pub use junit_ingestion::{ingest_junit_report, ingest_junit_report_at, IngestedReport};
pub use openapi_ingestion::{ingest_openapi_spec, ingest_openapi_spec_at, IngestedSpec};
pub use practices::ensure_seeded;
