//! Domain models for the testing hub.

pub mod api_spec;
pub mod metrics;
pub mod practice;
pub mod test_run;

// Re-export commonly used types
pub use api_spec::{ApiEndpoint, ApiSpec, HttpMethod, SpecFormat};
pub use metrics::{ApiCoverage, SummaryMetrics, TrendMetric, TrendResponse};
pub use practice::Practice;
pub use test_run::{CaseStatus, SuiteStatus, TestCaseRun, TestSuiteRun};
