//! Integration tests against a throwaway SQLite database.
//!
//! Every test gets its own database file in a temporary directory, so the
//! tests run independently and in parallel.

mod api_tests;
mod helpers;
mod ingestion_tests;
mod metrics_tests;
