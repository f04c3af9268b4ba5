//! SeaORM entity definitions.

pub mod api_endpoint;
pub mod api_spec;
pub mod practice;
pub mod test_case_run;
pub mod test_suite_run;
