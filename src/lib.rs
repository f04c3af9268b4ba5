//! Testing hub server library.
//!
//! Ingests JUnit XML reports and OpenAPI documents, computes quality metrics
//! over the stored runs, and generates RestAssured test scaffolds from
//! recorded endpoints.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod parser;
pub mod services;
