//! Parsers that turn uploaded artifacts into normalized in-memory structures.
//!
//! Both parsers are pure: they never touch storage and either return the full
//! result or an error describing why the document was rejected.

pub mod junit;
pub mod openapi;

pub use junit::{JunitParseError, ParsedCase, ParsedSuite};
pub use openapi::{ParsedApi, ParsedEndpoint, SpecParseError};
