//! Shared helpers for the integration tests.

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use testing_hub_lib::api;
use testing_hub_lib::config::{Config, DatabaseSettings, Environment};
use testing_hub_lib::db::DbPool;
use testing_hub_lib::middleware::RequestLogger;

pub const MULTIPART_BOUNDARY: &str = "----testing-hub-boundary";

/// A migrated database that lives as long as its directory.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

/// Create a fresh, migrated SQLite database.
pub async fn create_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hub.db");
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let pool = DbPool::connect(&url, 1, 1)
        .await
        .expect("Failed to connect to test database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDb { pool, _dir: dir }
}

pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        max_upload_size: 1024 * 1024,
        default_base_url: "http://localhost:8080".to_string(),
    }
}

/// Initialize the full `/api/v1` surface over `pool`.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .service(web::scope("/api/v1").configure(api::configure_api_routes)),
    )
    .await
}

/// Build a multipart body carrying `content` in the `file` field.
///
/// Returns the `Content-Type` header value and the body.
pub fn multipart_file(filename: &str, content: &str) -> (String, Vec<u8>) {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: application/octet-stream\r\n\
         \r\n\
         {c}\r\n\
         --{b}--\r\n",
        b = MULTIPART_BOUNDARY,
        f = filename,
        c = content,
    );
    (
        format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        body.into_bytes(),
    )
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// One suite with a passing, a failing and a skipped case.
pub const MIXED_SUITE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="S" tests="3" failures="1" skipped="1" time="1.5">
  <testcase classname="com.example.UserTest" name="createsUser" time="0.5"/>
  <testcase classname="com.example.UserTest" name="deletesUser" time="0.7">
    <failure message="expected 204">expected 204 but was 500</failure>
  </testcase>
  <testcase classname="com.example.UserTest" name="archivesUser" time="0.3">
    <skipped/>
  </testcase>
</testsuite>"#;

/// Two suites wrapped in `<testsuites>`.
pub const TWO_SUITES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="Alpha" tests="2" failures="0" time="0.2">
    <testcase classname="Alpha" name="first" time="0.1"/>
    <testcase classname="Alpha" name="second" time="0.1"/>
  </testsuite>
  <testsuite name="Beta" tests="1" failures="0" time="0.05">
    <testcase classname="Beta" name="only" time="0.05"/>
  </testsuite>
</testsuites>"#;

/// One path with GET and POST.
pub const USERS_SPEC_YAML: &str = r#"openapi: 3.0.3
info:
  title: Users API
  version: 1.2.0
paths:
  /users:
    get:
      summary: List users
      responses:
        '200':
          description: OK
    post:
      summary: Create a user
      responses:
        '201':
          description: Created
"#;

/// JUnit report whose single case is named after one of the spec endpoints.
pub fn single_case_xml(suite: &str, classname: &str, name: &str, failed: bool) -> String {
    let (failures, body) = if failed {
        ("1", "<failure message=\"boom\">boom</failure>")
    } else {
        ("0", "")
    };
    format!(
        r#"<testsuite name="{suite}" tests="1" failures="{failures}" time="0.1"><testcase classname="{classname}" name="{name}" time="0.1">{body}</testcase></testsuite>"#
    )
}
