//! HTTP surface tests.

use std::io::{Cursor, Read};

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use testing_hub_lib::services::{ensure_seeded, generator};

use super::helpers::*;

#[actix_rt::test]
async fn test_health_and_ready() {
    let db = create_test_db().await;
    let app = create_test_app(&db.pool).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "connected");

    let req = test::TestRequest::get().uri("/api/v1/info").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["application"], "testing-hub-server");
}

#[actix_rt::test]
async fn test_junit_upload_then_fetch_suite_and_cases() {
    let db = create_test_db().await;
    let app = create_test_app(&db.pool).await;

    let (content_type, payload) = multipart_file("report.xml", MIXED_SUITE_XML);
    let req = test::TestRequest::post()
        .uri("/api/v1/junit/upload")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["suites"], 1);
    let suite_id = body["suite_ids"][0].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/junit/{}", suite_id))
        .to_request();
    let suite: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(suite["suite_name"], "S");
    assert_eq!(suite["status"], "failed");
    assert_eq!(suite["duration_ms"], 1500);
    assert_eq!(suite["upload_source_id"], body["upload_source_id"]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/junit/{}/cases", suite_id))
        .to_request();
    let cases: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cases["total"], 3);
    assert_eq!(cases["cases"][2]["status"], "skipped");
}

#[actix_rt::test]
async fn test_malformed_junit_upload_is_bad_request() {
    let db = create_test_db().await;
    let app = create_test_app(&db.pool).await;

    let (content_type, payload) = multipart_file("report.xml", "<testsuite tests=\"1\">");
    let req = test::TestRequest::post()
        .uri("/api/v1/junit/upload")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PARSE_ERROR");
}

#[actix_rt::test]
async fn test_unknown_suite_and_spec_are_not_found() {
    let db = create_test_db().await;
    let app = create_test_app(&db.pool).await;
    let missing = uuid::Uuid::now_v7();

    for uri in [
        format!("/api/v1/junit/{}", missing),
        format!("/api/v1/openapi/{}", missing),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/generator/preview")
        .set_json(json!({ "openapi_spec_id": missing }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_spec_upload_preview_and_download() {
    let db = create_test_db().await;
    let app = create_test_app(&db.pool).await;

    let (content_type, payload) = multipart_file("users.yaml", USERS_SPEC_YAML);
    let req = test::TestRequest::post()
        .uri("/api/v1/openapi/upload")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["endpoints"], 2);
    let spec_id = body["spec_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/openapi/{}/endpoints", spec_id))
        .to_request();
    let endpoints: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(endpoints["endpoints"][0]["method"], "GET");
    assert_eq!(endpoints["endpoints"][1]["method"], "POST");

    let req = test::TestRequest::post()
        .uri("/api/v1/generator/preview")
        .set_json(json!({ "openapi_spec_id": spec_id }))
        .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    let code = preview["code"].as_str().unwrap();
    assert!(code.contains("public void testGetusers()"));
    assert!(code.contains("public void testPostusers()"));
    assert!(code.contains("http://localhost:8080"));
    assert_eq!(preview["lines"], code.lines().count());

    let req = test::TestRequest::post()
        .uri("/api/v1/generator/restassured")
        .set_json(json!({
            "openapi_spec_id": spec_id,
            "base_url": "https://staging.example.com",
            "options": { "include_negative_tests": false }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    let bytes = test::read_body(resp).await;

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut source = String::new();
    archive
        .by_name(generator::TEST_SOURCE_PATH)
        .unwrap()
        .read_to_string(&mut source)
        .unwrap();
    assert!(source.contains("https://staging.example.com"));
    assert!(!source.contains("InvalidData"));
}

#[actix_rt::test]
async fn test_practices_listing_filters_and_lookup() {
    let db = create_test_db().await;
    assert_eq!(ensure_seeded(&db.pool).await.unwrap(), 4);
    assert_eq!(ensure_seeded(&db.pool).await.unwrap(), 0);
    let app = create_test_app(&db.pool).await;

    let req = test::TestRequest::get().uri("/api/v1/practices").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all["total"], 4);

    let req = test::TestRequest::get()
        .uri("/api/v1/practices?tag=flaky")
        .to_request();
    let tagged: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tagged["total"], 1);
    assert_eq!(tagged["practices"][0]["slug"], "flaky-tests-playbook");

    let req = test::TestRequest::get()
        .uri("/api/v1/practices/contract-testing")
        .to_request();
    let article: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(article["title"], "Contract Testing for APIs");

    let req = test::TestRequest::get()
        .uri("/api/v1/practices/no-such-article")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
