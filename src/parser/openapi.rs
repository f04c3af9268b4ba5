//! OpenAPI 3.x document parser.
//!
//! Only the document title/version and the (path, method, summary,
//! description) tuples are extracted; the rest of the document is parsed for
//! structural validity and then ignored.

use openapiv3::{OpenAPI, Operation, PathItem, ReferenceOr};

use crate::models::HttpMethod;

/// Errors raised while parsing an OpenAPI document.
#[derive(Debug, thiserror::Error)]
pub enum SpecParseError {
    #[error("invalid OpenAPI JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid OpenAPI YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported OpenAPI version '{0}', expected 3.x")]
    UnsupportedVersion(String),
}

/// Title, version and endpoints of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedApi {
    pub title: String,
    pub version: String,
    pub endpoints: Vec<ParsedEndpoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEndpoint {
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// Parse JSON or YAML OpenAPI text.
///
/// Paths keep the document's order; within a path, methods follow
/// [`HttpMethod::ALL`]. OPTIONS/TRACE operations and `$ref` path items are
/// skipped.
pub fn parse(text: &str) -> Result<ParsedApi, SpecParseError> {
    let doc: OpenAPI = if text.trim_start().starts_with('{') {
        serde_json::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    };

    if !doc.openapi.starts_with("3.") {
        return Err(SpecParseError::UnsupportedVersion(doc.openapi));
    }

    let mut endpoints = Vec::new();
    for (path, item) in doc.paths.paths.iter() {
        let ReferenceOr::Item(item) = item else {
            continue;
        };

        for method in HttpMethod::ALL {
            if let Some(op) = operation(item, method) {
                endpoints.push(ParsedEndpoint {
                    method,
                    path: path.clone(),
                    summary: op.summary.clone(),
                    description: op.description.clone(),
                });
            }
        }
    }

    Ok(ParsedApi {
        title: doc.info.title,
        version: doc.info.version,
        endpoints,
    })
}

fn operation(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE_YAML: &str = r#"openapi: 3.0.3
info:
  title: Petstore
  version: 1.2.0
paths:
  /pets:
    post:
      summary: Create a pet
      responses:
        '201':
          description: created
    get:
      summary: List pets
      description: Returns every pet.
      responses:
        '200':
          description: ok
    options:
      responses:
        '204':
          description: preflight
  /pets/{petId}:
    delete:
      responses:
        '204':
          description: deleted
    trace:
      responses:
        '200':
          description: echo
  /legacy:
    $ref: '#/components/pathItems/Legacy'
"#;

    #[test]
    fn test_parse_yaml_orders_methods() {
        let api = parse(PETSTORE_YAML).unwrap();
        assert_eq!(api.title, "Petstore");
        assert_eq!(api.version, "1.2.0");

        let pairs: Vec<_> = api
            .endpoints
            .iter()
            .map(|e| (e.method, e.path.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (HttpMethod::Get, "/pets"),
                (HttpMethod::Post, "/pets"),
                (HttpMethod::Delete, "/pets/{petId}"),
            ]
        );
        assert_eq!(api.endpoints[0].summary.as_deref(), Some("List pets"));
        assert_eq!(
            api.endpoints[0].description.as_deref(),
            Some("Returns every pet.")
        );
        assert_eq!(api.endpoints[2].summary, None);
        // Referenced path items are not resolved.
        assert!(api.endpoints.iter().all(|e| e.path != "/legacy"));
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Users", "version": "v1"},
  "paths": {
    "/users": {
      "get": {"responses": {"200": {"description": "ok"}}},
      "post": {"responses": {"201": {"description": "created"}}}
    }
  }
}"#;

        let api = parse(json).unwrap();
        assert_eq!(api.endpoints.len(), 2);
        assert!(api.endpoints.iter().all(|e| e.path == "/users"));
    }

    #[test]
    fn test_empty_paths_yield_no_endpoints() {
        let api = parse("openapi: 3.0.1\ninfo:\n  title: Empty\n  version: '0'\npaths: {}\n").unwrap();
        assert!(api.endpoints.is_empty());
    }

    #[test]
    fn test_invalid_documents_are_rejected() {
        assert!(matches!(
            parse("{ not json"),
            Err(SpecParseError::Json(_))
        ));
        assert!(matches!(
            parse("just: [a, yaml, list"),
            Err(SpecParseError::Yaml(_))
        ));
        assert!(matches!(
            parse("openapi: 2.0.0\ninfo:\n  title: Old\n  version: '1'\npaths: {}\n"),
            Err(SpecParseError::UnsupportedVersion(_))
        ));
    }
}
