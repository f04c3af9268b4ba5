//! API specification models: an uploaded spec and the endpoints it declares.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// HTTP methods recorded for API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl HttpMethod {
    /// Emission order used when extracting endpoints from a path item.
    pub const ALL: [HttpMethod; 6] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
    ];

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
        }
    }

    /// Parse from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialization format of an uploaded spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// Pick the format from an upload filename: `.yaml`/`.yml` is YAML,
    /// everything else is treated as JSON.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// An uploaded OpenAPI document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiSpec {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub version: String,
    /// Raw document text, kept verbatim.
    pub spec_content: String,
    pub spec_format: SpecFormat,
    pub upload_source_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One (path, method) pair declared by a spec.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiEndpoint {
    pub id: Uuid,
    pub spec_id: Uuid,
    pub method: HttpMethod,
    /// Path template as written in the spec, `{param}` placeholders included.
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ApiEndpoint {
    /// `"METHOD path"` signature used for coverage matching.
    pub fn signature(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_format_from_filename() {
        assert_eq!(SpecFormat::from_filename("petstore.yaml"), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_filename("petstore.YML"), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_filename("petstore.json"), SpecFormat::Json);
        assert_eq!(SpecFormat::from_filename("spec"), SpecFormat::Json);
    }

    #[test]
    fn test_http_method_parse() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::parse("OPTIONS"), None);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
