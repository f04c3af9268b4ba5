//! RestAssured test scaffold generator.
//!
//! Renders a JUnit 5 test class plus Gradle build files and a README from a
//! list of recorded endpoints. Every render is a pure function of its inputs,
//! and the ZIP packaging uses a fixed entry timestamp, so identical inputs
//! always produce identical bytes.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult};
use crate::models::{ApiEndpoint, HttpMethod};

pub const TEST_SOURCE_PATH: &str = "src/test/java/com/example/generated/GeneratedApiTests.java";
pub const BUILD_DESCRIPTOR_PATH: &str = "build.gradle";
pub const SETTINGS_PATH: &str = "settings.gradle";
pub const README_PATH: &str = "README.md";

/// File name offered for the downloaded archive.
pub const ARCHIVE_NAME: &str = "rest-api-tests.zip";

const SETTINGS_CONTENT: &str = "rootProject.name = \"generated-api-tests\"\n";

const BUILD_DESCRIPTOR: &str = r#"plugins {
    id 'java'
}

group = 'com.example'
version = '1.0.0'
sourceCompatibility = '21'

repositories {
    mavenCentral()
}

dependencies {
    testImplementation 'io.rest-assured:rest-assured:5.4.0'
    testImplementation 'org.junit.jupiter:junit-jupiter:5.10.2'
    testImplementation 'com.fasterxml.jackson.core:jackson-databind:2.17.0'
    testRuntimeOnly 'org.junit.platform:junit-platform-launcher'
}

test {
    useJUnitPlatform()
}
"#;

/// Generation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Emit an extra empty-body test for POST and PUT endpoints.
    pub include_negative_tests: bool,
    /// Reserved; accepted but does not change the output yet.
    pub include_contract_validation: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            include_negative_tests: true,
            include_contract_validation: false,
        }
    }
}

/// The three rendered texts of a scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub test_source: String,
    pub build_descriptor: String,
    pub readme: String,
}

/// Render the full scaffold for `endpoints` against `base_url`.
pub fn generate_test_artifact(
    base_url: &str,
    endpoints: &[ApiEndpoint],
    options: GeneratorOptions,
) -> GeneratedArtifact {
    GeneratedArtifact {
        test_source: render_test_source(base_url, endpoints, options),
        build_descriptor: render_build_descriptor(),
        readme: render_readme(base_url),
    }
}

/// Render the JUnit test class, one test per endpoint in input order.
pub fn render_test_source(
    base_url: &str,
    endpoints: &[ApiEndpoint],
    options: GeneratorOptions,
) -> String {
    let mut out = String::new();

    out.push_str("package com.example.generated;\n\n");
    out.push_str("import io.restassured.RestAssured;\n");
    out.push_str("import io.restassured.response.Response;\n");
    out.push_str("import org.junit.jupiter.api.BeforeAll;\n");
    out.push_str("import org.junit.jupiter.api.Test;\n");
    out.push_str("import com.fasterxml.jackson.databind.JsonNode;\n");
    out.push_str("import com.fasterxml.jackson.databind.ObjectMapper;\n\n");
    out.push_str("import static io.restassured.RestAssured.*;\n");
    out.push_str("import static org.hamcrest.Matchers.*;\n\n");
    out.push_str("public class GeneratedApiTests {\n\n");
    out.push_str(&format!(
        "    private static final String BASE_URL = \"{}\";\n",
        java_escape(base_url)
    ));
    out.push_str("    private static ObjectMapper objectMapper;\n\n");
    out.push_str("    @BeforeAll\n");
    out.push_str("    public static void setup() {\n");
    out.push_str("        RestAssured.baseURI = BASE_URL;\n");
    out.push_str("        objectMapper = new ObjectMapper();\n");
    out.push_str("    }\n\n");

    for endpoint in endpoints {
        render_endpoint_tests(&mut out, endpoint, options);
    }

    out.push_str("}\n");
    out
}

fn render_endpoint_tests(out: &mut String, endpoint: &ApiEndpoint, options: GeneratorOptions) {
    let name = test_name(endpoint.method, &endpoint.path);
    let path = java_escape(&endpoint.path);
    let comment = match &endpoint.summary {
        Some(summary) => single_line(summary),
        None => format!("Test for {} {}", endpoint.method, single_line(&endpoint.path)),
    };

    out.push_str("    @Test\n");
    out.push_str(&format!("    public void {}() {{\n", name));
    out.push_str(&format!("        // {}\n", comment));

    match endpoint.method {
        HttpMethod::Get => {
            out.push_str("        given()\n");
            out.push_str("            .when()\n");
            out.push_str(&format!("            .get(\"{}\")\n", path));
            out.push_str("            .then()\n");
            out.push_str("            .statusCode(anyOf(is(200), is(404)));\n");
        }
        HttpMethod::Post => {
            out.push_str("        String requestBody = \"{\\\"example\\\": \\\"value\\\"}\";\n");
            out.push_str("        given()\n");
            out.push_str("            .contentType(\"application/json\")\n");
            out.push_str("            .body(requestBody)\n");
            out.push_str("            .when()\n");
            out.push_str(&format!("            .post(\"{}\")\n", path));
            out.push_str("            .then()\n");
            out.push_str("            .statusCode(anyOf(is(201), is(400)));\n");
        }
        HttpMethod::Put => {
            out.push_str("        String requestBody = \"{\\\"example\\\": \\\"updated\\\"}\";\n");
            out.push_str("        given()\n");
            out.push_str("            .contentType(\"application/json\")\n");
            out.push_str("            .body(requestBody)\n");
            out.push_str("            .when()\n");
            out.push_str(&format!("            .put(\"{}\")\n", path));
            out.push_str("            .then()\n");
            out.push_str("            .statusCode(anyOf(is(200), is(404)));\n");
        }
        HttpMethod::Delete => {
            out.push_str("        given()\n");
            out.push_str("            .when()\n");
            out.push_str(&format!("            .delete(\"{}\")\n", path));
            out.push_str("            .then()\n");
            out.push_str("            .statusCode(anyOf(is(204), is(404)));\n");
        }
        HttpMethod::Patch | HttpMethod::Head => {
            out.push_str(&format!("        // Unsupported method: {}\n", endpoint.method));
        }
    }

    out.push_str("    }\n\n");

    let has_body = matches!(endpoint.method, HttpMethod::Post | HttpMethod::Put);
    if options.include_negative_tests && has_body {
        out.push_str("    @Test\n");
        out.push_str(&format!("    public void {}WithInvalidData() {{\n", name));
        out.push_str("        String invalidBody = \"{}\";\n");
        out.push_str("        given()\n");
        out.push_str("            .contentType(\"application/json\")\n");
        out.push_str("            .body(invalidBody)\n");
        out.push_str("            .when()\n");
        out.push_str(&format!(
            "            .{}(\"{}\")\n",
            endpoint.method.as_str().to_ascii_lowercase(),
            path
        ));
        out.push_str("            .then()\n");
        out.push_str("            .statusCode(is(400));\n");
        out.push_str("    }\n\n");
    }
}

/// `test` + capitalized method + the path with every non-alphanumeric
/// character removed. `/users/{id}` and `/users/id` map to the same name.
pub fn test_name(method: HttpMethod, path: &str) -> String {
    let method = method.as_str().to_ascii_lowercase();
    let mut name = String::from("test");
    let mut chars = method.chars();
    if let Some(first) = chars.next() {
        name.push(first.to_ascii_uppercase());
        name.extend(chars);
    }
    name.extend(path.chars().filter(char::is_ascii_alphanumeric));
    name
}

/// Gradle build file. Identical on every call.
pub fn render_build_descriptor() -> String {
    BUILD_DESCRIPTOR.to_string()
}

/// README for the scaffold; only the base URL varies.
pub fn render_readme(base_url: &str) -> String {
    format!(
        "# Generated REST API Tests\n\n\
         This is an auto-generated REST API test suite using RestAssured and JUnit 5.\n\n\
         ## Running Tests\n\n\
         ```bash\n\
         gradle test\n\
         ```\n\n\
         ## Configuration\n\n\
         Set environment variables for authentication (if needed):\n\n\
         ```bash\n\
         export API_BASE_URL={base_url}\n\
         export API_TOKEN=your-token-here\n\
         ```\n\n\
         ## Customization\n\n\
         1. Edit `{TEST_SOURCE_PATH}`\n\
         2. Add authentication headers if needed\n\
         3. Add request/response validations\n\
         4. Add more test scenarios\n\n\
         ## Test Organization\n\n\
         - Happy path tests for each endpoint\n\
         - Negative tests for POST/PUT operations\n\
         - Schema validation (if enabled)\n\n\
         ## Notes\n\n\
         - This is a baseline test suite\n\
         - Add your own assertions and validations\n\
         - Mock external dependencies as needed\n"
    )
}

/// Pack the scaffold into a Gradle project ZIP.
pub fn package_zip(artifact: &GeneratedArtifact) -> AppResult<Vec<u8>> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let entries = [
        (TEST_SOURCE_PATH, artifact.test_source.as_str()),
        (BUILD_DESCRIPTOR_PATH, artifact.build_descriptor.as_str()),
        (README_PATH, artifact.readme.as_str()),
        (SETTINGS_PATH, SETTINGS_CONTENT),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", name, e)))?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Escape text for a Java string literal.
fn java_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Collapse line breaks so text stays inside a `//` comment.
fn single_line(s: &str) -> String {
    s.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
