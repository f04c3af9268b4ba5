//! JUnit XML report parser.
//!
//! Accepts both `<testsuites>`-wrapped reports and bare single-suite reports.
//! Counts are taken from the suite attributes as declared; they are not
//! recomputed from the cases, so inconsistent reports pass through unchanged.

use roxmltree::{Document, Node};

use crate::models::CaseStatus;

/// Errors raised while parsing a JUnit report.
#[derive(Debug, thiserror::Error)]
pub enum JunitParseError {
    #[error("malformed XML: {0}")]
    Malformed(#[from] roxmltree::Error),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

/// One `<testsuite>` with its declared counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSuite {
    pub name: String,
    pub tests: i32,
    pub failures: i32,
    pub skipped: i32,
    /// `tests - failures - skipped`; negative when the report is inconsistent.
    pub passed: i32,
    pub duration_ms: i64,
    pub cases: Vec<ParsedCase>,
}

/// One `<testcase>` and its resolved outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCase {
    pub name: String,
    pub status: CaseStatus,
    pub duration_ms: i64,
    pub error_message: Option<String>,
}

/// Parse a JUnit XML document into its suites, in document order.
///
/// When the document contains no `<testsuite>` element at all, the root
/// element itself is read as the only suite.
pub fn parse(xml: &str) -> Result<Vec<ParsedSuite>, JunitParseError> {
    let doc = Document::parse(xml)?;

    let mut suite_nodes: Vec<Node<'_, '_>> = doc
        .descendants()
        .filter(|n| n.has_tag_name("testsuite"))
        .collect();

    if suite_nodes.is_empty() {
        suite_nodes.push(doc.root_element());
    }

    suite_nodes.into_iter().map(parse_suite).collect()
}

fn parse_suite(node: Node<'_, '_>) -> Result<ParsedSuite, JunitParseError> {
    let tests = required_int(node, "testsuite", "tests")?;
    let failures = optional_int(node, "testsuite", "failures")?;
    let skipped = optional_int(node, "testsuite", "skipped")?;
    let duration_ms = seconds_to_ms(node, "testsuite")?;
    let passed = tests
        .checked_sub(failures)
        .and_then(|n| n.checked_sub(skipped))
        .ok_or_else(|| JunitParseError::InvalidAttribute {
            element: "testsuite",
            attribute: "tests",
            value: tests.to_string(),
        })?;

    let cases = node
        .children()
        .filter(|n| n.has_tag_name("testcase"))
        .map(parse_case)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedSuite {
        name: node.attribute("name").unwrap_or_default().to_string(),
        tests,
        failures,
        skipped,
        passed,
        duration_ms,
        cases,
    })
}

fn parse_case(node: Node<'_, '_>) -> Result<ParsedCase, JunitParseError> {
    let name = node.attribute("name").unwrap_or_default();
    let name = match node.attribute("classname") {
        Some(classname) if !classname.is_empty() => format!("{}.{}", classname, name),
        _ => name.to_string(),
    };

    // Failure takes precedence over skipped when a case carries both.
    let (status, error_message) = if let Some(failure) = child(node, "failure") {
        (CaseStatus::Failed, Some(text_content(failure)))
    } else if let Some(skipped) = child(node, "skipped") {
        (CaseStatus::Skipped, Some(text_content(skipped)))
    } else {
        (CaseStatus::Passed, None)
    };

    Ok(ParsedCase {
        name,
        status,
        duration_ms: seconds_to_ms(node, "testcase")?,
        error_message,
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Concatenated text of every descendant text node, verbatim.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn required_int(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<i32, JunitParseError> {
    let value = node
        .attribute(attribute)
        .ok_or(JunitParseError::MissingAttribute { element, attribute })?;
    parse_int(value, element, attribute)
}

fn optional_int(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<i32, JunitParseError> {
    match node.attribute(attribute).map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => parse_int(value, element, attribute),
    }
}

fn parse_int(
    value: &str,
    element: &'static str,
    attribute: &'static str,
) -> Result<i32, JunitParseError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| JunitParseError::InvalidAttribute {
            element,
            attribute,
            value: value.to_string(),
        })
}

/// Read the `time` attribute (seconds) as whole milliseconds, truncating.
fn seconds_to_ms(node: Node<'_, '_>, element: &'static str) -> Result<i64, JunitParseError> {
    let seconds = match node.attribute("time").map(str::trim) {
        None | Some("") => 0.0,
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| JunitParseError::InvalidAttribute {
                element,
                attribute: "time",
                value: value.to_string(),
            })?,
    };
    Ok((seconds * 1000.0) as i64)
}
