//! Shared types for the contract auditor
//!
//! Everything that crosses the boundary between the terminal client and the
//! remote analysis service lives here: analysis requests, asynchronous task
//! states, results and their vulnerabilities, saved snippets and export
//! formats. The crate performs no I/O.

pub mod catalog;

pub use catalog::{lookup, KnownVulnerability, VulnerabilityInfo};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing user-supplied enum values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Contract source language accepted by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Solidity,
    Vyper,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Solidity => "solidity",
            Language::Vyper => "vyper",
        }
    }

    /// Guess the language from a file extension (`.sol` / `.vy`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "sol" => Some(Language::Solidity),
            "vy" => Some(Language::Vyper),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solidity" => Ok(Language::Solidity),
            "vyper" => Ok(Language::Vyper),
            _ => Err(ParseError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Body of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: Language,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
        }
    }
}

/// State of an asynchronous analysis task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Done,
    Error,
}

impl TaskState {
    /// Decode the service's `state` string.
    ///
    /// Only `PENDING` keeps a task alive; failure-like states map to
    /// [`TaskState::Error`] and everything else counts as done.
    pub fn from_wire(state: &str) -> Self {
        match state.trim().to_ascii_uppercase().as_str() {
            "PENDING" => TaskState::Pending,
            "FAILURE" | "FAILED" | "ERROR" | "REVOKED" => TaskState::Error,
            _ => TaskState::Done,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Pending)
    }
}

/// Handle for an analysis the service runs asynchronously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTask {
    pub task_id: String,
    pub state: TaskState,
}

impl AnalysisTask {
    pub fn pending(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            state: TaskState::Pending,
        }
    }
}

/// A single finding reported by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub name: String,
    pub description: String,
}

impl Vulnerability {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Guidance for this finding, if the catalog knows its name
    pub fn info(&self) -> Option<&'static VulnerabilityInfo> {
        lookup(&self.name)
    }
}

/// Identifier of a historical result; the service may send text or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultId::Number(n) => write!(f, "{}", n),
            ResultId::Text(s) => f.write_str(s),
        }
    }
}

/// Outcome of one analysis.
///
/// Fields are private: a result is built once (deserialized or through the
/// `with_*` builders) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<ResultId>,
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contract_code: Option<String>,
    vulnerabilities: Vec<Vulnerability>,
}

impl AnalysisResult {
    pub fn new(vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            id: None,
            created_at: None,
            contract_code: None,
            vulnerabilities,
        }
    }

    pub fn with_id(mut self, id: ResultId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_contract_code(mut self, code: impl Into<String>) -> Self {
        self.contract_code = Some(code.into());
        self
    }

    pub fn id(&self) -> Option<&ResultId> {
        self.id.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn contract_code(&self) -> Option<&str> {
        self.contract_code.as_deref()
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    /// True if any finding carries exactly this name
    pub fn contains(&self, name: &str) -> bool {
        self.vulnerabilities.iter().any(|v| v.name == name)
    }

    /// Display label: the id when present, otherwise `#<position>`
    pub fn label(&self, position: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("#{}", position),
        }
    }
}

/// Naive timestamps without an offset, as some service versions send them
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse an RFC 3339 or naive (taken as UTC) timestamp
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// A timestamp that cannot be read becomes `None` instead of failing the
/// whole result (and with it a whole history list).
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => parse_timestamp(&text),
        _ => None,
    })
}

/// Response of `POST /analyze`: either a task to poll or the final result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Task { task_id: String },
    Completed(AnalysisResult),
}

/// Response of `GET /result/{task_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl TaskStatusResponse {
    pub fn task_state(&self) -> TaskState {
        TaskState::from_wire(&self.state)
    }
}

/// A user-named copy of contract source kept in the snippet store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub name: String,
    pub code: String,
    pub language: Language,
}

impl Snippet {
    pub fn new(name: impl Into<String>, code: impl Into<String>, language: Language) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            language,
        }
    }
}

/// File formats a result can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "vulnerabilities.csv",
            ExportFormat::Json => "vulnerabilities.json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Json => "application/json;charset=utf-8;",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ParseError::UnsupportedFormat(s.to_string())),
        }
    }
}

// ============================================================================
// Console Logging Macros (for the command-line front end)
// ============================================================================
// Coloured, human-readable lines for CLI users. Structured diagnostics go
// through `tracing` instead.
// ============================================================================

/// Logs an informational message.
///
/// # Example
/// ```
/// use contract_auditor_sdk::log_info;
/// log_info!("Submitting contract for analysis...");
/// ```
///
/// Outputs:
/// ```text
/// ℹ Submitting contract for analysis...
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// # Example
/// ```
/// use contract_auditor_sdk::log_warning;
/// log_warning!("Saved snippets could not be read");
/// ```
///
/// Outputs:
/// ```text
/// ⚠ Warning: Saved snippets could not be read
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        eprintln!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs an error message to stderr.
///
/// # Example
/// ```
/// use contract_auditor_sdk::log_error;
/// log_error!("Analysis failed: {}", "connection refused");
/// ```
///
/// Outputs:
/// ```text
/// ✗ Analysis failed: connection refused
/// ```
#[macro_export]
macro_rules! log_error {
    ($message:expr) => {
        eprintln!("\x1b[31m✗ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[31m✗ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs the number of items found.
///
/// # Example
/// ```
/// use contract_auditor_sdk::log_found;
/// log_found!(3, "vulnerabilities");
/// ```
///
/// Outputs:
/// ```text
/// Found 3 vulnerabilities
/// ```
#[macro_export]
macro_rules! log_found {
    ($count:expr, $item_type:expr) => {
        println!("\x1b[36mFound {} {}\x1b[0m", $count, $item_type);
    };
}

/// Logs that a file has been saved.
///
/// # Example
/// ```
/// use contract_auditor_sdk::log_file_saved;
/// log_file_saved!("./vulnerabilities.csv");
/// ```
///
/// Outputs:
/// ```text
/// ✓ Saved: ./vulnerabilities.csv
/// ```
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_parsing() {
        assert_eq!("Solidity".parse::<Language>().unwrap(), Language::Solidity);
        assert_eq!(" vyper ".parse::<Language>().unwrap(), Language::Vyper);
        assert_eq!(
            "rust".parse::<Language>(),
            Err(ParseError::UnsupportedLanguage("rust".to_string()))
        );
        assert_eq!(Language::from_extension("SOL"), Some(Language::Solidity));
        assert_eq!(Language::from_extension("txt"), None);
    }

    #[test]
    fn test_task_state_from_wire() {
        assert_eq!(TaskState::from_wire("PENDING"), TaskState::Pending);
        assert_eq!(TaskState::from_wire("pending"), TaskState::Pending);
        assert_eq!(TaskState::from_wire("SUCCESS"), TaskState::Done);
        assert_eq!(TaskState::from_wire("DONE"), TaskState::Done);
        assert_eq!(TaskState::from_wire("STARTED"), TaskState::Done);
        assert_eq!(TaskState::from_wire("FAILURE"), TaskState::Error);
        assert!(!TaskState::Pending.is_terminal());
        assert!(TaskState::Error.is_terminal());
    }

    #[test]
    fn test_history_tolerates_unreadable_timestamps() {
        let history: Vec<AnalysisResult> = serde_json::from_str(
            r#"[
                {"id": 1, "created_at": "2024-03-01T10:00:00Z", "vulnerabilities": []},
                {"id": 2, "created_at": "2024-03-01 10:00:00", "vulnerabilities": []},
                {"id": 3, "createdAt": "last tuesday", "vulnerabilities": []},
                {"id": 4, "created_at": 1709287200, "vulnerabilities": []}
            ]"#,
        )
        .unwrap();

        assert_eq!(history.len(), 4);
        assert_eq!(history[0].created_at(), history[1].created_at());
        assert_eq!(
            history[1].created_at().map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_string())
        );
        assert_eq!(history[2].created_at(), None);
        assert_eq!(history[3].created_at(), None);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert!(parse_timestamp("2024-03-01T10:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-03-01 10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-03-01T10:00:00").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_analyze_response_task_variant() {
        let response: AnalyzeResponse =
            serde_json::from_value(json!({"task_id": "abc-123"})).unwrap();
        assert_eq!(
            response,
            AnalyzeResponse::Task {
                task_id: "abc-123".to_string()
            }
        );
    }

    #[test]
    fn test_analyze_response_completed_variant() {
        let response: AnalyzeResponse = serde_json::from_value(json!({
            "contract_code": "contract A {}",
            "vulnerabilities": [
                {"name": "Use of tx.origin", "description": "Function f uses tx.origin"}
            ]
        }))
        .unwrap();

        match response {
            AnalyzeResponse::Completed(result) => {
                assert_eq!(result.vulnerabilities().len(), 1);
                assert_eq!(result.contract_code(), Some("contract A {}"));
                assert!(result.contains("Use of tx.origin"));
            }
            other => panic!("expected completed result, got {:?}", other),
        }
    }

    #[test]
    fn test_body_without_vulnerabilities_is_rejected() {
        let parsed = serde_json::from_value::<AnalyzeResponse>(json!({"error": "boom"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_id_and_label() {
        let numeric: AnalysisResult = serde_json::from_value(json!({
            "id": 7,
            "createdAt": "2024-03-01T10:00:00Z",
            "vulnerabilities": []
        }))
        .unwrap();
        assert_eq!(numeric.id(), Some(&ResultId::Number(7)));
        assert_eq!(numeric.label(0), "7");
        assert!(numeric.created_at().is_some());

        let anonymous = AnalysisResult::new(vec![]);
        assert_eq!(anonymous.label(2), "#2");
    }

    #[test]
    fn test_export_format_metadata() {
        assert_eq!(ExportFormat::Csv.file_name(), "vulnerabilities.csv");
        assert_eq!(ExportFormat::Json.mime_type(), "application/json;charset=utf-8;");
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_snippet_round_trips_language_lowercase() {
        let snippet = Snippet::new("x", "code1", Language::Solidity);
        let value = serde_json::to_value(&snippet).unwrap();
        assert_eq!(value, json!({"name": "x", "code": "code1", "language": "solidity"}));
    }
}
