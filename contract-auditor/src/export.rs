//! CSV and JSON export of analysis results

use analysis_client::{AnalysisClient, ClientError};
use contract_auditor_sdk::{AnalysisResult, ExportFormat, ParseError};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_HEADER: &str = "Vulnerability,Description";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is no analysis result to export")]
    NoResult,

    #[error(transparent)]
    UnsupportedFormat(#[from] ParseError),

    #[error("Could not serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote export failed: {0}")]
    Remote(#[from] ClientError),
}

/// Serialized result ready to be written or offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: &'static str,
}

impl ExportArtifact {
    fn new(bytes: Vec<u8>, format: ExportFormat) -> Self {
        Self {
            bytes,
            filename: format.file_name().to_string(),
            mime_type: format.mime_type(),
        }
    }

    /// Write the artifact into `dir` under its file name
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Quote a CSV field if it contains a quote, comma or line break
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Inverse of [`escape`]
pub fn unescape(field: &str) -> String {
    match field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_string(),
    }
}

/// Header plus one row per vulnerability, separated by `\n`
pub fn to_csv(result: &AnalysisResult) -> String {
    let mut lines = Vec::with_capacity(result.vulnerabilities().len() + 1);
    lines.push(CSV_HEADER.to_string());
    for vulnerability in result.vulnerabilities() {
        lines.push(format!(
            "{},{}",
            escape(&vulnerability.name),
            escape(&vulnerability.description)
        ));
    }
    lines.join("\n")
}

pub fn to_json(result: &AnalysisResult) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Format `result` locally
pub fn export(
    result: Option<&AnalysisResult>,
    format: ExportFormat,
) -> Result<ExportArtifact, ExportError> {
    let result = result.ok_or(ExportError::NoResult)?;

    let bytes = match format {
        ExportFormat::Csv => to_csv(result).into_bytes(),
        ExportFormat::Json => to_json(result)?.into_bytes(),
    };

    tracing::debug!(%format, bytes = bytes.len(), "result exported");
    Ok(ExportArtifact::new(bytes, format))
}

/// Same as [`export`], with the format given by name
pub fn export_named(
    result: Option<&AnalysisResult>,
    format: &str,
) -> Result<ExportArtifact, ExportError> {
    let format: ExportFormat = format.parse()?;
    export(result, format)
}

/// Let the analysis service render the file
pub async fn export_remote(
    client: &AnalysisClient,
    result: Option<&AnalysisResult>,
    format: ExportFormat,
) -> Result<ExportArtifact, ExportError> {
    let result = result.ok_or(ExportError::NoResult)?;
    let bytes = client.export_remote(result, format).await?;
    Ok(ExportArtifact::new(bytes, format))
}
