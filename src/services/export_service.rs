use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Csv => CSV_CONTENT_TYPE,
            ReportFormat::Xlsx => XLSX_CONTENT_TYPE,
        }
    }
}

/// `Test-Results-{test_id}.{ext}`
pub fn default_filename(test_id: &str, format: ReportFormat) -> String {
    format!("Test-Results-{}.{}", sanitize_filename(test_id), format.extension())
}

/// Keeps the name safe inside a quoted `Content-Disposition` value and on disk.
fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '"' | '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// A finished report ready to hand to the host environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl ReportFile {
    pub fn csv(content: String, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content_type: CSV_CONTENT_TYPE,
            bytes: Bytes::from(content),
        }
    }

    pub fn xlsx(buffer: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content_type: XLSX_CONTENT_TYPE,
            bytes: Bytes::from(buffer),
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", sanitize_filename(&self.filename))
    }
}

impl IntoResponse for ReportFile {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Where an exported file ends up. Implementations must persist exactly the
/// bytes they are given under the given name.
#[cfg_attr(test, mockall::automock)]
pub trait DownloadTarget {
    fn save(&self, filename: &str, content_type: &str, bytes: &[u8]) -> Result<()>;
}

/// Saves reports into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(sanitize_filename(filename))
    }
}

impl DownloadTarget for DirectoryTarget {
    fn save(&self, filename: &str, _content_type: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(filename), bytes)?;
        Ok(())
    }
}

/// Hands `file` to `target`. Target failures are returned as-is, not retried.
pub fn export_as_file(file: &ReportFile, target: &dyn DownloadTarget) -> Result<()> {
    tracing::info!(filename = %file.filename, size = file.bytes.len(), "Exporting report");
    target.save(&file.filename, file.content_type, &file.bytes)
}
