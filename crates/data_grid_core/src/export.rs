//! Export artifacts built from the filtered (not paginated) row set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::ColumnDef;
use crate::config::ExportConfig;
use crate::model::GridRow;
use crate::GridError;

/// Fallback base name when neither a file name nor a title is configured.
pub const DEFAULT_EXPORT_NAME: &str = "export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Export target offered by the toolbar menu.
pub enum ExportFormat {
    /// Comma-separated file download.
    Csv,
    /// Pretty-printed JSON array download.
    Json,
    /// Tab-separated text placed on the clipboard.
    Clipboard,
}

impl ExportFormat {
    /// Stable token used for `data-ui-export` attributes.
    pub fn token(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Clipboard => "clipboard",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "Download as CSV",
            Self::Json => "Download as JSON",
            Self::Clipboard => "Copy to clipboard",
        }
    }

    fn extension(self) -> Option<&'static str> {
        match self {
            Self::Csv => Some("csv"),
            Self::Json => Some("json"),
            Self::Clipboard => None,
        }
    }

    fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Json => "application/json",
            Self::Clipboard => "text/plain",
        }
    }
}

/// Where an export artifact should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Local file download.
    Download {
        /// Suggested file name including extension.
        file_name: String,
        /// Blob MIME type.
        mime_type: &'static str,
    },
    /// System clipboard.
    Clipboard,
}

/// Serialized export ready for the browser effect executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Requested format.
    pub format: ExportFormat,
    /// Delivery target.
    pub target: ExportTarget,
    /// Serialized contents.
    pub contents: String,
    /// Number of exported rows.
    pub row_count: usize,
}

/// Lower-cases `title` and collapses every run of non-alphanumeric characters into one `-`.
///
/// Returns `None` when nothing alphanumeric remains.
pub fn slugify(title: &str) -> Option<String> {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    (!slug.is_empty()).then_some(slug)
}

/// File name for a download export: configured name, slugified title, or [`DEFAULT_EXPORT_NAME`].
pub fn export_file_name(config: &ExportConfig, title: Option<&str>, format: ExportFormat) -> String {
    let base = config
        .file_name
        .as_deref()
        .and_then(slugify)
        .or_else(|| title.and_then(slugify))
        .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());
    match format.extension() {
        Some(extension) => format!("{base}.{extension}"),
        None => base,
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn tsv_field(raw: &str) -> String {
    raw.replace(['\t', '\n', '\r'], " ")
}

/// RFC 4180 CSV with a header line, CRLF line endings, and formatted cell text.
pub fn to_csv<R: GridRow>(columns: &[&ColumnDef<R>], rows: &[&R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|column| csv_field(&column.header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|column| csv_field(&column.formatted(row)))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\r\n")
}

/// Tab-separated text: a header line, then one line per row using the raw string cast.
pub fn to_tsv<R: GridRow>(columns: &[&ColumnDef<R>], rows: &[&R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|column| tsv_field(&column.header))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|column| tsv_field(&column.value(row).display()))
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }
    lines.join("\n")
}

/// Pretty-printed JSON array of the full row objects.
///
/// # Errors
///
/// Returns [`GridError::ExportFailed`] if serialization fails.
pub fn to_json<R: GridRow>(rows: &[&R]) -> Result<String, GridError> {
    let values = rows.iter().map(|row| row.to_json()).collect::<Vec<Value>>();
    serde_json::to_string_pretty(&values).map_err(|err| GridError::ExportFailed(err.to_string()))
}

/// Builds the artifact for `format`.
///
/// `columns` should already exclude hidden and non-data columns.
///
/// # Errors
///
/// Propagates [`to_json`] failures.
pub fn build_artifact<R: GridRow>(
    format: ExportFormat,
    columns: &[&ColumnDef<R>],
    rows: &[&R],
    config: &ExportConfig,
    title: Option<&str>,
) -> Result<ExportArtifact, GridError> {
    let contents = match format {
        ExportFormat::Csv => to_csv(columns, rows),
        ExportFormat::Json => to_json(rows)?,
        ExportFormat::Clipboard => to_tsv(columns, rows),
    };
    let target = match format {
        ExportFormat::Clipboard => ExportTarget::Clipboard,
        ExportFormat::Csv | ExportFormat::Json => ExportTarget::Download {
            file_name: export_file_name(config, title, format),
            mime_type: format.mime_type(),
        },
    };
    Ok(ExportArtifact {
        format,
        target,
        contents,
        row_count: rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Record;

    fn columns() -> Vec<ColumnDef<Record>> {
        vec![ColumnDef::new("name", "Name"), ColumnDef::new("note", "Note")]
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slugify("Team Members (Q3)"), Some("team-members-q3".to_string()));
        assert_eq!(slugify("  !!! "), None);
    }

    #[test]
    fn file_name_prefers_config_then_title_then_default() {
        let mut config = ExportConfig::default();
        assert_eq!(
            export_file_name(&config, Some("Users"), ExportFormat::Json),
            "users.json"
        );
        assert_eq!(export_file_name(&config, None, ExportFormat::Csv), "export.csv");
        config.file_name = Some("audit log".to_string());
        assert_eq!(
            export_file_name(&config, Some("Users"), ExportFormat::Csv),
            "audit-log.csv"
        );
    }

    #[test]
    fn csv_quotes_delimiters_and_quotes() {
        let columns = columns();
        let refs = columns.iter().collect::<Vec<_>>();
        let row = Record::new()
            .with("name", "Doe, Jane")
            .with("note", "said \"hi\"");
        assert_eq!(
            to_csv(&refs, &[&row]),
            "Name,Note\r\n\"Doe, Jane\",\"said \"\"hi\"\"\""
        );
    }

    #[test]
    fn tsv_flattens_tabs_and_newlines() {
        let columns = columns();
        let refs = columns.iter().collect::<Vec<_>>();
        let row = Record::new().with("name", "a\tb").with("note", "line\nbreak");
        assert_eq!(to_tsv(&refs, &[&row]), "Name\tNote\na b\tline break");
    }

    #[test]
    fn clipboard_artifact_has_no_file_name() {
        let columns = columns();
        let refs = columns.iter().collect::<Vec<_>>();
        let artifact = build_artifact::<Record>(
            ExportFormat::Clipboard,
            &refs,
            &[],
            &ExportConfig::default(),
            None,
        )
        .expect("artifact");
        assert_eq!(artifact.target, ExportTarget::Clipboard);
        assert_eq!(artifact.row_count, 0);
    }
}
