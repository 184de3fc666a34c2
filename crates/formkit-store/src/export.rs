//! Export formats for the submission store.
//!
//! - [`CsvExporter`] - One row per submission, one column per schema field
//! - [`JsonExporter`] - Pretty-printed JSON array of submissions

use std::fmt::Write as _;
use std::str::FromStr;

use formkit_core::{FormError, FormResult};
use formkit_forms::FormSchema;
use serde_json::Value;

use crate::submission::Submission;

/// Renders a list of submissions as a downloadable document.
pub trait Exporter: Send + Sync {
    /// The MIME type of the rendered document.
    fn content_type(&self) -> &'static str;

    /// The file extension, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Renders `submissions`, using `schema` for column layout where needed.
    fn export(&self, schema: &FormSchema, submissions: &[Submission]) -> FormResult<String>;
}

/// The export formats the store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// A JSON array.
    Json,
}

impl ExportFormat {
    /// Returns the exporter for this format.
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Csv => Box::new(CsvExporter),
            Self::Json => Box::new(JsonExporter),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(FormError::BadRequest(format!(
                "Unsupported export format '{other}'"
            ))),
        }
    }
}

/// CSV with a header row of `ID`, `Created At`, then each schema field name
/// in schema order. Multi-valued cells are joined with `"; "`. Cells are
/// quoted per RFC 4180 when they contain a comma, quote, or line break.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    fn cell(value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| Self::cell(Some(item)))
                .collect::<Vec<_>>()
                .join("; "),
            Some(other) => other.to_string(),
        }
    }

    fn quote(cell: &str) -> String {
        if cell.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", cell.replace('"', "\"\""))
        } else {
            cell.to_string()
        }
    }

    fn write_row<I, S>(out: &mut String, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = cells
            .into_iter()
            .map(|c| Self::quote(c.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        let _ = write!(out, "{row}\r\n");
    }
}

impl Exporter for CsvExporter {
    fn content_type(&self) -> &'static str {
        "text/csv; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }

    fn export(&self, schema: &FormSchema, submissions: &[Submission]) -> FormResult<String> {
        let mut out = String::new();
        let header = ["ID", "Created At"]
            .into_iter()
            .chain(schema.fields.iter().map(|f| f.name.as_str()));
        Self::write_row(&mut out, header);

        for submission in submissions {
            let row = [submission.id.to_string(), submission.created_at_string()]
                .into_iter()
                .chain(
                    schema
                        .fields
                        .iter()
                        .map(|f| Self::cell(submission.data.get(&f.name))),
                );
            Self::write_row(&mut out, row);
        }
        Ok(out)
    }
}

/// Pretty-printed JSON array of submissions in their wire shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn export(&self, _schema: &FormSchema, submissions: &[Submission]) -> FormResult<String> {
        Ok(serde_json::to_string_pretty(submissions)?)
    }
}
