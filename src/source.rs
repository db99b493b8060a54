//! Where the raw recipe table comes from.
//!
//! The browser only cares about the column contract (see
//! [`crate::recipe::COLUMN_COUNT`]); a source may be the live Google Sheets
//! export, a CSV file saved from it, or a fixed set of rows.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::recipe::RawRow;

lazy_static! {
    static ref GVIZ_ENVELOPE: Regex =
        Regex::new(r"(?s)google\.visualization\.Query\.setResponse\((.*)\);").unwrap();
}

/// One-shot bulk loader for the recipe table.
pub trait DataSource {
    /// Human-readable origin, for logs
    fn describe(&self) -> String;

    fn fetch_raw_table(&self) -> impl Future<Output = Result<Vec<RawRow>, LoadError>> + Send;
}

/// Google Sheets visualization ("gviz") JSON export of one sheet.
#[derive(Clone, Debug)]
pub struct GvizSource {
    spreadsheet_id: String,
    gid: String,
    client: reqwest::Client,
}

impl GvizSource {
    pub fn new(spreadsheet_id: impl Into<String>, gid: impl Into<String>) -> Self {
        GvizSource {
            spreadsheet_id: spreadsheet_id.into(),
            gid: gid.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:json&gid={}",
            self.spreadsheet_id, self.gid
        )
    }
}

impl DataSource for GvizSource {
    fn describe(&self) -> String {
        self.url()
    }

    async fn fetch_raw_table(&self) -> Result<Vec<RawRow>, LoadError> {
        let response = self.client.get(self.url()).send().await?;
        if !response.status().is_success() {
            return Err(LoadError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        parse_gviz_response(&text)
    }
}

#[derive(Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: String,
}

#[derive(Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
    #[serde(default)]
    f: Option<String>,
}

/// Extract rows from a gviz response body, i.e.
/// `...google.visualization.Query.setResponse({...});`
pub fn parse_gviz_response(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let payload = GVIZ_ENVELOPE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or(LoadError::Envelope)?;

    let response: GvizResponse = serde_json::from_str(payload.as_str())?;
    let labels: Vec<&str> = response.table.cols.iter().map(|c| c.label.as_str()).collect();
    debug!("sheet columns: {:?}", labels);

    Ok(response
        .table
        .rows
        .iter()
        .map(|row| row.c.iter().map(|cell| cell_text(cell.as_ref())).collect())
        .collect())
}

// Falsy values (null, false, 0, "") read as empty; other non-strings prefer the formatted value.
fn cell_text(cell: Option<&GvizCell>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    match &cell.v {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) && cell.f.is_none() => String::new(),
        Value::Number(n) => cell.f.clone().unwrap_or_else(|| number_text(n)),
        other => cell.f.clone().unwrap_or_else(|| other.to_string()),
    }
}

// Whole-valued floats print without a fraction: 4.0 reads as "4".
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// A CSV export of the sheet on disk. The first record is the header.
#[derive(Clone, Debug)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_raw_table(&self) -> Result<Vec<RawRow>, LoadError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_csv(&text)
    }
}

/// Parse CSV text into rows, dropping the header record and empty lines.
/// A line of empty fields (`,,,`) is still a row.
///
/// Quoted fields may contain commas, `""` escapes and line breaks, which is
/// how multi-line materials and steps come out of a spreadsheet export.
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let mut records = Vec::new();
    let mut current_row = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut quoted_record = false;
    let mut line = 1;
    let mut record_start = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    // Double quote inside quoted field - add a single quote
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => {
                in_quotes = true;
                quoted_record = true;
            }
            ',' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' if in_quotes => {
                line += 1;
                current_field.push('\n');
            }
            '\n' => {
                line += 1;
                if !current_row.is_empty() || !current_field.is_empty() || quoted_record {
                    current_row.push(std::mem::take(&mut current_field));
                    records.push(RawRow::new(std::mem::take(&mut current_row)));
                }
                quoted_record = false;
                record_start = line;
            }
            _ => current_field.push(c),
        }
    }

    if in_quotes {
        return Err(LoadError::Csv {
            line: record_start,
            message: "unterminated quoted field".to_string(),
        });
    }

    // Last record without a trailing newline
    if !current_field.is_empty() || !current_row.is_empty() || quoted_record {
        current_row.push(current_field);
        records.push(RawRow::new(current_row));
    }

    Ok(records.into_iter().skip(1).collect())
}

/// Fixed rows held in memory. Can be set up to fail, which is how the load
/// failure path gets exercised without a network.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    rows: Vec<RawRow>,
    failure: Option<String>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        StaticSource {
            rows,
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        StaticSource {
            rows: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} in-memory rows", self.rows.len())
    }

    async fn fetch_raw_table(&self) -> Result<Vec<RawRow>, LoadError> {
        match &self.failure {
            Some(message) => Err(LoadError::Unavailable(message.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}

/// Any of the built-in sources, picked at runtime from configuration.
#[derive(Clone, Debug)]
pub enum AnySource {
    Gviz(GvizSource),
    Csv(CsvFileSource),
    Static(StaticSource),
}

impl DataSource for AnySource {
    fn describe(&self) -> String {
        match self {
            AnySource::Gviz(source) => source.describe(),
            AnySource::Csv(source) => source.describe(),
            AnySource::Static(source) => source.describe(),
        }
    }

    async fn fetch_raw_table(&self) -> Result<Vec<RawRow>, LoadError> {
        info!("Fetching recipe table from {}", self.describe());
        match self {
            AnySource::Gviz(source) => source.fetch_raw_table().await,
            AnySource::Csv(source) => source.fetch_raw_table().await,
            AnySource::Static(source) => source.fetch_raw_table().await,
        }
    }
}
