//! Dataset Loader Module
//! Loads literal tables, local CSV files and remote CSV/JSON datasets.

use polars::prelude::*;
use rayon::prelude::*;
use reqwest::blocking::Client;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use super::dataset::{Dataset, Record, Scalar};
use crate::config::Config;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No data loaded")]
    NoData,
}

/// Produces datasets from literal rows, CSV files and HTTP endpoints.
///
/// Remote fetches are plain blocking GETs bounded by the configured timeout.
/// There is no retry and nothing is cached between calls.
pub struct DataLoader {
    client: Client,
}

impl DataLoader {
    pub fn new(config: &Config) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(config.http_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap literal rows as a dataset.
    pub fn from_literal(rows: Vec<Record>) -> Dataset {
        Dataset::from_records(rows)
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&self, file_path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let file_path = file_path.as_ref();
        debug!(path = %file_path.display(), "loading csv");

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        if df.width() == 0 {
            return Err(LoaderError::NoData);
        }
        Ok(df)
    }

    /// GET `url` and parse the body as CSV with a header row. Blank lines
    /// are skipped rather than read as all-null rows.
    pub fn fetch_csv(&self, url: &str) -> Result<DataFrame, LoaderError> {
        let body = strip_blank_lines(&self.fetch_bytes(url)?);
        if body.is_empty() {
            return Err(LoaderError::NoData);
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(body))
            .finish()?;

        debug!(url, rows = df.height(), columns = df.width(), "parsed csv");
        Ok(df)
    }

    /// GET `url` and parse the body as a JSON array of flat objects.
    pub fn fetch_json_records(&self, url: &str) -> Result<Dataset, LoaderError> {
        let body = self.fetch_bytes(url)?;
        let records: Vec<Record> = serde_json::from_slice(&body)?;
        if records.is_empty() {
            return Err(LoaderError::NoData);
        }
        Ok(Dataset::from_records(records))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, LoaderError> {
        info!(url, "fetching remote dataset");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?.to_vec();
        debug!(url, bytes = body.len(), "fetched remote dataset");
        Ok(body)
    }
}

/// Convert a Polars frame into row records, keeping row and column order.
pub fn dataset_from_frame(df: &DataFrame) -> Result<Dataset, LoaderError> {
    let columns = df.get_columns();

    let records = (0..df.height())
        .into_par_iter()
        .map(|i| {
            columns
                .iter()
                .map(|col| Ok((col.name().to_string(), scalar_from_any(col.get(i)?))))
                .collect::<Result<Record, PolarsError>>()
        })
        .collect::<Result<Vec<Record>, PolarsError>>()?;

    Ok(Dataset::from_records(records))
}

/// Drop lines that hold nothing but whitespace. Kept lines end in `\n`.
fn strip_blank_lines(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    for line in body.split(|&b| b == b'\n') {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}

/// Polars dtypes that map to numeric columns.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn scalar_from_any(value: AnyValue<'_>) -> Scalar {
    match value {
        AnyValue::Null => Scalar::Null,
        AnyValue::Boolean(b) => Scalar::Bool(b),
        AnyValue::String(s) => Scalar::Text(s.to_string()),
        AnyValue::StringOwned(s) => Scalar::Text(s.to_string()),
        AnyValue::Int8(v) => Scalar::Integer(v.into()),
        AnyValue::Int16(v) => Scalar::Integer(v.into()),
        AnyValue::Int32(v) => Scalar::Integer(v.into()),
        AnyValue::Int64(v) => Scalar::Integer(v),
        AnyValue::UInt8(v) => Scalar::Integer(v.into()),
        AnyValue::UInt16(v) => Scalar::Integer(v.into()),
        AnyValue::UInt32(v) => Scalar::Integer(v.into()),
        AnyValue::UInt64(v) => i64::try_from(v)
            .map(Scalar::Integer)
            .unwrap_or(Scalar::Number(v as f64)),
        AnyValue::Float32(v) => Scalar::Number(v.into()),
        AnyValue::Float64(v) => Scalar::Number(v),
        other => Scalar::Text(other.to_string().trim_matches('"').to_string()),
    }
}
