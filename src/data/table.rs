//! Table View Module
//! Renders tabular data as plain text, HTML and a table-schema data resource.

use polars::prelude::*;
use serde_json::{json, Value};

use super::dataset::{ColumnKind, Dataset, Scalar};
use super::loader::{dataset_from_frame, is_numeric_dtype, LoaderError};
use crate::config::Config;
use crate::display::{DisplayError, Displayable, MimeBundle, MimeType};

/// Version tag written into table-schema payloads; renderers key on it.
pub const PANDAS_VERSION: &str = "1.4.0";

/// Table-schema field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Number,
    Boolean,
    String,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::String => "string",
        }
    }

    fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::Boolean => FieldKind::Boolean,
            DataType::Float32 | DataType::Float64 => FieldKind::Number,
            d if is_numeric_dtype(d) => FieldKind::Integer,
            _ => FieldKind::String,
        }
    }
}

/// A displayable table with a fixed field list.
#[derive(Debug, Clone)]
pub struct TableView {
    fields: Vec<(String, FieldKind)>,
    data: Dataset,
    max_rows: Option<usize>,
    table_schema: bool,
}

impl TableView {
    /// Table view over a Polars frame; field types come from the frame's dtypes.
    pub fn new(df: &DataFrame, config: &Config) -> Result<Self, LoaderError> {
        let fields = df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), FieldKind::from_dtype(col.dtype())))
            .collect();

        Ok(Self {
            fields,
            data: dataset_from_frame(df)?,
            max_rows: config.max_rows,
            table_schema: config.table_schema,
        })
    }

    /// Table view over literal records; field types are inferred from values.
    pub fn from_dataset(data: Dataset, config: &Config) -> Self {
        let fields = data
            .columns()
            .iter()
            .map(|name| {
                let kind = match data.column_kind(name) {
                    ColumnKind::Numeric => {
                        if data.column_values(name).all(|v| matches!(v, Scalar::Integer(_) | Scalar::Null)) {
                            FieldKind::Integer
                        } else {
                            FieldKind::Number
                        }
                    }
                    ColumnKind::Boolean => FieldKind::Boolean,
                    ColumnKind::Text | ColumnKind::Empty => FieldKind::String,
                };
                (name.clone(), kind)
            })
            .collect();

        Self {
            fields,
            data,
            max_rows: config.max_rows,
            table_schema: config.table_schema,
        }
    }

    pub fn fields(&self) -> &[(String, FieldKind)] {
        &self.fields
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Row cap in effect. `Some(0)` means no cap, as with pandas outside a terminal.
    fn row_limit(&self) -> Option<usize> {
        self.max_rows.filter(|&max| max > 0)
    }

    /// Lines of the table body: a row index, or `None` for the ellipsis row.
    fn visible_rows(&self) -> Vec<Option<usize>> {
        let n = self.data.len();
        match self.row_limit() {
            Some(max) if n > max => {
                let head = (max + 1) / 2;
                let tail = max / 2;
                (0..head)
                    .map(Some)
                    .chain(std::iter::once(None))
                    .chain((n - tail..n).map(Some))
                    .collect()
            }
            _ => (0..n).map(Some).collect(),
        }
    }

    fn cell(&self, row: usize, field: &str) -> String {
        self.data.records()[row]
            .get(field)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NaN".to_string())
    }

    /// Right-aligned text table with a leading index column.
    pub fn to_plain_text(&self) -> String {
        let rows = self.visible_rows();
        let truncated = rows.contains(&None);

        // columns[0] is the index column
        let mut columns: Vec<Vec<String>> = Vec::with_capacity(self.fields.len() + 1);
        let mut index = vec![String::new()];
        index.extend(rows.iter().map(|row| match row {
            Some(row) => row.to_string(),
            None => "..".to_string(),
        }));
        columns.push(index);

        for (name, _) in &self.fields {
            let mut col = vec![name.clone()];
            col.extend(rows.iter().map(|row| match row {
                Some(row) => self.cell(*row, name),
                None => "...".to_string(),
            }));
            columns.push(col);
        }

        let widths: Vec<usize> = columns
            .iter()
            .map(|c| c.iter().map(|s| s.chars().count()).max().unwrap_or(0))
            .collect();

        let line_count = columns.first().map(Vec::len).unwrap_or(0);
        let mut lines = Vec::with_capacity(line_count + 2);
        for line in 0..line_count {
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (col, &w))| {
                    if i == 0 {
                        format!("{:<w$}", col[line])
                    } else {
                        format!("{:>w$}", col[line])
                    }
                })
                .collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }

        if truncated {
            lines.push(String::new());
            lines.push(format!(
                "[{} rows x {} columns]",
                self.data.len(),
                self.fields.len()
            ));
        }
        lines.join("\n")
    }

    pub fn to_html(&self) -> String {
        let rows = self.visible_rows();

        let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n");
        html.push_str("    <tr style=\"text-align: right;\">\n      <th></th>\n");
        for (name, _) in &self.fields {
            html.push_str(&format!("      <th>{}</th>\n", escape_html(name)));
        }
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

        for &row in &rows {
            let Some(row) = row else {
                html.push_str("    <tr>\n      <th>...</th>\n");
                for _ in &self.fields {
                    html.push_str("      <td>...</td>\n");
                }
                html.push_str("    </tr>\n");
                continue;
            };
            html.push_str(&format!("    <tr>\n      <th>{row}</th>\n"));
            for (name, _) in &self.fields {
                html.push_str(&format!("      <td>{}</td>\n", escape_html(&self.cell(row, name))));
            }
            html.push_str("    </tr>\n");
        }
        html.push_str("  </tbody>\n</table>");

        if rows.contains(&None) {
            html.push_str(&format!(
                "\n<p>{} rows × {} columns</p>",
                self.data.len(),
                self.fields.len()
            ));
        }
        html
    }

    /// `application/vnd.dataresource+json` payload (table schema + rows).
    pub fn to_data_resource(&self) -> Value {
        let mut fields = vec![json!({"name": "index", "type": "integer"})];
        fields.extend(
            self.fields
                .iter()
                .map(|(name, kind)| json!({"name": name, "type": kind.as_str()})),
        );

        let limit = self.row_limit().unwrap_or(usize::MAX);
        let data: Vec<Value> = self
            .data
            .records()
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, rec)| {
                let mut row = serde_json::Map::new();
                row.insert("index".to_string(), json!(i));
                for (name, _) in &self.fields {
                    let value = rec.get(name).cloned().unwrap_or(Scalar::Null);
                    row.insert(name.clone(), serde_json::to_value(value).unwrap_or(Value::Null));
                }
                Value::Object(row)
            })
            .collect();

        json!({
            "schema": {
                "fields": fields,
                "primaryKey": ["index"],
                "pandas_version": PANDAS_VERSION,
            },
            "data": data,
        })
    }
}

impl Displayable for TableView {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        let mut bundle = MimeBundle::new();
        bundle.insert(MimeType::Plain, Value::String(self.to_plain_text()));
        bundle.insert(MimeType::Html, Value::String(self.to_html()));
        if self.table_schema {
            bundle.insert(MimeType::DataResource, self.to_data_resource());
        }
        Ok(bundle)
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
