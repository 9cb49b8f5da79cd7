//! In-memory dataset: ordered records of scalar values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Integer(_) | Scalar::Number(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("NaN"),
            Scalar::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Scalar::Integer(v) => write!(f, "{v}"),
            // Floats always carry a decimal point, as dataframe reprs print them
            Scalar::Number(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Scalar::Number(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Integer(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

static NULL: Scalar = Scalar::Null;

/// One row: column name to value, in insertion order.
pub type Record = IndexMap<String, Scalar>;

/// Build a [`Record`] from `(name, value)` pairs.
pub fn record<K, V, I>(fields: I) -> Record
where
    K: Into<String>,
    V: Into<Scalar>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// What a column holds, judged from its non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Boolean,
    Text,
    /// Missing from every record, or null everywhere.
    Empty,
}

/// Ordered collection of records plus the union of their columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns are collected in first-seen order across records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for rec in &records {
            for key in rec.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Values of one column; `Null` where a record lacks the field.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Scalar> + 'a {
        self.records
            .iter()
            .map(move |rec| rec.get(name).unwrap_or(&NULL))
    }

    pub fn column_kind(&self, name: &str) -> ColumnKind {
        let mut kind = ColumnKind::Empty;
        for value in self.column_values(name) {
            let this = match value {
                Scalar::Null => continue,
                v if v.is_numeric() => ColumnKind::Numeric,
                Scalar::Bool(_) => ColumnKind::Boolean,
                _ => return ColumnKind::Text,
            };
            kind = match kind {
                ColumnKind::Empty => this,
                k if k == this => k,
                _ => return ColumnKind::Text,
            };
        }
        kind
    }

    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.column_kind(c) == ColumnKind::Numeric)
            .cloned()
            .collect()
    }

    /// The dataset as a JSON array of objects.
    pub fn to_values(&self) -> serde_json::Value {
        serde_json::to_value(&self.records).unwrap_or(serde_json::Value::Null)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            record([("label", Scalar::from("a")), ("x", Scalar::Integer(1))]),
            record([("label", Scalar::from("b")), ("x", 2.5.into()), ("flag", true.into())]),
        ])
    }

    #[test]
    fn columns_follow_first_seen_order() {
        let ds = sample();
        assert_eq!(ds.columns(), ["label", "x", "flag"]);
        assert_eq!(ds.len(), 2);
        assert!(ds.has_column("flag"));
        assert!(!ds.has_column("y"));
    }

    #[test]
    fn column_kind_ignores_nulls_and_missing_fields() {
        let ds = sample();
        assert_eq!(ds.column_kind("x"), ColumnKind::Numeric);
        assert_eq!(ds.column_kind("label"), ColumnKind::Text);
        assert_eq!(ds.column_kind("flag"), ColumnKind::Boolean);
        assert_eq!(ds.column_kind("nope"), ColumnKind::Empty);
        assert_eq!(ds.numeric_columns(), vec!["x".to_string()]);
    }

    #[test]
    fn mixed_column_is_text() {
        let ds = Dataset::from_records(vec![
            record([("v", Scalar::Integer(1))]),
            record([("v", Scalar::from(true))]),
        ]);
        assert_eq!(ds.column_kind("v"), ColumnKind::Text);
    }

    #[test]
    fn scalars_keep_integer_and_float_apart_in_json() {
        let rec: Record = serde_json::from_value(json!({"a": 1, "b": 1.5, "c": "x", "d": null}))
            .unwrap();
        assert_eq!(rec["a"], Scalar::Integer(1));
        assert_eq!(rec["b"], Scalar::Number(1.5));
        assert_eq!(rec["c"], Scalar::Text("x".into()));
        assert!(rec["d"].is_null());
        assert_eq!(serde_json::to_value(&rec).unwrap(), json!({"a": 1, "b": 1.5, "c": "x", "d": null}));
    }

    #[test]
    fn display_formats_like_a_dataframe_cell() {
        assert_eq!(Scalar::Number(5.0).to_string(), "5.0");
        assert_eq!(Scalar::Number(5.25).to_string(), "5.25");
        assert_eq!(Scalar::Integer(7).to_string(), "7");
        assert_eq!(Scalar::Bool(false).to_string(), "False");
        assert_eq!(Scalar::Null.to_string(), "NaN");
    }
}
