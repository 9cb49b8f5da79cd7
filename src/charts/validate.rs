//! Field-reference checks for declarative chart documents.
//!
//! Builders never call these; renderers are the ones that reject bad
//! documents. The checks exist so callers can verify a document up front.

use serde_json::Value;
use std::fmt;

use super::schema::SchemaVersion;
use super::vega::{ScaleDomain, VegaSpec};
use super::vegalite::{FieldType, VegaLiteSpec};
use crate::data::ColumnKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Channel names a field the bound data does not have.
    UnknownField { channel: String, field: String },
    /// Quantitative channel bound to a non-numeric field.
    NotNumeric { channel: String, field: String },
    /// Mark or scale reads from a data source that is not declared.
    UnknownData { referrer: String, data: String },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::UnknownField { channel, field } => {
                write!(f, "channel `{channel}` references unknown field `{field}`")
            }
            FieldIssue::NotNumeric { channel, field } => {
                write!(f, "channel `{channel}` is quantitative but `{field}` is not numeric")
            }
            FieldIssue::UnknownData { referrer, data } => {
                write!(f, "`{referrer}` reads undeclared data `{data}`")
            }
        }
    }
}

/// Schema version named by a raw JSON document's `$schema`, if recognized.
pub fn check_schema(doc: &Value) -> Option<SchemaVersion> {
    doc.get("$schema")
        .and_then(Value::as_str)
        .and_then(SchemaVersion::from_url)
}

/// Check every encoding channel against the inline dataset. Specs that load
/// data from a URL cannot be checked and yield no issues.
pub fn validate_vegalite(spec: &VegaLiteSpec) -> Vec<FieldIssue> {
    let Some(data) = spec.inline_dataset() else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for (channel, def) in spec.encoding.channels() {
        if !data.has_column(&def.field) {
            issues.push(FieldIssue::UnknownField {
                channel,
                field: def.field.clone(),
            });
            continue;
        }
        if def.kind == FieldType::Quantitative
            && !matches!(data.column_kind(&def.field), ColumnKind::Numeric | ColumnKind::Empty)
        {
            issues.push(FieldIssue::NotNumeric {
                channel,
                field: def.field.clone(),
            });
        }
    }
    issues
}

/// Check marks and scales against the fields their data sources expose
/// (values plus transform outputs).
pub fn validate_vega(spec: &VegaSpec) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    for scale in &spec.scales {
        if let ScaleDomain::Data { data, field } = &scale.domain {
            check_field(spec, &format!("scale {}", scale.name), data, field, &mut issues);
        }
    }

    for (i, mark) in spec.marks.iter().enumerate() {
        let Some(from) = &mark.from_data else {
            continue;
        };
        for (channel, value) in mark.encode.iter() {
            if let Some(field) = &value.field {
                let referrer = format!("marks[{i}].{channel}");
                check_field(spec, &referrer, &from.data, field, &mut issues);
            }
        }
    }
    issues
}

fn check_field(spec: &VegaSpec, referrer: &str, data: &str, field: &str, issues: &mut Vec<FieldIssue>) {
    let Some(source) = spec.dataset(data) else {
        issues.push(FieldIssue::UnknownData {
            referrer: referrer.to_string(),
            data: data.to_string(),
        });
        return;
    };
    // URL-backed sources have unknown columns
    if source.values.is_none() {
        return;
    }
    if !source.fields().iter().any(|f| f == field) {
        issues.push(FieldIssue::UnknownField {
            channel: referrer.to_string(),
            field: field.to_string(),
        });
    }
}
