//! Vega v5 documents: signals, data with transforms, scales and marks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::SchemaVersion;
use crate::data::{Dataset, Record};
use crate::display::{DisplayError, Displayable, MimeBundle, MimeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegaSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosize: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<VegaData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scales: Vec<Scale>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<VegaMark>,
}

impl VegaSpec {
    pub fn new() -> Self {
        Self {
            schema: SchemaVersion::VegaV5.url().to_string(),
            description: None,
            width: None,
            height: None,
            autosize: None,
            signals: Vec::new(),
            data: Vec::new(),
            scales: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn autosize(mut self, autosize: impl Into<String>) -> Self {
        self.autosize = Some(autosize.into());
        self
    }

    pub fn signal(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.signals.push(Signal {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn data(mut self, data: VegaData) -> Self {
        self.data.push(data);
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scales.push(scale);
        self
    }

    pub fn mark(mut self, mark: VegaMark) -> Self {
        self.marks.push(mark);
        self
    }

    pub fn dataset(&self, name: &str) -> Option<&VegaData> {
        self.data.iter().find(|d| d.name == name)
    }
}

impl Default for VegaSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl Displayable for VegaSpec {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        if SchemaVersion::from_url(&self.schema) != Some(SchemaVersion::VegaV5) {
            return Err(DisplayError::UnknownSchema(self.schema.clone()));
        }
        Ok(MimeBundle::from_document(MimeType::VegaV5, self)?
            .with(MimeType::Plain, Value::String("<Vega 5 object>".into())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub value: Value,
}

/// Named data source with optional inline values and transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegaData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Record>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl VegaData {
    pub fn inline(name: impl Into<String>, values: Dataset) -> Self {
        Self {
            name: name.into(),
            values: Some(values.into_records()),
            url: None,
            transform: Vec::new(),
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }

    /// Fields visible to marks reading this source: value columns plus
    /// fields the transforms emit.
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self
            .values
            .as_ref()
            .map(|v| Dataset::from_records(v.clone()).columns().to_vec())
            .unwrap_or_default();
        for t in &self.transform {
            for f in t.output_fields() {
                if !fields.contains(&f) {
                    fields.push(f);
                }
            }
        }
        fields
    }
}

/// Data transform. Parameters beyond `type` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub params: IndexMap<String, Value>,
}

impl Transform {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: IndexMap::new(),
        }
    }

    /// Pie layout over `field`.
    pub fn pie(field: impl Into<String>) -> Self {
        Self::new("pie").param("field", Value::String(field.into()))
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parameter bound to a signal: `{"signal": name}`.
    pub fn signal_param(self, key: impl Into<String>, signal: &str) -> Self {
        self.param(key, serde_json::json!({ "signal": signal }))
    }

    /// Fields this transform adds to each datum.
    pub fn output_fields(&self) -> Vec<String> {
        match self.params.get("as") {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ if self.kind == "pie" => vec!["startAngle".to_string(), "endAngle".to_string()],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub domain: ScaleDomain,
    pub range: ScaleRange,
}

impl Scale {
    pub fn ordinal(name: impl Into<String>, domain: ScaleDomain, range: ScaleRange) -> Self {
        Self {
            name: name.into(),
            kind: "ordinal".to_string(),
            domain,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleDomain {
    Data { data: String, field: String },
    Values(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleRange {
    Scheme { scheme: String },
    Named(String),
    Values(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegaMark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "from", default, skip_serializing_if = "Option::is_none")]
    pub from_data: Option<MarkFrom>,
    #[serde(default)]
    pub encode: EncodeSets,
}

impl VegaMark {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            from_data: None,
            encode: EncodeSets::default(),
        }
    }

    pub fn from_data(mut self, data: impl Into<String>) -> Self {
        self.from_data = Some(MarkFrom { data: data.into() });
        self
    }

    pub fn enter(mut self, channel: impl Into<String>, value: ValueRef) -> Self {
        self.encode
            .enter
            .get_or_insert_with(IndexMap::new)
            .insert(channel.into(), value);
        self
    }

    pub fn update(mut self, channel: impl Into<String>, value: ValueRef) -> Self {
        self.encode
            .update
            .get_or_insert_with(IndexMap::new)
            .insert(channel.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkFrom {
    pub data: String,
}

/// Encoding property sets evaluated on enter, update and hover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodeSets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<IndexMap<String, ValueRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<IndexMap<String, ValueRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<IndexMap<String, ValueRef>>,
}

impl EncodeSets {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValueRef)> {
        [&self.enter, &self.update, &self.hover]
            .into_iter()
            .flatten()
            .flat_map(|set| set.iter())
    }
}

/// Visual property value: a scaled field, a field, a signal expression or a literal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValueRef {
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn scaled(scale: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            scale: Some(scale.into()),
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn signal(expr: impl Into<String>) -> Self {
        Self {
            signal: Some(expr.into()),
            ..Self::default()
        }
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }
}
