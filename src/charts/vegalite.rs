//! Vega-Lite v5 documents and an Altair-style chart builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::SchemaVersion;
use crate::data::{ColumnKind, Dataset, Record};
use crate::display::{DisplayError, Displayable, MimeBundle, MimeType};

/// Top-level Vega-Lite unit specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegaLiteSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub data: Data,
    pub mark: Mark,
    #[serde(default, skip_serializing_if = "Encoding::is_empty")]
    pub encoding: Encoding,
}

impl VegaLiteSpec {
    pub fn new(data: Data, mark: impl Into<Mark>) -> Self {
        Self {
            schema: SchemaVersion::VegaLiteV5.url().to_string(),
            description: None,
            title: None,
            width: None,
            height: None,
            data,
            mark: mark.into(),
            encoding: Encoding::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Inline records bound to this spec, if the data is not a URL.
    pub fn inline_dataset(&self) -> Option<Dataset> {
        match &self.data {
            Data::Inline { values } => Some(Dataset::from_records(values.clone())),
            Data::Url { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<Value, DisplayError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Displayable for VegaLiteSpec {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        if SchemaVersion::from_url(&self.schema) != Some(SchemaVersion::VegaLiteV5) {
            return Err(DisplayError::UnknownSchema(self.schema.clone()));
        }
        Ok(MimeBundle::raw(MimeType::VegaLiteV5, self.to_json()?)
            .with(MimeType::Plain, Value::String("<VegaLite 5 object>".into())))
    }
}

/// Data reference: inline records or a URL the renderer fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Data {
    Inline { values: Vec<Record> },
    Url { url: String },
}

impl From<Dataset> for Data {
    fn from(ds: Dataset) -> Self {
        Data::Inline {
            values: ds.into_records(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bar,
    Line,
    Point,
    Circle,
    Square,
    Area,
    Arc,
    Rect,
    Tick,
    Rule,
    Text,
}

/// A mark: either the bare type name or a full mark definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mark {
    Type(MarkType),
    Def(MarkDef),
}

impl Mark {
    pub fn mark_type(&self) -> MarkType {
        match self {
            Mark::Type(t) => *t,
            Mark::Def(def) => def.kind,
        }
    }
}

impl From<MarkType> for Mark {
    fn from(t: MarkType) -> Self {
        Mark::Type(t)
    }
}

impl From<MarkDef> for Mark {
    fn from(def: MarkDef) -> Self {
        Mark::Def(def)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "type")]
    pub kind: MarkType,
    /// Overlay point marks on a line or area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<bool>,
    /// Symbol area in square pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MarkDef {
    pub fn new(kind: MarkType) -> Self {
        Self {
            kind,
            point: None,
            size: None,
            tooltip: None,
            color: None,
        }
    }

    pub fn point(mut self, point: bool) -> Self {
        self.point = Some(point);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Measurement type of an encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Nominal,
    Quantitative,
    Ordinal,
    Temporal,
}

impl FieldType {
    /// Altair shorthand suffix: `N`, `Q`, `O`, `T`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" | "nominal" => Some(FieldType::Nominal),
            "Q" | "quantitative" => Some(FieldType::Quantitative),
            "O" | "ordinal" => Some(FieldType::Ordinal),
            "T" | "temporal" => Some(FieldType::Temporal),
            _ => None,
        }
    }
}

/// Encoding channel bound to a data field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl FieldDef {
    pub fn new(field: impl Into<String>, kind: FieldType) -> Self {
        Self {
            field: field.into(),
            kind,
            title: None,
        }
    }

    pub fn nominal(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    pub fn quantitative(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse `field:T` shorthand. Returns the field name and the type, if given.
    pub fn parse_shorthand(shorthand: &str) -> (&str, Option<FieldType>) {
        match shorthand.rsplit_once(':') {
            Some((field, code)) => match FieldType::from_code(code) {
                Some(kind) => (field, Some(kind)),
                None => (shorthand, None),
            },
            None => (shorthand, None),
        }
    }
}

/// One tooltip field or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tooltip {
    Single(FieldDef),
    Multiple(Vec<FieldDef>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<FieldDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<FieldDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FieldDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

impl Encoding {
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.tooltip.is_none()
    }

    /// Every bound channel with its field definition. List tooltips are
    /// named `tooltip[i]`.
    pub fn channels(&self) -> Vec<(String, &FieldDef)> {
        let mut out = Vec::new();
        for (name, def) in [
            ("x", &self.x),
            ("y", &self.y),
            ("color", &self.color),
            ("size", &self.size),
        ] {
            if let Some(def) = def {
                out.push((name.to_string(), def));
            }
        }
        match &self.tooltip {
            Some(Tooltip::Single(def)) => out.push(("tooltip".to_string(), def)),
            Some(Tooltip::Multiple(defs)) => {
                out.extend(defs.iter().enumerate().map(|(i, d)| (format!("tooltip[{i}]"), d)))
            }
            None => {}
        }
        out
    }
}

/// Chart builder over a dataset, in the manner of `alt.Chart(df)`.
///
/// Channels accept `field` or `field:T` shorthand. Without a type suffix the
/// type is inferred from the column: numeric columns are quantitative,
/// everything else nominal.
#[derive(Debug, Clone)]
pub struct Chart {
    data: Dataset,
    mark: Mark,
    encoding: Encoding,
    description: Option<String>,
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

impl Chart {
    pub fn new(data: Dataset) -> Self {
        Self {
            data,
            mark: Mark::Type(MarkType::Point),
            encoding: Encoding::default(),
            description: None,
            title: None,
            width: None,
            height: None,
        }
    }

    pub fn mark(mut self, mark: impl Into<Mark>) -> Self {
        self.mark = mark.into();
        self
    }

    pub fn mark_point(self) -> Self {
        self.mark(MarkType::Point)
    }

    pub fn mark_bar(self) -> Self {
        self.mark(MarkType::Bar)
    }

    pub fn mark_line(self) -> Self {
        self.mark(MarkType::Line)
    }

    pub fn mark_circle(self) -> Self {
        self.mark(MarkType::Circle)
    }

    pub fn mark_area(self) -> Self {
        self.mark(MarkType::Area)
    }

    pub fn x(mut self, shorthand: &str) -> Self {
        self.encoding.x = Some(self.field(shorthand));
        self
    }

    pub fn y(mut self, shorthand: &str) -> Self {
        self.encoding.y = Some(self.field(shorthand));
        self
    }

    pub fn color(mut self, shorthand: &str) -> Self {
        self.encoding.color = Some(self.field(shorthand));
        self
    }

    pub fn size(mut self, shorthand: &str) -> Self {
        self.encoding.size = Some(self.field(shorthand));
        self
    }

    pub fn tooltip(mut self, shorthands: &[&str]) -> Self {
        let defs: Vec<FieldDef> = shorthands.iter().map(|s| self.field(s)).collect();
        self.encoding.tooltip = Some(match <[FieldDef; 1]>::try_from(defs) {
            Ok([single]) => Tooltip::Single(single),
            Err(defs) => Tooltip::Multiple(defs),
        });
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn properties(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    fn field(&self, shorthand: &str) -> FieldDef {
        let (name, kind) = FieldDef::parse_shorthand(shorthand);
        let kind = kind.unwrap_or_else(|| match self.data.column_kind(name) {
            ColumnKind::Numeric => FieldType::Quantitative,
            _ => FieldType::Nominal,
        });
        FieldDef::new(name, kind)
    }

    pub fn to_spec(&self) -> VegaLiteSpec {
        VegaLiteSpec {
            schema: SchemaVersion::VegaLiteV5.url().to_string(),
            description: self.description.clone(),
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            data: Data::from(self.data.clone()),
            mark: self.mark.clone(),
            encoding: self.encoding.clone(),
        }
    }
}

impl Displayable for Chart {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        self.to_spec().mime_bundle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{record, Scalar};
    use serde_json::json;

    fn points() -> Dataset {
        Dataset::from_records(vec![
            record([("petalLength", Scalar::Number(1.4)), ("species", Scalar::from("setosa"))]),
            record([("petalLength", Scalar::Number(4.7)), ("species", Scalar::from("versicolor"))]),
        ])
    }

    #[test]
    fn bare_and_object_marks_serialize_like_the_grammar() {
        assert_eq!(serde_json::to_value(Mark::from(MarkType::Bar)).unwrap(), json!("bar"));
        assert_eq!(
            serde_json::to_value(Mark::from(MarkDef::new(MarkType::Line).point(true))).unwrap(),
            json!({"type": "line", "point": true})
        );
        let parsed: Mark = serde_json::from_value(json!({"type": "circle", "size": 100})).unwrap();
        assert_eq!(parsed, Mark::Def(MarkDef::new(MarkType::Circle).size(100)));
        assert_eq!(parsed.mark_type(), MarkType::Circle);
    }

    #[test]
    fn shorthand_parsing() {
        assert_eq!(
            FieldDef::parse_shorthand("value:Q"),
            ("value", Some(FieldType::Quantitative))
        );
        assert_eq!(FieldDef::parse_shorthand("species"), ("species", None));
        assert_eq!(FieldDef::parse_shorthand("time:12"), ("time:12", None));
    }

    #[test]
    fn chart_infers_types_from_columns() {
        let spec = Chart::new(points())
            .mark_point()
            .x("petalLength")
            .y("petalLength:O")
            .color("species")
            .to_spec();

        assert_eq!(spec.encoding.x, Some(FieldDef::quantitative("petalLength")));
        assert_eq!(spec.encoding.y, Some(FieldDef::new("petalLength", FieldType::Ordinal)));
        assert_eq!(spec.encoding.color, Some(FieldDef::nominal("species")));
        assert_eq!(spec.mark, Mark::Type(MarkType::Point));
        assert_eq!(spec.schema, SchemaVersion::VegaLiteV5.url());
    }

    #[test]
    fn single_tooltip_is_not_wrapped_in_a_list() {
        let chart = Chart::new(points()).tooltip(&["species"]);
        assert_eq!(
            chart.encoding().tooltip,
            Some(Tooltip::Single(FieldDef::nominal("species")))
        );
        let chart = chart.tooltip(&["species", "petalLength"]);
        assert!(matches!(chart.encoding().tooltip, Some(Tooltip::Multiple(ref v)) if v.len() == 2));
    }

    #[test]
    fn channels_list_tooltips_by_position() {
        let encoding = Encoding {
            x: Some(FieldDef::quantitative("x")),
            tooltip: Some(Tooltip::Multiple(vec![
                FieldDef::nominal("label"),
                FieldDef::quantitative("x"),
            ])),
            ..Encoding::default()
        };
        let names: Vec<String> = encoding.channels().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["x", "tooltip[0]", "tooltip[1]"]);
    }

    #[test]
    fn url_data_round_trips() {
        let spec = VegaLiteSpec::new(
            Data::Url {
                url: "data/cars.json".into(),
            },
            MarkType::Tick,
        );
        let text = serde_json::to_string(&spec).unwrap();
        let back: VegaLiteSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
        assert!(back.inline_dataset().is_none());
        assert!(!text.contains("encoding"));
    }

    #[test]
    fn bundle_rejects_foreign_schema() {
        let mut spec = Chart::new(points()).to_spec();
        assert!(spec.mime_bundle().unwrap().get(&MimeType::VegaLiteV5).is_some());

        spec.schema = "https://vega.github.io/schema/vega-lite/v4.json".into();
        assert!(matches!(spec.mime_bundle(), Err(DisplayError::UnknownSchema(_))));
    }
}
