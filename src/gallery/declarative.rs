//! Hand-written Vega and Vega-Lite documents with literal data.

use serde_json::json;

use crate::charts::vega::{Scale, ScaleDomain, ScaleRange, Transform, ValueRef, VegaData, VegaMark, VegaSpec};
use crate::charts::vegalite::{Data, Encoding, FieldDef, MarkDef, MarkType, Tooltip, VegaLiteSpec};
use crate::data::{record, DataLoader, Dataset, Scalar};

/// Five categories with integer values.
pub fn bar_data() -> Dataset {
    DataLoader::from_literal(
        [("A", 28), ("B", 55), ("C", 43), ("D", 91), ("E", 81)]
            .into_iter()
            .map(|(category, value)| {
                record([("category", Scalar::from(category)), ("value", Scalar::Integer(value))])
            })
            .collect(),
    )
}

/// Simple bar chart, colored by category.
pub fn vegalite_bar() -> VegaLiteSpec {
    VegaLiteSpec::new(Data::from(bar_data()), MarkType::Bar)
        .description("A simple bar chart")
        .encoding(Encoding {
            x: Some(FieldDef::nominal("category")),
            y: Some(FieldDef::quantitative("value")),
            color: Some(FieldDef::nominal("category")),
            ..Encoding::default()
        })
}

pub fn line_data() -> Dataset {
    DataLoader::from_literal(
        [(0, 0), (1, 2), (2, 1), (3, 4), (4, 3), (5, 6)]
            .into_iter()
            .map(|(x, y)| record([("x", Scalar::Integer(x)), ("y", Scalar::Integer(y))]))
            .collect(),
    )
}

/// Line chart with point overlay.
pub fn vegalite_line() -> VegaLiteSpec {
    VegaLiteSpec::new(Data::from(line_data()), MarkDef::new(MarkType::Line).point(true))
        .description("A line chart with points")
        .encoding(Encoding {
            x: Some(FieldDef::quantitative("x")),
            y: Some(FieldDef::quantitative("y")),
            ..Encoding::default()
        })
}

pub fn pie_data() -> Dataset {
    DataLoader::from_literal(
        [(1, 4), (2, 6), (3, 10), (4, 3), (5, 7)]
            .into_iter()
            .map(|(id, field)| record([("id", Scalar::Integer(id)), ("field", Scalar::Integer(field))]))
            .collect(),
    )
}

/// Full Vega pie chart: signal-driven pie transform, ordinal color scale, arc mark.
pub fn vega_pie() -> VegaSpec {
    VegaSpec::new()
        .description("A basic pie chart")
        .size(200, 200)
        .autosize("none")
        .signal("startAngle", 0)
        .signal("endAngle", 6.29)
        .signal("padAngle", 0.02)
        .signal("innerRadius", 0)
        .signal("sort", true)
        .data(
            VegaData::inline("table", pie_data()).transform(
                Transform::pie("field")
                    .signal_param("startAngle", "startAngle")
                    .signal_param("endAngle", "endAngle")
                    .signal_param("sort", "sort"),
            ),
        )
        .scale(Scale::ordinal(
            "color",
            ScaleDomain::Data {
                data: "table".to_string(),
                field: "id".to_string(),
            },
            ScaleRange::Scheme {
                scheme: "category20".to_string(),
            },
        ))
        .mark(
            VegaMark::new("arc")
                .from_data("table")
                .enter("fill", ValueRef::scaled("color", "id"))
                .enter("x", ValueRef::signal("width / 2"))
                .enter("y", ValueRef::signal("height / 2"))
                .update("startAngle", ValueRef::field("startAngle"))
                .update("endAngle", ValueRef::field("endAngle"))
                .update("padAngle", ValueRef::signal("padAngle"))
                .update("innerRadius", ValueRef::signal("innerRadius"))
                .update("outerRadius", ValueRef::signal("width / 2")),
        )
}

pub fn scatter_data() -> Dataset {
    DataLoader::from_literal(
        [(1, 2, "A"), (2, 5, "B"), (3, 3, "C"), (4, 8, "D"), (5, 6, "E")]
            .into_iter()
            .map(|(x, y, label)| {
                record([
                    ("x", Scalar::Integer(x)),
                    ("y", Scalar::Integer(y)),
                    ("label", Scalar::from(format!("Point {label}"))),
                ])
            })
            .collect(),
    )
}

/// Scatter plot with titled axes and a three-field tooltip.
pub fn vegalite_scatter() -> VegaLiteSpec {
    VegaLiteSpec::new(Data::from(scatter_data()), MarkDef::new(MarkType::Circle).size(100))
        .description("Scatter plot with tooltips")
        .encoding(Encoding {
            x: Some(FieldDef::quantitative("x").title("X Axis")),
            y: Some(FieldDef::quantitative("y").title("Y Axis")),
            color: Some(FieldDef::nominal("label")),
            tooltip: Some(Tooltip::Multiple(vec![
                FieldDef::nominal("label"),
                FieldDef::quantitative("x"),
                FieldDef::quantitative("y"),
            ])),
            ..Encoding::default()
        })
}

/// The bar chart as a raw JSON document, the way it is written by hand.
pub fn vegalite_bar_document() -> serde_json::Value {
    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "description": "A simple bar chart",
        "data": {
            "values": [
                {"category": "A", "value": 28},
                {"category": "B", "value": 55},
                {"category": "C", "value": 43},
                {"category": "D", "value": 91},
                {"category": "E", "value": 81},
            ]
        },
        "mark": "bar",
        "encoding": {
            "x": {"field": "category", "type": "nominal"},
            "y": {"field": "value", "type": "quantitative"},
            "color": {"field": "category", "type": "nominal"}
        }
    })
}
