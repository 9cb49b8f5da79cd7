use base64::{engine::general_purpose::STANDARD, Engine};
use chartify_notebook::charts::validate::{check_schema, validate_vega, validate_vegalite};
use chartify_notebook::charts::vega::VegaSpec;
use chartify_notebook::charts::vegalite::VegaLiteSpec;
use chartify_notebook::charts::SchemaVersion;
use chartify_notebook::display::{Displayable, EvcxrSink, JupyterSink, MimeType, RecordingSink};
use chartify_notebook::gallery::{self, Cell, CellContext};
use chartify_notebook::notebook::NotebookReport;
use chartify_notebook::Config;
use serde_json::Value;

fn vegalite_cells() -> Vec<VegaLiteSpec> {
    vec![
        gallery::vegalite_bar(),
        gallery::vegalite_line(),
        gallery::vegalite_scatter(),
    ]
}

#[test]
fn literal_datasets_have_one_record_per_entry() {
    assert_eq!(gallery::bar_data().len(), 5);
    assert_eq!(gallery::line_data().len(), 6);
    assert_eq!(gallery::pie_data().len(), 5);
    assert_eq!(gallery::scatter_data().len(), 5);

    for record in gallery::bar_data().records() {
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["category", "value"]);
    }
}

#[test]
fn every_document_names_exactly_one_recognized_schema() {
    let mut docs: Vec<Value> = vegalite_cells()
        .iter()
        .map(|s| serde_json::to_value(s).unwrap())
        .collect();
    docs.push(serde_json::to_value(gallery::vega_pie()).unwrap());
    docs.push(gallery::vegalite_bar_document());

    for doc in &docs {
        let matches = SchemaVersion::ALL
            .iter()
            .filter(|v| doc["$schema"] == v.url())
            .count();
        assert_eq!(matches, 1, "schema of {doc}");
        assert!(check_schema(doc).is_some());
    }
}

#[test]
fn every_encoding_channel_references_a_present_field() {
    for spec in vegalite_cells() {
        assert_eq!(validate_vegalite(&spec), vec![], "{:?}", spec.description);
    }
    assert!(validate_vega(&gallery::vega_pie()).is_empty());
}

#[test]
fn documents_round_trip_field_for_field() {
    for spec in vegalite_cells() {
        let text = serde_json::to_string(&spec).unwrap();
        let back: VegaLiteSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
        assert_eq!(serde_json::to_value(&back).unwrap(), serde_json::to_value(&spec).unwrap());
    }

    let pie = gallery::vega_pie();
    let back: VegaSpec = serde_json::from_str(&serde_json::to_string(&pie).unwrap()).unwrap();
    assert_eq!(back, pie);

    let parsed: VegaLiteSpec = serde_json::from_value(gallery::vegalite_bar_document()).unwrap();
    assert_eq!(parsed, gallery::vegalite_bar());
}

#[test]
fn bundles_are_tagged_with_the_grammar_mime() {
    let bar = gallery::vegalite_bar().mime_bundle().unwrap();
    assert_eq!(
        bar.get(&MimeType::VegaLiteV5).unwrap(),
        &gallery::vegalite_bar_document()
    );

    let pie = gallery::vega_pie().mime_bundle().unwrap();
    assert_eq!(
        pie.mime_types().next().map(|m| m.as_str()),
        Some("application/vnd.vega.v5+json")
    );
}

#[test]
fn offline_gallery_streams_to_both_sink_kinds() {
    let ctx = CellContext::new(Config::default()).unwrap();

    let mut jupyter = JupyterSink::new(Vec::new());
    let mut evcxr = EvcxrSink::new(Vec::new());
    for cell in Cell::ALL.into_iter().filter(|c| !c.is_remote()) {
        cell.run_into(&ctx, &mut jupyter).unwrap();
        cell.run_into(&ctx, &mut evcxr).unwrap();
    }

    let lines = String::from_utf8(jupyter.into_inner()).unwrap();
    assert_eq!(lines.lines().count(), 6);
    for line in lines.lines() {
        let msg: Value = serde_json::from_str(line).unwrap();
        assert_eq!(msg["output_type"], "display_data");
    }

    let framed = String::from_utf8(evcxr.into_inner()).unwrap();
    assert_eq!(
        framed.matches("EVCXR_BEGIN_CONTENT").count(),
        framed.matches("EVCXR_END_CONTENT").count()
    );
    assert!(framed.contains("EVCXR_BEGIN_CONTENT application/vnd.vega.v5+json\n"));
    assert!(framed.contains("EVCXR_BEGIN_CONTENT text/markdown\n"));
    assert!(framed.contains("EVCXR_BEGIN_CONTENT image/png\n"));
}

#[test]
fn recorded_outputs_export_to_a_notebook() {
    let ctx = CellContext::new(Config::default()).unwrap();
    let mut report = NotebookReport::new();
    for cell in [Cell::VegaLiteScatter, Cell::MarkdownTest] {
        let mut sink = RecordingSink::new();
        cell.run_into(&ctx, &mut sink).unwrap();
        report.push(cell.title(), cell.source(), sink.into_bundles());
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.ipynb");
    report.write_ipynb(&path).unwrap();

    let nb: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let cells = nb["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 4);
    let scatter = &cells[1]["outputs"][0]["data"]["application/vnd.vegalite.v5+json"];
    assert_eq!(scatter["mark"]["size"], 100);
    assert_eq!(scatter["encoding"]["tooltip"].as_array().unwrap().len(), 3);
}

#[test]
fn sine_cell_displays_a_png_at_the_configured_size() {
    let ctx = CellContext::new(Config::default().with_figure_size(320, 240)).unwrap();
    let bundle = Cell::MatplotlibSine.run(&ctx).unwrap();

    let encoded = bundle.get(&MimeType::Png).and_then(Value::as_str).unwrap();
    let png = STANDARD.decode(encoded).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), ctx.config.figure_size);
    assert_eq!(
        bundle.get(&MimeType::Plain).and_then(Value::as_str),
        Some("<Figure size 320x240 with 1 Axes>")
    );
}
