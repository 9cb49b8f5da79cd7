//! Notebook Report Module
//! Writes displayed outputs into an nbformat 4 `.ipynb` document.
//!
//! Each cell becomes a markdown heading cell followed by a code cell whose
//! outputs are the cell's `display_data` bundles.

use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::display::{display_data, MimeBundle, MimeType};

const NBFORMAT: u32 = 4;
const NBFORMAT_MINOR: u32 = 5;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("Failed to write notebook: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode notebook: {0}")]
    Json(#[from] serde_json::Error),
}

/// One executed cell: its title, source text and displayed outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCell {
    pub title: String,
    pub source: String,
    pub outputs: Vec<MimeBundle>,
}

/// Ordered collection of executed cells.
#[derive(Debug, Clone, Default)]
pub struct NotebookReport {
    cells: Vec<ReportCell>,
}

impl NotebookReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: impl Into<String>, source: impl Into<String>, outputs: Vec<MimeBundle>) {
        self.cells.push(ReportCell {
            title: title.into(),
            source: source.into(),
            outputs,
        });
    }

    pub fn cells(&self) -> &[ReportCell] {
        &self.cells
    }

    pub fn to_json(&self) -> Value {
        let mut cells = Vec::with_capacity(self.cells.len() * 2);
        for (idx, cell) in self.cells.iter().enumerate() {
            cells.push(json!({
                "cell_type": "markdown",
                "id": format!("title-{}", idx + 1),
                "metadata": {},
                "source": split_lines(&format!("## {}", cell.title)),
            }));
            cells.push(json!({
                "cell_type": "code",
                "id": format!("cell-{}", idx + 1),
                "execution_count": idx + 1,
                "metadata": {},
                "source": split_lines(&cell.source),
                "outputs": cell.outputs.iter().map(output_json).collect::<Vec<_>>(),
            }));
        }

        json!({
            "cells": cells,
            "metadata": {
                "kernelspec": {
                    "display_name": "Rust",
                    "language": "rust",
                    "name": "rust",
                },
                "language_info": {
                    "name": "rust",
                    "file_extension": ".rs",
                },
            },
            "nbformat": NBFORMAT,
            "nbformat_minor": NBFORMAT_MINOR,
        })
    }

    pub fn write_ipynb(&self, output_path: &Path) -> Result<(), NotebookError> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(
            path = %output_path.display(),
            cells = self.cells.len(),
            outputs = self.cells.iter().map(|c| c.outputs.len()).sum::<usize>(),
            "notebook written"
        );
        Ok(())
    }
}

/// nbformat stores multi-line text as a list of lines, newlines kept.
fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

fn output_json(bundle: &MimeBundle) -> Value {
    let mut output = display_data(bundle);
    if let Some(Value::Object(data)) = output.get_mut("data") {
        for (mime, payload) in data.iter_mut() {
            if MimeType::from(mime.as_str()).is_json() {
                continue;
            }
            let lines = match payload {
                Value::String(text) if text.contains('\n') => split_lines(text),
                _ => continue,
            };
            *payload = json!(lines);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> NotebookReport {
        let mut report = NotebookReport::new();
        report.push(
            "Vega-Lite bar",
            "let spec = vegalite_bar();\ndisplay(&spec);",
            vec![MimeBundle::raw(MimeType::VegaLiteV5, json!({"mark": "bar"}))],
        );
        report.push(
            "Markdown",
            "display(&markdown_test());",
            vec![MimeBundle::raw(MimeType::Markdown, json!("# A\n\ntext"))],
        );
        report
    }

    #[test]
    fn notebook_layout_follows_nbformat() {
        let nb = report().to_json();
        assert_eq!(nb["nbformat"], 4);
        assert_eq!(nb["nbformat_minor"], 5);

        let cells = nb["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0]["cell_type"], "markdown");
        assert_eq!(cells[0]["source"], json!(["## Vega-Lite bar"]));
        assert_eq!(cells[1]["cell_type"], "code");
        assert_eq!(cells[1]["execution_count"], 1);
        assert_eq!(
            cells[1]["source"],
            json!(["let spec = vegalite_bar();\n", "display(&spec);"])
        );
        assert_eq!(
            cells[1]["outputs"][0]["data"]["application/vnd.vegalite.v5+json"],
            json!({"mark": "bar"})
        );
    }

    #[test]
    fn multi_line_text_outputs_become_line_lists() {
        let nb = report().to_json();
        assert_eq!(
            nb["cells"][3]["outputs"][0]["data"]["text/markdown"],
            json!(["# A\n", "\n", "text"])
        );
    }

    #[test]
    fn json_typed_payloads_are_never_split() {
        let bundle = MimeBundle::raw(MimeType::Json, json!("{\n}"))
            .with(MimeType::Plain, json!("a\nb"));
        let output = output_json(&bundle);
        assert_eq!(output["data"]["application/json"], json!("{\n}"));
        assert_eq!(output["data"]["text/plain"], json!(["a\n", "b"]));
    }

    #[test]
    fn write_ipynb_produces_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.ipynb");
        report().write_ipynb(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report().to_json());
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let err = report()
            .write_ipynb(Path::new("/no/such/dir/out.ipynb"))
            .unwrap_err();
        assert!(matches!(err, NotebookError::Io(_)));
    }
}
