//! Display sinks: where bundles go once built.

use serde_json::{json, Value};
use std::io::Write;
use tracing::debug;

use super::bundle::{Displayable, MimeBundle};
use super::DisplayError;

/// Output mechanism of the hosting environment.
pub trait DisplaySink {
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError> {
        (**self).display(bundle)
    }
}

/// Build the bundle for `item` and send it to `sink`.
pub fn display<S, D>(sink: &mut S, item: &D) -> Result<(), DisplayError>
where
    S: DisplaySink + ?Sized,
    D: Displayable + ?Sized,
{
    let bundle = item.mime_bundle()?;
    sink.display(bundle)
}

/// nbformat `display_data` output for a bundle. Unsupported entries are left out.
pub fn display_data(bundle: &MimeBundle) -> Value {
    let data: serde_json::Map<String, Value> = bundle
        .supported()
        .map(|(mime, payload)| (mime.to_string(), payload.clone()))
        .collect();
    json!({
        "output_type": "display_data",
        "data": data,
        "metadata": {},
    })
}

/// Writes one nbformat `display_data` JSON object per line.
pub struct JupyterSink<W: Write> {
    out: W,
}

impl<W: Write> JupyterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for JupyterSink<W> {
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError> {
        bundle.ensure_renderable()?;
        debug!(mimes = bundle.len(), "display_data");
        serde_json::to_writer(&mut self.out, &display_data(&bundle))?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes `EVCXR_BEGIN_CONTENT` blocks, the rich output framing of the
/// Rust Jupyter kernel. Unsupported entries are skipped.
pub struct EvcxrSink<W: Write> {
    out: W,
}

impl<W: Write> EvcxrSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for EvcxrSink<W> {
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError> {
        bundle.ensure_renderable()?;
        for (mime, payload) in bundle.supported() {
            let body = match payload {
                Value::String(s) => s.clone(),
                other => serde_json::to_string(other)?,
            };
            writeln!(self.out, "EVCXR_BEGIN_CONTENT {mime}")?;
            writeln!(self.out, "{body}")?;
            writeln!(self.out, "EVCXR_END_CONTENT")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every displayed bundle in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    bundles: Vec<MimeBundle>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bundles(&self) -> &[MimeBundle] {
        &self.bundles
    }

    pub fn into_bundles(self) -> Vec<MimeBundle> {
        self.bundles
    }
}

impl DisplaySink for RecordingSink {
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError> {
        bundle.ensure_renderable()?;
        self.bundles.push(bundle);
        Ok(())
    }
}

/// Sends every bundle to two sinks in turn.
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: DisplaySink, B: DisplaySink> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: DisplaySink, B: DisplaySink> DisplaySink for Tee<A, B> {
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError> {
        self.first.display(bundle.clone())?;
        self.second.display(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MimeType;

    fn bar_bundle() -> MimeBundle {
        MimeBundle::raw(MimeType::VegaLiteV5, json!({"mark": "bar"}))
            .with(MimeType::Plain, json!("chart"))
    }

    #[test]
    fn jupyter_sink_writes_display_data_lines() {
        let mut sink = JupyterSink::new(Vec::new());
        sink.display(bar_bundle()).unwrap();
        sink.display(MimeBundle::raw(MimeType::Markdown, json!("# x"))).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["output_type"], "display_data");
        assert_eq!(lines[0]["data"]["application/vnd.vegalite.v5+json"]["mark"], "bar");
        assert_eq!(lines[1]["data"]["text/markdown"], "# x");
    }

    #[test]
    fn evcxr_sink_frames_each_supported_entry() {
        let mut sink = EvcxrSink::new(Vec::new());
        let bundle = bar_bundle().with(MimeType::Other("x/unknown".into()), json!("skip"));
        sink.display(bundle).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "EVCXR_BEGIN_CONTENT application/vnd.vegalite.v5+json\n{\"mark\":\"bar\"}\nEVCXR_END_CONTENT\n\
             EVCXR_BEGIN_CONTENT text/plain\nchart\nEVCXR_END_CONTENT\n"
        );
    }

    #[test]
    fn jupyter_sink_drops_unsupported_entries_like_evcxr() {
        let bundle = bar_bundle().with(MimeType::Other("x/unknown".into()), json!("skip"));
        let mut sink = JupyterSink::new(Vec::new());
        sink.display(bundle.clone()).unwrap();

        let line: Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        let data = line["data"].as_object().unwrap();
        assert_eq!(data.len(), 2);
        assert!(!data.contains_key("x/unknown"));
        assert_eq!(display_data(&bundle)["data"], line["data"]);
    }

    #[test]
    fn sinks_reject_unsupported_bundles() {
        let mut sink = RecordingSink::new();
        let err = sink
            .display(MimeBundle::raw("application/x-nope", json!({})))
            .unwrap_err();
        assert!(matches!(err, DisplayError::UnsupportedMime(_)));
        assert!(sink.bundles().is_empty());

        let mut jupyter = JupyterSink::new(Vec::new());
        assert!(jupyter.display(MimeBundle::new()).is_err());
        assert!(jupyter.into_inner().is_empty());
    }

    #[test]
    fn display_helper_and_tee_record_the_same_bundle() {
        let mut tee = Tee::new(RecordingSink::new(), RecordingSink::new());
        display(&mut tee, &bar_bundle()).unwrap();
        let (a, b) = tee.into_parts();
        assert_eq!(a.bundles(), b.bundles());
        assert_eq!(a.bundles().len(), 1);
    }
}
