//! MIME bundles: the payload handed to a display sink.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::mime::MimeType;
use super::DisplayError;

/// Ordered map from MIME type to payload.
///
/// JSON grammars keep their document as a JSON value; text and base64 image
/// payloads are JSON strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MimeBundle {
    entries: IndexMap<MimeType, Value>,
}

impl MimeBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry bundle, like `display({mime: payload}, raw=True)`.
    pub fn raw(mime: impl Into<MimeType>, payload: Value) -> Self {
        let mut bundle = Self::new();
        bundle.insert(mime.into(), payload);
        bundle
    }

    /// Single-entry bundle holding a serializable document.
    pub fn from_document<T: Serialize>(mime: MimeType, doc: &T) -> Result<Self, DisplayError> {
        Ok(Self::raw(mime, serde_json::to_value(doc)?))
    }

    pub fn insert(&mut self, mime: MimeType, payload: Value) -> Option<Value> {
        self.entries.insert(mime, payload)
    }

    pub fn with(mut self, mime: MimeType, payload: Value) -> Self {
        self.insert(mime, payload);
        self
    }

    pub fn get(&self, mime: &MimeType) -> Option<&Value> {
        self.entries.get(mime)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MimeType, &Value)> {
        self.entries.iter()
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &MimeType> {
        self.entries.keys()
    }

    /// Entries a front end can render.
    pub fn supported(&self) -> impl Iterator<Item = (&MimeType, &Value)> {
        self.entries.iter().filter(|(m, _)| m.is_supported())
    }

    /// Check the bundle can be shown at all.
    pub fn ensure_renderable(&self) -> Result<(), DisplayError> {
        if self.entries.is_empty() {
            return Err(DisplayError::EmptyBundle);
        }
        if self.supported().next().is_none() {
            return Err(DisplayError::UnsupportedMime(
                self.entries.keys().map(|m| m.to_string()).collect(),
            ));
        }
        Ok(())
    }

    /// The bundle as a JSON object keyed by MIME string.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(mime, payload)| (mime.to_string(), payload.clone()))
                .collect(),
        )
    }
}

impl Serialize for MimeBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (mime, payload) in &self.entries {
            map.serialize_entry(mime.as_str(), payload)?;
        }
        map.end()
    }
}

/// Anything that knows how to present itself as a MIME bundle.
pub trait Displayable {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError>;
}

impl Displayable for MimeBundle {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_bundle_has_one_entry() {
        let bundle = MimeBundle::raw("application/vnd.vegalite.v5+json", json!({"mark": "bar"}));
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get(&MimeType::VegaLiteV5), Some(&json!({"mark": "bar"})));
    }

    #[test]
    fn serializes_keyed_by_mime_string_in_insertion_order() {
        let bundle = MimeBundle::new()
            .with(MimeType::Markdown, json!("# hi"))
            .with(MimeType::Plain, json!("hi"));
        let text = serde_json::to_string(&bundle).unwrap();
        assert_eq!(text, r##"{"text/markdown":"# hi","text/plain":"hi"}"##);
        assert_eq!(bundle.to_json(), json!({"text/plain": "hi", "text/markdown": "# hi"}));
    }

    #[test]
    fn renderable_checks() {
        assert!(matches!(
            MimeBundle::new().ensure_renderable(),
            Err(DisplayError::EmptyBundle)
        ));

        let odd = MimeBundle::raw("application/x-unknown", json!(1));
        match odd.ensure_renderable() {
            Err(DisplayError::UnsupportedMime(types)) => {
                assert_eq!(types, vec!["application/x-unknown".to_string()])
            }
            other => panic!("unexpected: {other:?}"),
        }

        let mixed = odd.with(MimeType::Plain, json!("1"));
        assert!(mixed.ensure_renderable().is_ok());
        assert_eq!(mixed.supported().count(), 1);
    }
}
