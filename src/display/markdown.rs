//! Markdown output.

use pulldown_cmark::{html, Options, Parser};
use serde_json::Value;

use super::bundle::{Displayable, MimeBundle};
use super::mime::MimeType;
use super::DisplayError;

/// Markdown source shown as a rich cell output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
    source: String,
}

impl Markdown {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// HTML fallback for front ends without a markdown renderer.
    pub fn to_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(&self.source, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}

impl Displayable for Markdown {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        Ok(MimeBundle::raw(MimeType::Markdown, Value::String(self.source.clone()))
            .with(MimeType::Html, Value::String(self.to_html()))
            .with(MimeType::Plain, Value::String(self.source.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_emphasis_and_tables() {
        let md = Markdown::new("# Title\n\n**bold** and *it*\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        let html = md.to_html();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>it</em>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn bundle_carries_source_and_html() {
        let bundle = Markdown::new("`code`").mime_bundle().unwrap();
        assert_eq!(bundle.get(&MimeType::Markdown), Some(&Value::String("`code`".into())));
        let html = bundle.get(&MimeType::Html).and_then(Value::as_str).unwrap();
        assert!(html.contains("<code>code</code>"));
        assert_eq!(bundle.len(), 3);
    }
}
