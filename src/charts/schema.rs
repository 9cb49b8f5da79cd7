//! Declarative grammar versions recognized by the display layer.

use crate::display::MimeType;

/// A chart grammar version, identified by its `$schema` URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    VegaLiteV5,
    VegaV5,
}

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 2] = [SchemaVersion::VegaLiteV5, SchemaVersion::VegaV5];

    pub fn url(self) -> &'static str {
        match self {
            SchemaVersion::VegaLiteV5 => "https://vega.github.io/schema/vega-lite/v5.json",
            SchemaVersion::VegaV5 => "https://vega.github.io/schema/vega/v5.json",
        }
    }

    pub fn mime_type(self) -> MimeType {
        match self {
            SchemaVersion::VegaLiteV5 => MimeType::VegaLiteV5,
            SchemaVersion::VegaV5 => MimeType::VegaV5,
        }
    }

    /// Exact match only; other versions and patch-pinned URLs are not recognized.
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.url() == url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_exactly_the_two_grammars() {
        assert_eq!(
            SchemaVersion::from_url("https://vega.github.io/schema/vega-lite/v5.json"),
            Some(SchemaVersion::VegaLiteV5)
        );
        assert_eq!(
            SchemaVersion::from_url("https://vega.github.io/schema/vega/v5.json"),
            Some(SchemaVersion::VegaV5)
        );
        assert_eq!(
            SchemaVersion::from_url("https://vega.github.io/schema/vega-lite/v4.17.0.json"),
            None
        );
    }

    #[test]
    fn mime_types_follow_grammar() {
        assert_eq!(SchemaVersion::VegaLiteV5.mime_type(), MimeType::VegaLiteV5);
        assert_eq!(
            SchemaVersion::VegaV5.mime_type().as_str(),
            "application/vnd.vega.v5+json"
        );
    }
}
