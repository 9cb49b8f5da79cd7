//! MIME types understood by notebook front ends.

use std::fmt;
use std::str::FromStr;

/// Content type tag attached to a display payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MimeType {
    VegaLiteV5,
    VegaV5,
    PlotlyV1,
    DataResource,
    Markdown,
    Html,
    Plain,
    Png,
    Svg,
    Json,
    /// Anything else; sinks refuse to render it.
    Other(String),
}

impl MimeType {
    pub const KNOWN: [MimeType; 10] = [
        MimeType::VegaLiteV5,
        MimeType::VegaV5,
        MimeType::PlotlyV1,
        MimeType::DataResource,
        MimeType::Markdown,
        MimeType::Html,
        MimeType::Plain,
        MimeType::Png,
        MimeType::Svg,
        MimeType::Json,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MimeType::VegaLiteV5 => "application/vnd.vegalite.v5+json",
            MimeType::VegaV5 => "application/vnd.vega.v5+json",
            MimeType::PlotlyV1 => "application/vnd.plotly.v1+json",
            MimeType::DataResource => "application/vnd.dataresource+json",
            MimeType::Markdown => "text/markdown",
            MimeType::Html => "text/html",
            MimeType::Plain => "text/plain",
            MimeType::Png => "image/png",
            MimeType::Svg => "image/svg+xml",
            MimeType::Json => "application/json",
            MimeType::Other(s) => s,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, MimeType::Other(_))
    }

    /// JSON-valued types keep their payload as a JSON document; the rest are strings.
    pub fn is_json(&self) -> bool {
        self.as_str().ends_with("json")
    }
}

impl FromStr for MimeType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MimeType::KNOWN
            .iter()
            .find(|m| m.as_str() == s)
            .cloned()
            .unwrap_or_else(|| MimeType::Other(s.to_string())))
    }
}

impl From<&str> for MimeType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(m) => m,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_round_trip_through_strings() {
        for mime in MimeType::KNOWN {
            assert_eq!(MimeType::from(mime.as_str()), mime);
            assert!(mime.is_supported());
        }
    }

    #[test]
    fn unknown_type_is_other() {
        let mime = MimeType::from("application/x-made-up");
        assert_eq!(mime, MimeType::Other("application/x-made-up".into()));
        assert!(!mime.is_supported());
    }

    #[test]
    fn json_detection() {
        assert!(MimeType::VegaLiteV5.is_json());
        assert!(MimeType::DataResource.is_json());
        assert!(!MimeType::Png.is_json());
        assert!(!MimeType::Svg.is_json());
    }
}
