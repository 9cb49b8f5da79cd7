//! Display module - MIME bundles and sinks

mod bundle;
mod markdown;
mod mime;
mod sink;

use thiserror::Error;

pub use bundle::{Displayable, MimeBundle};
pub use markdown::Markdown;
pub use mime::MimeType;
pub use sink::{display, display_data, DisplaySink, EvcxrSink, JupyterSink, RecordingSink, Tee};

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Nothing to display: empty bundle")]
    EmptyBundle,
    #[error("No renderer for MIME type(s): {}", .0.join(", "))]
    UnsupportedMime(Vec<String>),
    #[error("Unrecognized chart schema: {0}")]
    UnknownSchema(String),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
