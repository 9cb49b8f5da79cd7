//! Chartify Notebook - rich output gallery for notebook-style hosts
//!
//! Builds datasets, chart documents (Vega, Vega-Lite, Plotly, static plots),
//! tables and markdown, and hands them to a display sink as MIME bundles.

pub mod charts;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod gallery;
pub mod notebook;

pub use config::Config;
pub use error::{Error, Result};
