//! Charts module - declarative grammars and static rendering

pub mod plotly;
mod plotter;
mod renderer;
mod schema;
pub mod validate;
pub mod vega;
pub mod vegalite;

pub use plotter::{linspace, LinePlot, Series, PALETTE};
pub use renderer::{RenderError, RenderedPlot, StaticChartRenderer};
pub use schema::SchemaVersion;
