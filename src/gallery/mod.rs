//! Gallery module - the example cells
//!
//! Every cell is independent: it builds its own data, builds one output and
//! returns it. Nothing is shared between cells except the loader's HTTP client.

mod declarative;
mod local;
mod remote;

pub use declarative::{
    bar_data, line_data, pie_data, scatter_data, vega_pie, vegalite_bar, vegalite_bar_document,
    vegalite_line, vegalite_scatter,
};
pub use local::{markdown_test, matplotlib_sine, sine_plot, MARKDOWN_SAMPLE};
pub use remote::{
    altair_iris, altair_iris_from, pandas_iris, pandas_iris_from, plotly_surface,
    plotly_surface_from, IRIS_CSV_URL, IRIS_JSON_URL, MT_BRUNO_URL,
};

use tracing::debug;

use crate::config::Config;
use crate::data::DataLoader;
use crate::display::{DisplaySink, Displayable, MimeBundle};
use crate::error::Result;

/// Shared inputs for running cells.
pub struct CellContext {
    pub config: Config,
    pub loader: DataLoader,
}

impl CellContext {
    pub fn new(config: Config) -> Result<Self> {
        let loader = DataLoader::new(&config)?;
        Ok(Self { config, loader })
    }
}

/// The gallery cells, in notebook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    VegaLiteBar,
    VegaLiteLine,
    VegaPie,
    VegaLiteScatter,
    AltairIris,
    PandasIris,
    PlotlySurface,
    MatplotlibSine,
    MarkdownTest,
}

impl Cell {
    pub const ALL: [Cell; 9] = [
        Cell::VegaLiteBar,
        Cell::VegaLiteLine,
        Cell::VegaPie,
        Cell::VegaLiteScatter,
        Cell::AltairIris,
        Cell::PandasIris,
        Cell::PlotlySurface,
        Cell::MatplotlibSine,
        Cell::MarkdownTest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cell::VegaLiteBar => "vegalite_bar",
            Cell::VegaLiteLine => "vegalite_line",
            Cell::VegaPie => "vega_pie",
            Cell::VegaLiteScatter => "vegalite_scatter",
            Cell::AltairIris => "altair_iris",
            Cell::PandasIris => "pandas_iris",
            Cell::PlotlySurface => "plotly_surface",
            Cell::MatplotlibSine => "matplotlib_sine",
            Cell::MarkdownTest => "markdown_test",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Cell::VegaLiteBar => "Vega-Lite 5 - Simple Bar Chart",
            Cell::VegaLiteLine => "Vega-Lite 5 - Line Chart",
            Cell::VegaPie => "Vega 5 - Arc/Pie Chart",
            Cell::VegaLiteScatter => "Vega-Lite 5 - Scatter Plot with Tooltips",
            Cell::AltairIris => "Iris Scatter (vega-datasets)",
            Cell::PandasIris => "Iris Table (table schema)",
            Cell::PlotlySurface => "Plotly 3D Surface",
            Cell::MatplotlibSine => "Static Sine Plot",
            Cell::MarkdownTest => "Test Markdown Output",
        }
    }

    /// Whether the cell fetches data over the network.
    pub fn is_remote(self) -> bool {
        matches!(self, Cell::AltairIris | Cell::PandasIris | Cell::PlotlySurface)
    }

    /// Call shown as the cell's source in exported notebooks.
    pub fn source(self) -> String {
        let args = match self {
            Cell::AltairIris | Cell::PlotlySurface => "&ctx.loader",
            Cell::PandasIris => "&ctx.loader, &ctx.config",
            Cell::MatplotlibSine => "&ctx.config",
            _ => "",
        };
        let fallible = if self.is_remote() || self == Cell::MatplotlibSine { "?" } else { "" };
        format!("display(&mut sink, &gallery::{}({args}){fallible})?;", self.name())
    }

    pub fn run(self, ctx: &CellContext) -> Result<MimeBundle> {
        debug!(cell = self.name(), "running cell");
        let bundle = match self {
            Cell::VegaLiteBar => vegalite_bar().mime_bundle()?,
            Cell::VegaLiteLine => vegalite_line().mime_bundle()?,
            Cell::VegaPie => vega_pie().mime_bundle()?,
            Cell::VegaLiteScatter => vegalite_scatter().mime_bundle()?,
            Cell::AltairIris => altair_iris(&ctx.loader)?.mime_bundle()?,
            Cell::PandasIris => pandas_iris(&ctx.loader, &ctx.config)?.mime_bundle()?,
            Cell::PlotlySurface => plotly_surface(&ctx.loader)?.mime_bundle()?,
            Cell::MatplotlibSine => matplotlib_sine(&ctx.config)?.mime_bundle()?,
            Cell::MarkdownTest => markdown_test().mime_bundle()?,
        };
        Ok(bundle)
    }

    /// Run the cell and send its output to `sink`.
    pub fn run_into<S: DisplaySink + ?Sized>(self, ctx: &CellContext, sink: &mut S) -> Result<()> {
        let bundle = self.run(ctx)?;
        sink.display(bundle)?;
        Ok(())
    }
}
