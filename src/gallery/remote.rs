//! Cells that fetch their data over HTTP.

use crate::charts::plotly::{Camera, Figure, Layout, Margin, Surface, Vec3};
use crate::charts::vegalite::Chart;
use crate::config::Config;
use crate::data::{DataLoader, LoaderError, TableView};

/// Iris measurements as JSON records (vega-datasets).
pub const IRIS_JSON_URL: &str = "https://cdn.jsdelivr.net/npm/vega-datasets@2/data/iris.json";
/// Iris measurements as headerless CSV (UCI repository).
pub const IRIS_CSV_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/iris/iris.data";
/// Mt Bruno elevation grid.
pub const MT_BRUNO_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/api_docs/mt_bruno_elevation.csv";

/// Petal length vs width, colored by species.
pub fn altair_iris(loader: &DataLoader) -> Result<Chart, LoaderError> {
    altair_iris_from(loader, IRIS_JSON_URL)
}

pub fn altair_iris_from(loader: &DataLoader, url: &str) -> Result<Chart, LoaderError> {
    let iris = loader.fetch_json_records(url)?;
    Ok(Chart::new(iris)
        .mark_point()
        .x("petalLength")
        .y("petalWidth")
        .color("species"))
}

/// The iris CSV as a table. The file has no header row, so the first
/// record names the columns, as a default CSV read does.
pub fn pandas_iris(loader: &DataLoader, config: &Config) -> Result<TableView, LoaderError> {
    pandas_iris_from(loader, config, IRIS_CSV_URL)
}

pub fn pandas_iris_from(loader: &DataLoader, config: &Config, url: &str) -> Result<TableView, LoaderError> {
    let df = loader.fetch_csv(url)?;
    TableView::new(&df, config)
}

/// Mt Bruno elevation surface with a fixed camera.
pub fn plotly_surface(loader: &DataLoader) -> Result<Figure, LoaderError> {
    plotly_surface_from(loader, MT_BRUNO_URL)
}

pub fn plotly_surface_from(loader: &DataLoader, url: &str) -> Result<Figure, LoaderError> {
    let z_data = loader.fetch_csv(url)?;
    let surface = Surface::from_frame(&z_data)?.showscale(false);

    let camera = Camera {
        up: Vec3::new(0.0, 0.0, 1.0),
        center: Vec3::new(0.0, 0.0, 0.0),
        eye: Vec3::new(1.25, 1.25, 1.25),
    };

    Ok(Figure::new(surface)
        .update_layout(
            Layout::new()
                .title("Mt Bruno Elevation")
                .size(500, 500)
                .margin(Margin::new(40, 0, 20, 20)),
        )
        .update_layout(Layout::new().scene_camera(camera)))
}
