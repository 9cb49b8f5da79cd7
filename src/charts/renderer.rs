//! Static Chart Renderer
//! Draws a [`LinePlot`] with plotters into PNG bytes or an SVG document.
//!
//! Layout: optional caption on top, mesh with tick labels on the left and
//! bottom, then one line per series in palette order.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde_json::Value;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

use super::plotter::LinePlot;
use crate::display::{DisplayError, Displayable, MimeBundle, MimeType};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to draw: plot has no finite points")]
    EmptyPlot,
    #[error("Invalid figure size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image encoding failed: {0}")]
    Encoding(#[from] image::ImageError),
}

fn drawing_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// A plot rendered to a raster image, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPlot {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Displayable for RenderedPlot {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        Ok(MimeBundle::raw(MimeType::Png, Value::String(STANDARD.encode(&self.png))).with(
            MimeType::Plain,
            Value::String(format!(
                "<Figure size {}x{} with 1 Axes>",
                self.width, self.height
            )),
        ))
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render to PNG through an RGB buffer.
    pub fn render_png(plot: &LinePlot, size: (u32, u32)) -> Result<RenderedPlot, RenderError> {
        let (width, height) = Self::check_size(size)?;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, plot)?;
            root.present().map_err(drawing_err)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Drawing("pixel buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        debug!(width, height, bytes = png.len(), "rendered png");
        Ok(RenderedPlot { png, width, height })
    }

    /// Render to an SVG document.
    pub fn render_svg(plot: &LinePlot, size: (u32, u32)) -> Result<String, RenderError> {
        let size = Self::check_size(size)?;
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            Self::draw(&root, plot)?;
            root.present().map_err(drawing_err)?;
        }
        Ok(svg)
    }

    fn check_size((width, height): (u32, u32)) -> Result<(u32, u32), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize(width, height));
        }
        Ok((width, height))
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        plot: &LinePlot,
    ) -> Result<(), RenderError> {
        let ((x0, x1), (y0, y1)) = plot.bounds().ok_or(RenderError::EmptyPlot)?;
        root.fill(&WHITE).map_err(drawing_err)?;

        let mut builder = ChartBuilder::on(root);
        builder.margin(12);
        if plot.show_axes {
            if let Some(title) = &plot.title {
                builder.caption(title, ("sans-serif", 20));
            }
            builder.x_label_area_size(32).y_label_area_size(44);
        }
        let mut chart = builder
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(drawing_err)?;

        if plot.show_axes {
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh();
            if let Some(label) = &plot.x_label {
                mesh.x_desc(label.as_str());
            }
            if let Some(label) = &plot.y_label {
                mesh.y_desc(label.as_str());
            }
            mesh.draw().map_err(drawing_err)?;
        }

        for (i, series) in plot.series.iter().enumerate() {
            let color = LinePlot::series_color(i);
            chart
                .draw_series(LineSeries::new(series.points(), color.stroke_width(2)))
                .map_err(drawing_err)?;
        }
        Ok(())
    }
}
