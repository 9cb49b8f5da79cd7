//! Plotly figures (`application/vnd.plotly.v1+json`).

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::display::{DisplayError, Displayable, MimeBundle, MimeType};

/// A Plotly figure: traces plus layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    #[serde(default)]
    pub layout: Layout,
}

impl Figure {
    pub fn new(trace: impl Into<Trace>) -> Self {
        Self {
            data: vec![trace.into()],
            layout: Layout::default(),
        }
    }

    pub fn add_trace(mut self, trace: impl Into<Trace>) -> Self {
        self.data.push(trace.into());
        self
    }

    /// Merge `update` into the current layout; set fields win.
    pub fn update_layout(mut self, update: Layout) -> Self {
        self.layout.merge(update);
        self
    }
}

impl Displayable for Figure {
    fn mime_bundle(&self) -> Result<MimeBundle, DisplayError> {
        let title = self
            .layout
            .title
            .as_ref()
            .map(|t| t.text.as_str())
            .unwrap_or("untitled");
        Ok(MimeBundle::from_document(MimeType::PlotlyV1, self)?.with(
            MimeType::Plain,
            Value::String(format!("Figure({} trace(s), {title})", self.data.len())),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Surface(Surface),
    Scatter(Scatter),
}

impl From<Surface> for Trace {
    fn from(s: Surface) -> Self {
        Trace::Surface(s)
    }
}

impl From<Scatter> for Trace {
    fn from(s: Scatter) -> Self {
        Trace::Scatter(s)
    }
}

/// 3D surface over a z grid (rows are y, columns are x).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub z: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
}

impl Surface {
    pub fn new(z: Vec<Vec<f64>>) -> Self {
        Self {
            z,
            ..Self::default()
        }
    }

    /// Surface from the numeric columns of a frame. A leading unnamed
    /// index column (as written by dataframe CSV exports) is skipped.
    pub fn from_frame(df: &DataFrame) -> PolarsResult<Self> {
        let columns: Vec<&Column> = df
            .get_columns()
            .iter()
            .enumerate()
            .filter(|(i, c)| !(*i == 0 && is_index_column(c.name().as_str())))
            .map(|(_, c)| c)
            .collect();

        let mut grid = vec![Vec::with_capacity(columns.len()); df.height()];
        for col in columns {
            let values = col.cast(&DataType::Float64)?;
            let values = values.f64()?;
            for (row, v) in grid.iter_mut().zip(values.into_iter()) {
                row.push(v.unwrap_or(f64::NAN));
            }
        }
        Ok(Self::new(grid))
    }

    pub fn showscale(mut self, show: bool) -> Self {
        self.showscale = Some(show);
        self
    }
}

/// Names a CSV reader gives a blank leading header.
fn is_index_column(name: &str) -> bool {
    name.is_empty() || name == "column_1" || name.starts_with("Unnamed") || name == "index"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Scatter {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = Some(Title { text: text.into() });
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn scene_camera(mut self, camera: Camera) -> Self {
        self.scene = Some(Scene {
            camera: Some(camera),
        });
        self
    }

    /// Fields set in `other` overwrite ours; margins and scenes merge per key.
    pub fn merge(&mut self, other: Layout) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.height.is_some() {
            self.height = other.height;
        }
        match (&mut self.margin, other.margin) {
            (Some(mine), Some(theirs)) => mine.merge(theirs),
            (slot, theirs @ Some(_)) => *slot = theirs,
            _ => {}
        }
        match (&mut self.scene, other.scene) {
            (Some(mine), Some(theirs)) => {
                if theirs.camera.is_some() {
                    mine.camera = theirs.camera;
                }
            }
            (slot, theirs @ Some(_)) => *slot = theirs,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
}

impl Margin {
    pub fn new(t: u32, r: u32, l: u32, b: u32) -> Self {
        Self {
            t: Some(t),
            r: Some(r),
            l: Some(l),
            b: Some(b),
        }
    }

    fn merge(&mut self, other: Margin) {
        self.t = other.t.or(self.t);
        self.r = other.r.or(self.r);
        self.l = other.l.or(self.l);
        self.b = other.b.or(self.b);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub up: Vec3,
    pub center: Vec3,
    pub eye: Vec3,
}

impl Default for Camera {
    /// Plotly's default 3D camera.
    fn default() -> Self {
        Self {
            up: Vec3::new(0.0, 0.0, 1.0),
            center: Vec3::new(0.0, 0.0, 0.0),
            eye: Vec3::new(1.25, 1.25, 1.25),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
