//! Chart Plotter Module
//! Imperative line-plot model, the `plt.plot(x, y)` side of the gallery.

use plotters::style::RGBColor;

/// Line colors, cycled per series (matplotlib's tab10).
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

/// `n` evenly spaced samples over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// One polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { label: None, x, y }
    }

    /// Sample `f` over `x`.
    pub fn from_fn(x: Vec<f64>, f: impl Fn(f64) -> f64) -> Self {
        let y = x.iter().map(|&v| f(v)).collect();
        Self::new(x, y)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Finite `(x, y)` pairs; extra values in the longer vector are ignored.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .copied()
            .zip(self.y.iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// A single-axes line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<Series>,
    /// Draw the mesh, tick labels and caption.
    pub show_axes: bool,
}

impl Default for LinePlot {
    fn default() -> Self {
        Self::new()
    }
}

impl LinePlot {
    pub fn new() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            series: Vec::new(),
            show_axes: true,
        }
    }

    pub fn plot(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    pub fn show_axes(mut self, show: bool) -> Self {
        self.show_axes = show;
        self
    }

    pub fn series_color(index: usize) -> RGBColor {
        PALETTE[index % PALETTE.len()]
    }

    /// Data bounds over all series with 5% padding, like matplotlib's margins.
    /// `None` when there is no finite point.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for (x, y) in self.series.iter().flat_map(Series::points) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if x_min.is_infinite() {
            return None;
        }
        Some((pad(x_min, x_max), pad(y_min, y_max)))
    }
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span == 0.0 {
        return (min - 0.5, max + 0.5);
    }
    let margin = span * 0.05;
    (min - margin, max + margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let t = linspace(0.0, 20.0, 500);
        assert_eq!(t.len(), 500);
        assert_eq!(t[0], 0.0);
        assert!((t[499] - 20.0).abs() < 1e-12);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn series_from_fn_samples_each_x() {
        let s = Series::from_fn(vec![0.0, std::f64::consts::FRAC_PI_2], f64::sin);
        assert_eq!(s.y.len(), 2);
        assert!((s.y[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn points_skip_non_finite_values() {
        let s = Series::new(vec![0.0, 1.0, 2.0], vec![1.0, f64::NAN, 3.0]);
        let pts: Vec<(f64, f64)> = s.points().collect();
        assert_eq!(pts, vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn bounds_are_padded() {
        let plot = LinePlot::new().plot(Series::new(vec![0.0, 10.0], vec![-1.0, 1.0]));
        let ((x0, x1), (y0, y1)) = plot.bounds().unwrap();
        assert!((x0 + 0.5).abs() < 1e-12 && (x1 - 10.5).abs() < 1e-12);
        assert!((y0 + 1.1).abs() < 1e-12 && (y1 - 1.1).abs() < 1e-12);
        assert!(LinePlot::new().bounds().is_none());
    }

    #[test]
    fn colors_cycle() {
        assert_eq!(LinePlot::series_color(0), PALETTE[0]);
        assert_eq!(LinePlot::series_color(10), PALETTE[0]);
        assert_eq!(LinePlot::series_color(3), RGBColor(214, 39, 40));
    }
}
