//! Cells that need no network: the static sine plot and markdown sample.

use tracing::warn;

use crate::charts::{linspace, LinePlot, RenderError, RenderedPlot, Series, StaticChartRenderer};
use crate::config::Config;
use crate::display::Markdown;

/// `sin(t)` over 500 samples of `[0, 20]`.
pub fn sine_plot() -> LinePlot {
    let t = linspace(0.0, 20.0, 500);
    LinePlot::new().plot(Series::from_fn(t, f64::sin))
}

/// The sine plot rendered at the configured figure size.
///
/// Tick labels need a system font. When text cannot be drawn the plot is
/// rendered again without axes, so the cell still shows the curve.
pub fn matplotlib_sine(config: &Config) -> Result<RenderedPlot, RenderError> {
    let plot = sine_plot();
    match StaticChartRenderer::render_png(&plot, config.figure_size) {
        Err(RenderError::Drawing(reason)) if plot.show_axes => {
            warn!(%reason, "axes could not be drawn, rendering the bare plot");
            StaticChartRenderer::render_png(&plot.show_axes(false), config.figure_size)
        }
        rendered => rendered,
    }
}

pub const MARKDOWN_SAMPLE: &str = r#"
# Heading 1
## Heading 2
### Heading 3

**Bold text** and *italic text*

- List item 1
- List item 2
- List item 3

1. Numbered item
2. Numbered item

`inline code`

```python
def hello():
    print("code block")
```

> Blockquote text

[Link text](https://example.com)

---

| Column 1 | Column 2 |
|----------|----------|
| Cell 1   | Cell 2   |
| Cell 3   | Cell 4   |
"#;

pub fn markdown_test() -> Markdown {
    Markdown::new(MARKDOWN_SAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_plot_has_500_samples_within_unit_range() {
        let plot = sine_plot();
        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.series[0].x.len(), 500);
        assert!(plot.series[0].y.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn markdown_sample_renders_every_block_kind() {
        let html = markdown_test().to_html();
        for tag in ["<h1>", "<h2>", "<h3>", "<strong>", "<em>", "<ul>", "<ol>", "<code>", "<pre>", "<blockquote>", "<a href=\"https://example.com\">", "<hr />", "<table>"] {
            assert!(html.contains(tag), "missing {tag} in {html}");
        }
    }
}
