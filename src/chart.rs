//! Line Chart
//!
//! Single-series line chart rendered to SVG markup.

use std::collections::HashMap;
use std::fmt::Write;

/// Colors and font shared by every chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Text color for labels and title
    pub font_color: String,
    pub font_family: String,
    /// Stroke and point color of the series
    pub series_color: String,
    pub background: String,
    pub grid_color: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_color: "#f5eaea".to_string(),
            font_family: "Exo 2".to_string(),
            series_color: "#feb72b".to_string(),
            background: "#1f2937".to_string(),
            grid_color: "#374151".to_string(),
        }
    }
}

/// Data for one line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    /// Dataset label shown above the plot
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// Draws line charts into named chart containers
pub trait ChartRenderer: Send {
    fn render_line_chart(&mut self, canvas: &str, chart: LineChart);

    /// Remove whatever chart `canvas` shows
    fn clear(&mut self, canvas: &str);
}

/// A chart after rendering
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub chart: LineChart,
    pub svg: String,
}

/// [`ChartRenderer`] producing SVG markup, kept per container
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    style: ChartStyle,
    /// Captured once, on the first render call
    defaults: Option<ChartStyle>,
    charts: HashMap<String, RenderedChart>,
    width: f64,
    height: f64,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(ChartStyle::default())
    }
}

impl SvgChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            defaults: None,
            charts: HashMap::new(),
            width: 800.0,
            height: 400.0,
        }
    }

    /// Style in effect, once a chart has been drawn
    pub fn defaults(&self) -> Option<&ChartStyle> {
        self.defaults.as_ref()
    }

    /// The last chart drawn into `canvas`
    pub fn chart(&self, canvas: &str) -> Option<&RenderedChart> {
        self.charts.get(canvas)
    }

    pub fn svg(&self, canvas: &str) -> Option<&str> {
        self.charts.get(canvas).map(|c| c.svg.as_str())
    }

    fn draw(&self, style: &ChartStyle, chart: &LineChart) -> String {
        let (width, height) = (self.width, self.height);

        // Margins
        let margin_left = 70.0;
        let margin_right = 20.0;
        let margin_top = 40.0;
        let margin_bottom = 40.0;

        let chart_width = width - margin_left - margin_right;
        let chart_height = height - margin_top - margin_bottom;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" font-family="{font}" font-size="12" fill="{fg}">"#,
            w = width,
            h = height,
            font = escape_attr(&style.font_family),
            fg = escape_attr(&style.font_color),
        );
        let _ = write!(
            svg,
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            escape_attr(&style.background)
        );

        // Legend
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="12" width="30" height="10" fill="{c}"/><text x="{tx}" y="21">{title}</text>"#,
            x = width / 2.0 - 120.0,
            tx = width / 2.0 - 84.0,
            c = escape_attr(&style.series_color),
            title = escape_text(&chart.title),
        );

        if chart.values.is_empty() {
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" font-size="16">No data for selected country</text></svg>"#,
                width / 2.0 - 110.0,
                height / 2.0
            );
            return svg;
        }

        let mut min = chart.values.iter().copied().min().unwrap_or(0) as f64;
        let mut max = chart.values.iter().copied().max().unwrap_or(0) as f64;

        // Add padding to y range
        let range = max - min;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        min -= padding;
        max += padding;

        // Horizontal grid lines with y-axis labels
        for i in 0..=5 {
            let y = margin_top + (i as f64 / 5.0) * chart_height;
            let value = max - (i as f64 / 5.0) * (max - min);
            let _ = write!(
                svg,
                r#"<line x1="{}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="{}"/><text x="5" y="{:.1}">{:.0}</text>"#,
                margin_left,
                width - margin_right,
                escape_attr(&style.grid_color),
                y + 4.0,
                value,
                y = y,
            );
        }

        let n = chart.values.len();
        let x_at = |i: usize| {
            if n == 1 {
                margin_left + chart_width / 2.0
            } else {
                margin_left + (i as f64 / (n - 1) as f64) * chart_width
            }
        };
        let y_at = |v: i64| margin_top + ((max - v as f64) / (max - min)) * chart_height;

        let points: Vec<String> = chart
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.1},{:.1}", x_at(i), y_at(*v)))
            .collect();
        let _ = write!(
            svg,
            r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            escape_attr(&style.series_color),
            points.join(" ")
        );

        for (i, v) in chart.values.iter().enumerate() {
            let _ = write!(
                svg,
                r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
                x_at(i),
                y_at(*v),
                escape_attr(&style.series_color)
            );
        }

        // X-axis labels
        for (i, label) in chart.labels.iter().enumerate().take(n) {
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{}" text-anchor="middle">{}</text>"#,
                x_at(i),
                height - 12.0,
                escape_text(label)
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render_line_chart(&mut self, canvas: &str, chart: LineChart) {
        let style = self.defaults.get_or_insert_with(|| self.style.clone()).clone();
        let svg = self.draw(&style, &chart);

        tracing::debug!(canvas = %canvas, points = chart.values.len(), "Rendered line chart");
        self.charts
            .insert(canvas.to_string(), RenderedChart { chart, svg });
    }

    fn clear(&mut self, canvas: &str) {
        self.charts.remove(canvas);
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(values: Vec<i64>) -> LineChart {
        LineChart {
            title: "Confirmed for the last two weeks".to_string(),
            labels: (1..=values.len()).map(|d| format!("1/{}", d)).collect(),
            values,
        }
    }

    #[test]
    fn test_renders_one_point_per_value() {
        let mut renderer = SvgChartRenderer::default();
        renderer.render_line_chart("lineChart", chart(vec![5, 9, 7]));

        let svg = renderer.svg("lineChart").unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Confirmed for the last two weeks"));
        assert!(svg.contains(">1/3</text>"));
    }

    #[test]
    fn test_empty_series() {
        let mut renderer = SvgChartRenderer::default();
        renderer.render_line_chart("lineChart", chart(vec![]));

        let svg = renderer.svg("lineChart").unwrap();
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn test_flat_and_single_series() {
        let mut renderer = SvgChartRenderer::default();
        renderer.render_line_chart("a", chart(vec![4, 4, 4]));
        renderer.render_line_chart("b", chart(vec![10]));

        assert!(!renderer.svg("a").unwrap().contains("NaN"));
        assert!(!renderer.svg("b").unwrap().contains("NaN"));
    }

    #[test]
    fn test_defaults_captured_on_first_render() {
        let mut renderer = SvgChartRenderer::default();
        assert!(renderer.defaults().is_none());

        renderer.render_line_chart("lineChart", chart(vec![1, 2]));
        assert_eq!(renderer.defaults().unwrap().font_family, "Exo 2");

        renderer.style.font_family = "Mono".to_string();
        renderer.render_line_chart("lineChart", chart(vec![1, 2]));
        assert!(renderer.svg("lineChart").unwrap().contains("font-family=\"Exo 2\""));
    }

    #[test]
    fn test_clear_keeps_defaults() {
        let mut renderer = SvgChartRenderer::default();
        renderer.render_line_chart("lineChart", chart(vec![1, 2]));
        renderer.render_line_chart("other", chart(vec![3]));

        renderer.clear("lineChart");
        assert!(renderer.svg("lineChart").is_none());
        assert!(renderer.svg("other").is_some());
        assert!(renderer.defaults().is_some());
    }

    #[test]
    fn test_rerender_replaces_chart() {
        let mut renderer = SvgChartRenderer::default();
        renderer.render_line_chart("lineChart", chart(vec![1, 2]));
        renderer.render_line_chart("lineChart", chart(vec![1, 2, 3, 4]));

        assert_eq!(renderer.chart("lineChart").unwrap().chart.values.len(), 4);
    }
}
