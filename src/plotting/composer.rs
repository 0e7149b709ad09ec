//! Plotly rendering of a [`Figure`].
//!
//! Each slot becomes one numbered axis pair (`x`/`y`, `x2`/`y2`, ...) whose
//! horizontal domains touch. Spines are drawn as paper-space line shapes so
//! that each side can be toggled independently, and panel titles become
//! annotations above their slot.

use std::path::Path;

use plotly::common::{Anchor, Fill, Font, Line, Marker, MarkerSymbol, Mode, TickMode, Title};
use plotly::layout::{Annotation, Axis, Layout, Shape, ShapeLine, ShapeType, TicksDirection};
use plotly::{Plot, Scatter};
use tracing::debug;

use super::core::*;
use crate::error::{ParameterError, PlotResult};

/// Maximum number of slots the plotly layout can address.
pub const MAX_SLOTS: usize = 8;

/// Padding added around the data when an axis autoscales, as a fraction of
/// the data span.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Theme configuration for rendered figures
#[derive(Debug, Clone)]
pub struct PlotTheme {
    /// Paper and plot background.
    pub background_color: String,
    /// Color of all text.
    pub text_color: String,
    /// Color of the spine lines.
    pub spine_color: String,
    /// CSS font family.
    pub font_family: String,
    /// Base font size in points.
    pub font_size: f64,
    /// Panel title font size.
    pub title_font_size: f64,
    /// Axis label font size.
    pub label_font_size: f64,
    /// Tick label font size.
    pub tick_font_size: f64,
    /// Spine line width in pixels.
    pub spine_width: f64,
    /// Tick mark length in pixels when ticks are shown.
    pub tick_length: usize,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#262626".to_string(),
            spine_color: "#262626".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12.0,
            title_font_size: 14.0,
            label_font_size: 12.0,
            tick_font_size: 11.0,
            spine_width: 1.0,
            tick_length: 5,
        }
    }
}

impl PlotTheme {
    fn font(&self, size: f64) -> Font {
        Font::new()
            .family(&self.font_family)
            .size(size as usize)
            .color(self.text_color.clone())
    }

    /// Base layout carrying the theme's font and background.
    pub fn to_plotly_layout(&self) -> Layout {
        Layout::new()
            .font(self.font(self.font_size))
            .paper_background_color(self.background_color.clone())
            .plot_background_color(self.background_color.clone())
    }

    /// Axis with a themed title, no grid and no axis line.
    pub fn create_axis(&self, title: &str) -> Axis {
        Axis::new()
            .title(Title::with_text(title).font(self.font(self.label_font_size)))
            .tick_font(self.font(self.tick_font_size))
            .show_grid(false)
            .show_line(false)
            .zero_line(false)
    }
}

fn axis_id(prefix: &str, slot: usize) -> String {
    if slot == 0 {
        prefix.to_string()
    } else {
        format!("{prefix}{}", slot + 1)
    }
}

/// Renders figures through plotly.
#[derive(Debug, Clone, Default)]
pub struct FigureComposer {
    theme: PlotTheme,
}

impl FigureComposer {
    /// Composer with the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: PlotTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Convert a figure into a plotly plot.
    pub fn compose(&self, figure: &Figure) -> PlotResult<Plot> {
        if figure.slots() > MAX_SLOTS {
            return Err(ParameterError::invalid_value(
                "plot_kinds",
                format!("at most {MAX_SLOTS} panels are supported, got {}", figure.slots()),
            )
            .into());
        }

        let (width, height) = figure.size();
        let mut plot = Plot::new();
        let mut layout = self
            .theme
            .to_plotly_layout()
            .width(width as usize)
            .height(height as usize)
            .show_legend(false);

        for slot in 0..figure.slots() {
            let domain = figure.slot_domain(slot);
            let (x_axis, y_axis) = match figure.panel(slot) {
                Some(panel) => {
                    for trace in self.panel_traces(panel, slot) {
                        plot.add_trace(trace);
                    }
                    for shape in self.spine_shapes(panel.borders, domain) {
                        layout.add_shape(shape);
                    }
                    if !panel.title.is_empty() {
                        layout.add_annotation(self.title_annotation(&panel.title, domain));
                    }
                    if let Some(legend) = &panel.legend {
                        layout.add_annotation(self.legend_annotation(legend, domain));
                    }
                    let mut bounds = panel.data_bounds();
                    if !bounds.is_empty() {
                        bounds = bounds.with_margin(AUTOSCALE_MARGIN);
                    }
                    (
                        self.x_axis(&panel.x_axis, slot, domain, &bounds),
                        self.y_axis(&panel.y_axis, slot, &bounds),
                    )
                }
                None => (
                    Axis::new().visible(false).domain(&[domain.0, domain.1]),
                    Axis::new().visible(false),
                ),
            };
            layout = match slot + 1 {
                1 => layout.x_axis(x_axis).y_axis(y_axis),
                2 => layout.x_axis2(x_axis).y_axis2(y_axis),
                3 => layout.x_axis3(x_axis).y_axis3(y_axis),
                4 => layout.x_axis4(x_axis).y_axis4(y_axis),
                5 => layout.x_axis5(x_axis).y_axis5(y_axis),
                6 => layout.x_axis6(x_axis).y_axis6(y_axis),
                7 => layout.x_axis7(x_axis).y_axis7(y_axis),
                _ => layout.x_axis8(x_axis).y_axis8(y_axis),
            };
        }

        plot.set_layout(layout);
        debug!(
            slots = figure.slots(),
            panels = figure.panels().len(),
            "composed plotly figure"
        );
        Ok(plot)
    }

    fn x_axis(
        &self,
        spec: &AxisSpec,
        slot: usize,
        domain: (f64, f64),
        bounds: &PlotBounds,
    ) -> Axis {
        let fallback = (bounds.x_min < bounds.x_max).then_some((bounds.x_min, bounds.x_max));
        self.axis(spec, fallback)
            .domain(&[domain.0, domain.1])
            .anchor(&axis_id("y", slot))
    }

    fn y_axis(&self, spec: &AxisSpec, slot: usize, bounds: &PlotBounds) -> Axis {
        let fallback = (bounds.y_min < bounds.y_max).then_some((bounds.y_min, bounds.y_max));
        self.axis(spec, fallback)
            .domain(&[0.0, 1.0])
            .anchor(&axis_id("x", slot))
    }

    /// `fallback` is used as the range when the axis has no fixed limits.
    fn axis(&self, spec: &AxisSpec, fallback: Option<(f64, f64)>) -> Axis {
        let tick_length = if spec.tick_marks_visible {
            self.theme.tick_length
        } else {
            0
        };
        let mut axis = self
            .theme
            .create_axis(&spec.label)
            .show_tick_labels(spec.tick_labels_visible)
            .ticks(TicksDirection::Outside)
            .tick_length(tick_length);
        if let Some(ticks) = &spec.ticks {
            axis = axis
                .tick_mode(TickMode::Array)
                .tick_values(ticks.iter().map(|t| t.position).collect())
                .tick_text(ticks.iter().map(|t| t.label.clone()).collect());
        }
        if let Some((lo, hi)) = spec.limits.or(fallback) {
            axis = axis.range(vec![lo, hi]);
        }
        axis
    }

    fn spine_shapes(&self, borders: BorderVisibility, domain: (f64, f64)) -> Vec<Shape> {
        let (x0, x1) = domain;
        [
            (borders.top, (x0, 1.0, x1, 1.0)),
            (borders.bottom, (x0, 0.0, x1, 0.0)),
            (borders.left, (x0, 0.0, x0, 1.0)),
            (borders.right, (x1, 0.0, x1, 1.0)),
        ]
        .into_iter()
        .filter(|(show, _)| *show)
        .map(|(_, (ax, ay, bx, by))| {
            Shape::new()
                .shape_type(ShapeType::Line)
                .x_ref("paper")
                .y_ref("paper")
                .x0(ax)
                .y0(ay)
                .x1(bx)
                .y1(by)
                .line(
                    ShapeLine::new()
                        .color(self.theme.spine_color.clone())
                        .width(self.theme.spine_width),
                )
        })
        .collect()
    }

    fn title_annotation(&self, title: &str, domain: (f64, f64)) -> Annotation {
        Annotation::new()
            .text(title)
            .x_ref("paper")
            .y_ref("paper")
            .x((domain.0 + domain.1) / 2.0)
            .y(1.0)
            .x_anchor(Anchor::Center)
            .y_anchor(Anchor::Bottom)
            .show_arrow(false)
            .font(self.theme.font(self.theme.title_font_size))
    }

    /// A legend drawn as an annotation inside the panel's own domain.
    fn legend_annotation(&self, legend: &Legend, domain: (f64, f64)) -> Annotation {
        let (x, y, x_anchor, y_anchor) = match legend.location {
            LegendLocation::UpperLeft => (domain.0 + 0.01, 0.99, Anchor::Left, Anchor::Top),
        };
        let mut text = format!("<b>{}</b>", escape_html(&legend.title));
        for entry in &legend.entries {
            text.push_str(&format!(
                "<br><span style=\"color:{}\">\u{25cf}</span> {}",
                entry.color.to_hex(),
                escape_html(&entry.label)
            ));
        }
        Annotation::new()
            .text(&text)
            .x_ref("paper")
            .y_ref("paper")
            .x(x)
            .y(y)
            .x_anchor(x_anchor)
            .y_anchor(y_anchor)
            .show_arrow(false)
            .font(self.theme.font(self.theme.font_size))
    }

    fn panel_traces(&self, panel: &Panel, slot: usize) -> Vec<Box<dyn plotly::Trace>> {
        let x_ref = axis_id("x", slot);
        let y_ref = axis_id("y", slot);

        // Pair lines share one trace, separated by gaps.
        let segments: Vec<&Segment> = panel.segments().collect();
        let mut traces: Vec<Box<Scatter<Option<f64>, Option<f64>>>> = Vec::new();
        if let Some(first) = segments.first() {
            let mut xs = Vec::with_capacity(segments.len() * 3);
            let mut ys = Vec::with_capacity(segments.len() * 3);
            for s in &segments {
                xs.extend([Some(s.x[0]), Some(s.x[1]), None]);
                ys.extend([Some(s.y[0]), Some(s.y[1]), None]);
            }
            traces.push(
                Scatter::new(xs, ys)
                    .mode(Mode::Lines)
                    .line(Line::new().color(first.color.to_hex()).width(first.width))
                    .show_legend(false),
            );
        }

        for artist in &panel.artists {
            match artist {
                Artist::Segment(_) => {}
                Artist::Points(p) => {
                    let mut trace = Scatter::new(
                        p.x.iter().copied().map(Some).collect(),
                        p.y.iter().copied().map(Some).collect(),
                    )
                    .mode(Mode::Markers)
                    .marker(
                        Marker::new()
                            .color(p.color.to_hex())
                            .size(p.size as usize)
                            .line(Line::new().color(p.edge_color.to_hex()).width(1.0)),
                    )
                    .show_legend(false);
                    if let Some(label) = &p.label {
                        trace = trace.name(label);
                    }
                    traces.push(trace);
                }
                Artist::Box(b) => traces.extend(box_traces(b)),
                Artist::Area(a) => {
                    traces.push(
                        Scatter::new(
                            a.x.iter().copied().map(Some).collect(),
                            a.y.iter().copied().map(Some).collect(),
                        )
                        .mode(Mode::Lines)
                        .fill(Fill::ToSelf)
                        .fill_color(a.fill.to_hex())
                        .line(Line::new().color(a.edge_color.to_hex()).width(1.0))
                        .opacity(a.opacity)
                        .show_legend(false),
                    );
                }
            }
        }

        traces
            .into_iter()
            .map(|t| t.x_axis(&x_ref).y_axis(&y_ref) as Box<dyn plotly::Trace>)
            .collect()
    }

    /// Render to a standalone HTML document.
    pub fn to_html(&self, figure: &Figure) -> PlotResult<String> {
        Ok(self.compose(figure)?.to_html())
    }

    /// Render to an HTML file, creating parent directories when asked.
    pub fn render_to_html<P: AsRef<Path>>(
        &self,
        figure: &Figure,
        path: P,
        create_parent: bool,
    ) -> PlotResult<()> {
        let path = path.as_ref();
        let html = self.to_html(figure)?;
        if create_parent && let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, html)?;
        debug!(path = %path.display(), "wrote figure html");
        Ok(())
    }

    /// Open the figure in the default browser.
    pub fn show(&self, figure: &Figure) -> PlotResult<()> {
        self.compose(figure)?.show();
        Ok(())
    }
}

impl Figure {
    /// Convert to a plotly plot with the default theme.
    pub fn to_plotly(&self) -> PlotResult<Plot> {
        FigureComposer::new().compose(self)
    }

    /// Render to a standalone HTML document with the default theme.
    pub fn to_html(&self) -> PlotResult<String> {
        FigureComposer::new().to_html(self)
    }

    /// Write an HTML file, creating missing parent directories.
    pub fn write_html<P: AsRef<Path>>(&self, path: P) -> PlotResult<()> {
        FigureComposer::new().render_to_html(self, path, true)
    }

    /// Open in the default browser.
    pub fn show(&self) -> PlotResult<()> {
        FigureComposer::new().show(self)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn box_traces(b: &BoxGlyph) -> Vec<Box<Scatter<Option<f64>, Option<f64>>>> {
    let half = b.width / 2.0;
    let (left, right) = (b.position - half, b.position + half);
    let cap_half = b.width / 4.0;
    let stats = &b.stats;
    let line = Line::new().color(b.line_color.to_hex()).width(1.5);

    let body = Scatter::new(
        vec![Some(left), Some(right), Some(right), Some(left), Some(left)],
        vec![
            Some(stats.q1),
            Some(stats.q1),
            Some(stats.q3),
            Some(stats.q3),
            Some(stats.q1),
        ],
    )
    .mode(Mode::Lines)
    .fill(Fill::ToSelf)
    .fill_color(b.fill.to_hex())
    .line(line.clone())
    .show_legend(false);

    // Median, whiskers and caps as one gapped polyline.
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut seg = |x0: f64, y0: f64, x1: f64, y1: f64| {
        xs.extend([Some(x0), Some(x1), None]);
        ys.extend([Some(y0), Some(y1), None]);
    };
    seg(left, stats.median, right, stats.median);
    seg(b.position, stats.q1, b.position, stats.whisker_low);
    seg(b.position, stats.q3, b.position, stats.whisker_high);
    seg(
        b.position - cap_half,
        stats.whisker_low,
        b.position + cap_half,
        stats.whisker_low,
    );
    seg(
        b.position - cap_half,
        stats.whisker_high,
        b.position + cap_half,
        stats.whisker_high,
    );
    let whiskers = Scatter::new(xs, ys)
        .mode(Mode::Lines)
        .line(line)
        .show_legend(false);

    let mut traces = vec![body, whiskers];
    if !stats.fliers.is_empty() {
        traces.push(
            Scatter::new(
                vec![Some(b.position); stats.fliers.len()],
                stats.fliers.iter().copied().map(Some).collect(),
            )
            .mode(Mode::Markers)
            .marker(
                Marker::new()
                    .symbol(MarkerSymbol::Diamond)
                    .size(5)
                    .color(b.line_color.to_hex()),
            )
            .show_legend(false),
        );
    }
    traces
}
