//! Core types for the raincloud figure model.
//!
//! A [`Figure`] is a backend-independent description of what gets drawn: one
//! [`Panel`] per recognised plot kind, each carrying its axes, spines, legend
//! and the primitive [`Artist`]s produced by the panel renderers. The plotly
//! conversion in [`super::composer`] consumes this model; tests inspect it
//! directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::palette::Rgb;
use crate::stats::BoxStats;

/// The three panel types a raincloud figure can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Jittered points joined pairwise by lines.
    Strip,
    /// One box per group.
    Box,
    /// Two overlaid half-violin densities.
    Violin,
}

impl PlotKind {
    /// Token used to request this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            PlotKind::Strip => "strip",
            PlotKind::Box => "box",
            PlotKind::Violin => "violin",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strip" => Ok(PlotKind::Strip),
            "box" => Ok(PlotKind::Box),
            "violin" => Ok(PlotKind::Violin),
            other => Err(ParameterError::invalid_value(
                "plot_kind",
                format!("unsupported plot type '{other}'"),
            )),
        }
    }
}

const fn visible() -> bool {
    true
}

/// Visibility of the four spines around a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderVisibility {
    /// Top spine.
    #[serde(default = "visible")]
    pub top: bool,
    /// Bottom spine.
    #[serde(default = "visible")]
    pub bottom: bool,
    /// Left spine.
    #[serde(default = "visible")]
    pub left: bool,
    /// Right spine.
    #[serde(default = "visible")]
    pub right: bool,
}

impl Default for BorderVisibility {
    fn default() -> Self {
        Self::all()
    }
}

impl BorderVisibility {
    /// Every spine drawn.
    pub const fn all() -> Self {
        Self {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }

    /// No spine drawn.
    pub const fn none() -> Self {
        Self {
            top: false,
            bottom: false,
            left: false,
            right: false,
        }
    }

    /// Build from explicit flags.
    pub const fn new(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// A labelled tick at a fixed data position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in data units.
    pub position: f64,
    /// Text drawn at the tick.
    pub label: String,
}

/// State of one axis of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    /// Axis label text; empty means no label.
    pub label: String,
    /// Whether tick labels are drawn.
    pub tick_labels_visible: bool,
    /// Whether tick marks are drawn.
    pub tick_marks_visible: bool,
    /// Fixed ticks; `None` lets the backend choose.
    pub ticks: Option<Vec<Tick>>,
    /// Fixed view range; `None` autoscales.
    pub limits: Option<(f64, f64)>,
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            label: String::new(),
            tick_labels_visible: true,
            tick_marks_visible: true,
            ticks: None,
            limits: None,
        }
    }
}

impl AxisSpec {
    /// Tick label strings, if fixed ticks were set.
    pub fn tick_labels(&self) -> Option<Vec<&str>> {
        self.ticks
            .as_ref()
            .map(|ticks| ticks.iter().map(|t| t.label.as_str()).collect())
    }

    /// Hide or show ticks; labels and marks always change together.
    pub const fn set_ticks_visible(&mut self, visible: bool) {
        self.tick_labels_visible = visible;
        self.tick_marks_visible = visible;
    }
}

/// Corner of a panel a legend is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLocation {
    /// Top-left corner, inside the axes.
    UpperLeft,
}

/// A single legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Series name.
    pub label: String,
    /// Marker color shown next to the name.
    pub color: Rgb,
}

/// Legend attached to a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Heading above the entries.
    pub title: String,
    /// Corner of the panel the legend is pinned to.
    pub location: LegendLocation,
    /// One row per labelled series.
    pub entries: Vec<LegendEntry>,
}

/// Straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start and end x.
    pub x: [f64; 2],
    /// Start and end y.
    pub y: [f64; 2],
    /// Line color.
    pub color: Rgb,
    /// Line width in pixels.
    pub width: f64,
}

/// A series of scatter markers sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    /// Marker x positions.
    pub x: Vec<f64>,
    /// Marker y positions, same length as `x`.
    pub y: Vec<f64>,
    /// Marker face color.
    pub color: Rgb,
    /// Marker outline color.
    pub edge_color: Rgb,
    /// Marker diameter in pixels.
    pub size: f64,
    /// Legend label, if the series is listed in the panel legend.
    pub label: Option<String>,
}

/// A box-and-whisker glyph centred on `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyph {
    /// Center of the box on the x axis.
    pub position: f64,
    /// Box width in data units.
    pub width: f64,
    /// Quartiles, whiskers and fliers.
    pub stats: BoxStats,
    /// Box body color.
    pub fill: Rgb,
    /// Color of the outline, median, whiskers and fliers.
    pub line_color: Rgb,
}

/// A filled closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    /// Outline x coordinates.
    pub x: Vec<f64>,
    /// Outline y coordinates, same length as `x`.
    pub y: Vec<f64>,
    /// Interior color.
    pub fill: Rgb,
    /// Outline color.
    pub edge_color: Rgb,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

/// Primitive drawn inside a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// A single line.
    Segment(Segment),
    /// Scatter markers.
    Points(PointSeries),
    /// A box-and-whisker glyph.
    Box(BoxGlyph),
    /// A filled polygon.
    Area(Area),
}

/// Bounds for plot data in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    /// Smallest x.
    pub x_min: f64,
    /// Largest x.
    pub x_max: f64,
    /// Smallest y.
    pub y_min: f64,
    /// Largest y.
    pub y_max: f64,
}

impl PlotBounds {
    /// Bounds from explicit extremes.
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds containing nothing; expanding it by any point yields that point.
    pub const fn empty() -> Self {
        Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY)
    }

    /// Grow to cover a point; non-finite points are ignored.
    pub fn include_point(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
    }

    /// Grow to cover another bounds.
    pub fn expand_to_include(&mut self, other: &PlotBounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Pad each side by a fraction of the span.
    pub fn with_margin(&self, margin_percent: f64) -> Self {
        let x_margin = (self.x_max - self.x_min) * margin_percent;
        let y_margin = (self.y_max - self.y_min) * margin_percent;
        Self {
            x_min: self.x_min - x_margin,
            x_max: self.x_max + x_margin,
            y_min: self.y_min - y_margin,
            y_max: self.y_max + y_margin,
        }
    }

    /// True when no point has been included.
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }
}

impl Artist {
    /// Data-space bounds covered by this artist.
    pub fn data_bounds(&self) -> PlotBounds {
        let mut bounds = PlotBounds::empty();
        match self {
            Artist::Segment(s) => {
                bounds.include_point(s.x[0], s.y[0]);
                bounds.include_point(s.x[1], s.y[1]);
            }
            Artist::Points(p) => {
                p.x.iter()
                    .zip(&p.y)
                    .for_each(|(&x, &y)| bounds.include_point(x, y));
            }
            Artist::Box(b) => {
                let half = b.width / 2.0;
                bounds.include_point(b.position - half, b.stats.whisker_low);
                bounds.include_point(b.position + half, b.stats.whisker_high);
                for &f in &b.stats.fliers {
                    bounds.include_point(b.position, f);
                }
            }
            Artist::Area(a) => {
                a.x.iter()
                    .zip(&a.y)
                    .for_each(|(&x, &y)| bounds.include_point(x, y));
            }
        }
        bounds
    }
}

/// One sub-axes of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Left-to-right position among the figure's slots.
    pub slot: usize,
    /// Renderer that produced the panel.
    pub kind: PlotKind,
    /// Title above the panel; empty means none.
    pub title: String,
    /// Horizontal axis.
    pub x_axis: AxisSpec,
    /// Vertical axis.
    pub y_axis: AxisSpec,
    /// Spine visibility.
    pub borders: BorderVisibility,
    /// Legend, drawn only by strip panels.
    pub legend: Option<Legend>,
    /// Everything drawn inside the axes, in drawing order.
    pub artists: Vec<Artist>,
}

impl Panel {
    /// An empty panel with default axes and every spine visible.
    pub fn new(slot: usize, kind: PlotKind) -> Self {
        Self {
            slot,
            kind,
            title: String::new(),
            x_axis: AxisSpec::default(),
            y_axis: AxisSpec::default(),
            borders: BorderVisibility::all(),
            legend: None,
            artists: Vec::new(),
        }
    }

    /// Iterate over the straight segments drawn in this panel.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Segment(s) => Some(s),
            _ => None,
        })
    }

    /// Iterate over the scatter series drawn in this panel.
    pub fn point_series(&self) -> impl Iterator<Item = &PointSeries> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Points(p) => Some(p),
            _ => None,
        })
    }

    /// Iterate over the box glyphs drawn in this panel.
    pub fn boxes(&self) -> impl Iterator<Item = &BoxGlyph> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Box(b) => Some(b),
            _ => None,
        })
    }

    /// Iterate over the filled areas drawn in this panel.
    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Area(area) => Some(area),
            _ => None,
        })
    }

    /// Total number of scatter markers.
    pub fn point_count(&self) -> usize {
        self.point_series().map(|p| p.x.len()).sum()
    }

    /// Bounds of everything drawn in the panel.
    pub fn data_bounds(&self) -> PlotBounds {
        self.artists
            .iter()
            .fold(PlotBounds::empty(), |mut acc, artist| {
                acc.expand_to_include(&artist.data_bounds());
                acc
            })
    }
}

/// A row of equal-width panel slots.
///
/// Slots whose plot token was not recognised have no panel; they still take
/// up their share of the width.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    slots: usize,
    panels: Vec<Panel>,
    size: (u32, u32),
    spacing: f64,
}

impl Figure {
    /// Pixels per slot, horizontally and vertically.
    pub const SLOT_PIXELS: u32 = 400;

    /// Create an empty figure with `slots` columns and no spacing between them.
    pub fn new(slots: usize) -> Self {
        let width = Self::SLOT_PIXELS.saturating_mul(u32::try_from(slots).unwrap_or(u32::MAX));
        Self {
            slots,
            panels: Vec::new(),
            size: (width, Self::SLOT_PIXELS),
            spacing: 0.0,
        }
    }

    pub(crate) fn push_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Number of requested slots, drawn or not.
    pub const fn slots(&self) -> usize {
        self.slots
    }

    /// Drawn panels in left-to-right order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel occupying `slot`, if one was drawn there.
    pub fn panel(&self, slot: usize) -> Option<&Panel> {
        self.panels.iter().find(|p| p.slot == slot)
    }

    /// Output size in pixels.
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Horizontal gap between slots as a fraction of figure width.
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Horizontal extent of a slot in figure coordinates (`0.0..=1.0`).
    pub fn slot_domain(&self, slot: usize) -> (f64, f64) {
        let n = self.slots.max(1) as f64;
        let width = (1.0 - self.spacing * (n - 1.0)) / n;
        let start = slot as f64 * (width + self.spacing);
        (start, (start + width).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_kind_tokens() {
        assert_eq!("strip".parse::<PlotKind>().expect("known"), PlotKind::Strip);
        assert_eq!(" box ".parse::<PlotKind>().expect("known"), PlotKind::Box);
        assert_eq!("violin".parse::<PlotKind>().expect("known"), PlotKind::Violin);
        assert!("scatter".parse::<PlotKind>().is_err());
        assert!("Strip".parse::<PlotKind>().is_err());
        assert_eq!(PlotKind::Violin.to_string(), "violin");
    }

    #[test]
    fn test_border_json_defaults() {
        let border: BorderVisibility =
            serde_json::from_str(r#"{"top": false, "left": false}"#).expect("valid json");
        assert_eq!(border, BorderVisibility::new(false, true, false, true));
    }

    #[test]
    fn test_slot_domains_touch() {
        let figure = Figure::new(3);
        assert_eq!(figure.size(), (1200, 400));
        assert_eq!(figure.spacing(), 0.0);

        let (a0, a1) = figure.slot_domain(0);
        let (b0, b1) = figure.slot_domain(1);
        let (c0, c1) = figure.slot_domain(2);
        assert_eq!(a0, 0.0);
        assert!((a1 - b0).abs() < 1e-12);
        assert!((b1 - c0).abs() < 1e-12);
        assert!((c1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ticks_toggle_together() {
        let mut axis = AxisSpec::default();
        axis.set_ticks_visible(false);
        assert!(!axis.tick_labels_visible && !axis.tick_marks_visible);
        axis.set_ticks_visible(true);
        assert!(axis.tick_labels_visible && axis.tick_marks_visible);
    }

    #[test]
    fn test_panel_bounds() {
        let mut panel = Panel::new(0, PlotKind::Strip);
        panel.artists.push(Artist::Segment(Segment {
            x: [0.0, 1.0],
            y: [2.0, 5.0],
            color: Rgb::new(0.5, 0.5, 0.5),
            width: 1.0,
        }));
        panel.artists.push(Artist::Points(PointSeries {
            x: vec![-0.1, f64::NAN],
            y: vec![1.0, 9.0],
            color: Rgb::new(0.0, 0.0, 0.0),
            edge_color: Rgb::new(1.0, 1.0, 1.0),
            size: 10.0,
            label: None,
        }));
        let bounds = panel.data_bounds();
        assert_eq!(bounds, PlotBounds::new(-0.1, 1.0, 1.0, 5.0));
        assert_eq!(panel.point_count(), 2);
        assert_eq!(panel.segments().count(), 1);
    }

    #[test]
    fn test_figure_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Figure>();
    }
}
