//! Panel renderers for the three raincloud plot kinds.
//!
//! Each renderer fills a fresh [`Panel`] with artists, legend and ticks from a
//! [`PairedDataset`]. Titles, labels, tick visibility and spines are applied
//! afterwards by the shared helpers in [`super::cosmetics`], and
//! [`PanelElement::finish`] runs last so a renderer can override anything the
//! helpers touched.

use rand::RngCore;
use rand_distr::{Distribution, Normal};

use super::core::*;
use crate::dataset::{GROUP_1, GROUP_2, Group, PairedDataset};
use crate::error::{ParameterError, PlotResult};
use crate::palette::Rgb;
use crate::stats::{BoxStats, KdeConfig, gaussian_kde};

/// Color of the lines joining paired observations.
pub const PAIR_LINE_COLOR: Rgb = Rgb {
    r: 128.0 / 255.0,
    g: 128.0 / 255.0,
    b: 128.0 / 255.0,
};

/// Color of box and violin outlines.
pub const OUTLINE_COLOR: Rgb = Rgb {
    r: 63.0 / 255.0,
    g: 63.0 / 255.0,
    b: 63.0 / 255.0,
};

const WHITE: Rgb = Rgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// Saturation applied to fill colors of boxes and violins.
pub const FILL_SATURATION: f64 = 0.75;

/// A renderer for one plot kind.
pub trait PanelElement {
    /// Kind of panel produced.
    fn kind(&self) -> PlotKind;

    /// Populate `panel` with this element's artists, legend and ticks.
    fn draw(
        &self,
        panel: &mut Panel,
        data: &PairedDataset,
        colors: [Rgb; 2],
        rng: &mut dyn RngCore,
    ) -> PlotResult<()>;

    /// Adjustments applied after the shared label, tick and border helpers.
    fn finish(&self, _panel: &mut Panel) {}
}

/// Jittered strip plot with lines joining each pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StripPlot {
    /// Standard deviation of the horizontal jitter.
    pub jitter_strength: f64,
    /// Marker diameter in pixels.
    pub marker_size: f64,
    /// Width of the pair lines.
    pub line_width: f64,
}

impl Default for StripPlot {
    fn default() -> Self {
        Self {
            jitter_strength: 0.03,
            marker_size: 10.0,
            line_width: 1.0,
        }
    }
}

impl StripPlot {
    /// Strip plot with the given jitter strength.
    pub fn new(jitter_strength: f64) -> Self {
        Self {
            jitter_strength,
            ..Self::default()
        }
    }

    fn jitter(&self, center: f64, n: usize, rng: &mut dyn RngCore) -> PlotResult<Vec<f64>> {
        // Normal::new accepts a negative standard deviation.
        if !self.jitter_strength.is_finite() || self.jitter_strength < 0.0 {
            return Err(ParameterError::invalid_value(
                "jitter_strength",
                format!("must be a finite value >= 0, got {}", self.jitter_strength),
            )
            .into());
        }
        let normal = Normal::new(center, self.jitter_strength).map_err(|e| {
            ParameterError::invalid_value("jitter_strength", format!("{e}"))
        })?;
        Ok((0..n).map(|_| normal.sample(rng)).collect())
    }
}

impl PanelElement for StripPlot {
    fn kind(&self) -> PlotKind {
        PlotKind::Strip
    }

    fn draw(
        &self,
        panel: &mut Panel,
        data: &PairedDataset,
        colors: [Rgb; 2],
        rng: &mut dyn RngCore,
    ) -> PlotResult<()> {
        let n = data.len();
        let first_x = self.jitter(0.0, n, rng)?;
        let second_x = self.jitter(1.0, n, rng)?;

        for ((&x0, &x1), (y0, y1)) in first_x.iter().zip(&second_x).zip(data.pairs()) {
            panel.artists.push(Artist::Segment(Segment {
                x: [x0, x1],
                y: [y0, y1],
                color: PAIR_LINE_COLOR,
                width: self.line_width,
            }));
        }

        let mut entries = Vec::with_capacity(2);
        for (group, xs) in Group::BOTH.into_iter().zip([first_x, second_x]) {
            let color = colors[group.index()];
            let label = data.name(group).to_string();
            panel.artists.push(Artist::Points(PointSeries {
                x: xs,
                y: data.group(group).to_vec(),
                color,
                edge_color: WHITE,
                size: self.marker_size,
                label: Some(label.clone()),
            }));
            entries.push(LegendEntry { label, color });
        }

        panel.legend = Some(Legend {
            title: "Group".to_string(),
            location: LegendLocation::UpperLeft,
            entries,
        });
        Ok(())
    }
}

/// Side-by-side box plot of the two groups.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    /// Box width in data units.
    pub width: f64,
    /// Whisker reach in multiples of the IQR.
    pub whis: f64,
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self {
            width: 0.4,
            whis: BoxStats::WHIS,
        }
    }
}

impl PanelElement for BoxPlot {
    fn kind(&self) -> PlotKind {
        PlotKind::Box
    }

    fn draw(
        &self,
        panel: &mut Panel,
        data: &PairedDataset,
        colors: [Rgb; 2],
        _rng: &mut dyn RngCore,
    ) -> PlotResult<()> {
        for group in Group::BOTH {
            let values = data.group(group).to_vec();
            let Some(stats) = BoxStats::with_whis(&values, self.whis) else {
                continue;
            };
            panel.artists.push(Artist::Box(BoxGlyph {
                position: group.index() as f64,
                width: self.width,
                stats,
                fill: colors[group.index()].desaturate(FILL_SATURATION),
                line_color: OUTLINE_COLOR,
            }));
        }

        // Tick labels are fixed regardless of column names or label overrides.
        panel.x_axis.ticks = Some(vec![
            Tick {
                position: 0.0,
                label: GROUP_1.to_string(),
            },
            Tick {
                position: 1.0,
                label: GROUP_2.to_string(),
            },
        ]);
        panel.x_axis.limits = Some((-0.5, 1.5));
        Ok(())
    }
}

/// Two half-violins sharing one horizontal slot.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfViolinPlot {
    /// Horizontal slot both halves are anchored to.
    pub position: f64,
    /// Full violin width; each half spans `width / 2`.
    pub width: f64,
    /// Density estimate parameters.
    pub kde: KdeConfig,
    /// Opacity of each group's half.
    pub opacity: [f64; 2],
    /// View limits forced onto the x axis.
    pub x_limits: (f64, f64),
}

impl Default for HalfViolinPlot {
    fn default() -> Self {
        Self {
            position: 0.0,
            width: 0.6,
            kde: KdeConfig::default(),
            opacity: [1.0, 0.8],
            x_limits: (-0.5, -0.13),
        }
    }
}

impl HalfViolinPlot {
    fn half(&self, values: &[f64], fill: Rgb, opacity: f64) -> Option<Artist> {
        let half_width = self.width / 2.0;
        match gaussian_kde(values, &self.kde) {
            Some(curve) => {
                // A lone violin per call, so area scaling normalises to its own peak.
                let peak = curve.peak();
                let curve = curve.normalized_by(peak);
                let mut x: Vec<f64> = curve
                    .density
                    .iter()
                    .map(|d| self.position - d * half_width)
                    .collect();
                let mut y = curve.support.clone();
                // Close the outline along the centre line.
                x.push(self.position);
                y.push(*curve.support.last()?);
                x.push(self.position);
                y.push(*curve.support.first()?);
                Some(Artist::Area(Area {
                    x,
                    y,
                    fill,
                    edge_color: OUTLINE_COLOR,
                    opacity,
                }))
            }
            None => {
                let value = values.iter().copied().find(|v| v.is_finite())?;
                Some(Artist::Segment(Segment {
                    x: [self.position - half_width, self.position],
                    y: [value, value],
                    color: fill,
                    width: 1.0,
                }))
            }
        }
    }
}

impl PanelElement for HalfViolinPlot {
    fn kind(&self) -> PlotKind {
        PlotKind::Violin
    }

    fn draw(
        &self,
        panel: &mut Panel,
        data: &PairedDataset,
        colors: [Rgb; 2],
        _rng: &mut dyn RngCore,
    ) -> PlotResult<()> {
        for group in Group::BOTH {
            let values = data.group(group).to_vec();
            let fill = colors[group.index()].desaturate(FILL_SATURATION);
            if let Some(artist) = self.half(&values, fill, self.opacity[group.index()]) {
                panel.artists.push(artist);
            }
        }
        Ok(())
    }

    fn finish(&self, panel: &mut Panel) {
        panel.x_axis.limits = Some(self.x_limits);
    }
}
