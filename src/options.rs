//! Per-panel overrides for a raincloud figure.
//!
//! Every field is optional. An omitted or empty array falls back to a uniform
//! default for every panel; a non-empty array is indexed by panel slot, and a
//! slot beyond its end is reported when that panel is drawn.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, PlotResult};
use crate::palette::Palette;
use crate::plotting::{BorderVisibility, PanelStyle};

/// Optional per-panel overrides, positionally aligned with the plot kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Panel titles.
    pub titles: Option<Vec<String>>,
    /// X axis labels.
    pub x_labels: Option<Vec<String>>,
    /// Y axis labels.
    pub y_labels: Option<Vec<String>>,
    /// Whether x tick labels and marks are drawn.
    pub show_x: Option<Vec<bool>>,
    /// Whether y tick labels and marks are drawn.
    pub show_y: Option<Vec<bool>>,
    /// Whether the x axis label is drawn.
    pub show_xlabel: Option<Vec<bool>>,
    /// Whether the y axis label is drawn.
    pub show_ylabel: Option<Vec<bool>>,
    /// Spine visibility per panel.
    pub show_border: Option<Vec<BorderVisibility>>,
    /// Palette replacing the plotter's default for this figure.
    pub palette: Option<Palette>,
}

fn strings<I, S>(values: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(values.into_iter().map(Into::into).collect())
}

fn pick<T: Clone>(name: &str, values: &Option<Vec<T>>, slot: usize, default: T) -> PlotResult<T> {
    match values {
        Some(v) if !v.is_empty() => v
            .get(slot)
            .cloned()
            .ok_or_else(|| ParameterError::out_of_range(name, slot, v.len()).into()),
        _ => Ok(default),
    }
}

impl PlotOptions {
    /// Options with every field defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON.
    pub fn from_json(json: &str) -> PlotResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            ParameterError::invalid_value("plot_options", format!("invalid JSON: {e}")).into()
        })
    }

    /// Panel titles, one per slot.
    pub fn with_titles<I: IntoIterator<Item = S>, S: Into<String>>(mut self, titles: I) -> Self {
        self.titles = strings(titles);
        self
    }

    /// X axis labels, one per slot.
    pub fn with_x_labels<I: IntoIterator<Item = S>, S: Into<String>>(mut self, labels: I) -> Self {
        self.x_labels = strings(labels);
        self
    }

    /// Y axis labels, one per slot.
    pub fn with_y_labels<I: IntoIterator<Item = S>, S: Into<String>>(mut self, labels: I) -> Self {
        self.y_labels = strings(labels);
        self
    }

    /// Per-slot x tick visibility.
    pub fn with_show_x(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.show_x = Some(flags.into());
        self
    }

    /// Per-slot y tick visibility.
    pub fn with_show_y(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.show_y = Some(flags.into());
        self
    }

    /// Per-slot x label visibility.
    pub fn with_show_xlabel(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.show_xlabel = Some(flags.into());
        self
    }

    /// Per-slot y label visibility.
    pub fn with_show_ylabel(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.show_ylabel = Some(flags.into());
        self
    }

    /// Per-slot spine visibility.
    pub fn with_borders(mut self, borders: impl Into<Vec<BorderVisibility>>) -> Self {
        self.show_border = Some(borders.into());
        self
    }

    /// Replace the plotter's palette for this figure.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// The palette override, unless absent or empty.
    pub fn palette_override(&self) -> Option<&Palette> {
        self.palette.as_ref().filter(|p| !p.is_empty())
    }

    /// Resolve the cosmetic settings for the panel in `slot`.
    ///
    /// # Errors
    /// Returns [`ParameterError::OutOfRange`] for the first non-empty option
    /// array that has no entry for `slot`.
    pub fn style_for(&self, slot: usize) -> PlotResult<PanelStyle> {
        let defaults = PanelStyle::default();
        Ok(PanelStyle {
            title: pick("titles", &self.titles, slot, defaults.title)?,
            x_label: pick("x_labels", &self.x_labels, slot, defaults.x_label)?,
            y_label: pick("y_labels", &self.y_labels, slot, defaults.y_label)?,
            show_x_ticks: pick("show_x", &self.show_x, slot, defaults.show_x_ticks)?,
            show_y_ticks: pick("show_y", &self.show_y, slot, defaults.show_y_ticks)?,
            show_x_label: pick("show_xlabel", &self.show_xlabel, slot, defaults.show_x_label)?,
            show_y_label: pick("show_ylabel", &self.show_ylabel, slot, defaults.show_y_label)?,
            borders: pick("show_border", &self.show_border, slot, defaults.borders)?,
        })
    }
}
