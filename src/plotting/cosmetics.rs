//! Shared per-panel cosmetics: title, axis labels, tick visibility, spines.

use super::core::{BorderVisibility, Panel};

/// Fully resolved cosmetic settings for one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStyle {
    /// Panel title.
    pub title: String,
    /// X axis label text.
    pub x_label: String,
    /// Y axis label text.
    pub y_label: String,
    /// Draw x tick labels and tick marks.
    pub show_x_ticks: bool,
    /// Draw y tick labels and tick marks.
    pub show_y_ticks: bool,
    /// Draw the x axis label.
    pub show_x_label: bool,
    /// Draw the y axis label.
    pub show_y_label: bool,
    /// Spine visibility.
    pub borders: BorderVisibility,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            show_x_ticks: true,
            show_y_ticks: true,
            show_x_label: true,
            show_y_label: true,
            borders: BorderVisibility::all(),
        }
    }
}

/// Set axis labels (blank when hidden) and toggle tick labels with tick marks.
pub fn set_labels_and_ticks(panel: &mut Panel, style: &PanelStyle) {
    panel.x_axis.label = if style.show_x_label {
        style.x_label.clone()
    } else {
        String::new()
    };
    panel.y_axis.label = if style.show_y_label {
        style.y_label.clone()
    } else {
        String::new()
    };
    if !style.show_x_ticks {
        panel.x_axis.set_ticks_visible(false);
    }
    if !style.show_y_ticks {
        panel.y_axis.set_ticks_visible(false);
    }
}

/// Apply per-side spine visibility.
pub fn set_borders(panel: &mut Panel, borders: BorderVisibility) {
    panel.borders = borders;
}

/// Title, labels, ticks and borders in the order the renderers expect.
pub fn apply_style(panel: &mut Panel, style: &PanelStyle) {
    panel.title = style.title.clone();
    set_labels_and_ticks(panel, style);
    set_borders(panel, style.borders);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::core::PlotKind;

    #[test]
    fn test_hidden_labels_are_blank() {
        let mut panel = Panel::new(0, PlotKind::Strip);
        let style = PanelStyle {
            x_label: "X".into(),
            y_label: "Y".into(),
            show_x_label: false,
            ..PanelStyle::default()
        };
        apply_style(&mut panel, &style);
        assert_eq!(panel.x_axis.label, "");
        assert_eq!(panel.y_axis.label, "Y");
    }

    #[test]
    fn test_tick_flags_remove_labels_and_marks() {
        let mut panel = Panel::new(0, PlotKind::Box);
        let style = PanelStyle {
            show_x_ticks: false,
            ..PanelStyle::default()
        };
        apply_style(&mut panel, &style);
        assert!(!panel.x_axis.tick_labels_visible);
        assert!(!panel.x_axis.tick_marks_visible);
        assert!(panel.y_axis.tick_labels_visible);
        assert!(panel.y_axis.tick_marks_visible);
    }

    #[test]
    fn test_borders_copied() {
        let mut panel = Panel::new(0, PlotKind::Violin);
        let borders = BorderVisibility::new(false, true, false, true);
        set_borders(&mut panel, borders);
        assert_eq!(panel.borders, borders);
    }
}
