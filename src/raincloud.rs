//! The raincloud plot orchestrator.
//!
//! [`RainCloudPlot`] lays out one slot per requested plot kind, dispatches each
//! slot to its panel renderer and applies the shared cosmetics. Tokens that do
//! not name a plot kind leave their slot empty.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::dataset::PairedDataset;
use crate::error::{ParameterError, PlotResult};
use crate::options::PlotOptions;
use crate::palette::Palette;
use crate::plotting::{
    BoxPlot, Figure, FigureComposer, HalfViolinPlot, MAX_SLOTS, Panel, PanelElement, PlotKind,
    PlotTheme, StripPlot, apply_style,
};

/// Default standard deviation of the strip plot jitter.
pub const DEFAULT_JITTER_STRENGTH: f64 = 0.03;
/// Default palette name.
pub const DEFAULT_PALETTE: &str = "Set2";

/// Builds strip, box and half-violin panels for a paired dataset.
///
/// ```rust,no_run
/// use raincloud_plots::{PairedDataset, PlotOptions, RainCloudPlot};
///
/// # fn example() -> raincloud_plots::PlotResult<()> {
/// let data = PairedDataset::from_vecs(vec![2.9, 3.1, 3.4], vec![3.8, 4.2, 4.1])?;
/// let mut plotter = RainCloudPlot::new(data).with_jitter_strength(0.05)?;
/// plotter.generate_plot(
///     &["strip", "box", "violin"],
///     &PlotOptions::new().with_titles(["Strip", "Box", "Violin"]),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RainCloudPlot {
    data: PairedDataset,
    jitter_strength: f64,
    palette: Palette,
    rng: StdRng,
    composer: FigureComposer,
}

impl RainCloudPlot {
    /// Plotter with jitter strength 0.03 and the "Set2" palette.
    ///
    /// Jitter is drawn from OS entropy; use [`RainCloudPlot::with_seed`] for
    /// reproducible figures.
    pub fn new(data: PairedDataset) -> Self {
        Self {
            data,
            jitter_strength: DEFAULT_JITTER_STRENGTH,
            palette: Palette::default(),
            rng: StdRng::from_os_rng(),
            composer: FigureComposer::new(),
        }
    }

    /// Set the strip jitter standard deviation.
    ///
    /// # Errors
    /// Negative or non-finite values are rejected.
    pub fn with_jitter_strength(mut self, jitter_strength: f64) -> PlotResult<Self> {
        if !jitter_strength.is_finite() || jitter_strength < 0.0 {
            return Err(ParameterError::invalid_value(
                "jitter_strength",
                format!("must be a finite value >= 0, got {jitter_strength}"),
            )
            .into());
        }
        self.jitter_strength = jitter_strength;
        Ok(self)
    }

    /// Use a named palette as the default.
    pub fn with_palette_name(mut self, name: &str) -> PlotResult<Self> {
        self.palette = Palette::named(name)?;
        Ok(self)
    }

    /// Use an explicit palette as the default.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Seed the jitter generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set the theme used when rendering.
    pub fn with_theme(mut self, theme: PlotTheme) -> Self {
        self.composer = self.composer.with_theme(theme);
        self
    }

    /// The plotted dataset.
    pub fn data(&self) -> &PairedDataset {
        &self.data
    }

    /// Standard deviation of the strip jitter.
    pub fn jitter_strength(&self) -> f64 {
        self.jitter_strength
    }

    /// Palette used when the options carry none.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn element(&self, kind: PlotKind) -> Box<dyn PanelElement> {
        match kind {
            PlotKind::Strip => Box::new(StripPlot::new(self.jitter_strength)),
            PlotKind::Box => Box::new(BoxPlot::default()),
            PlotKind::Violin => Box::new(HalfViolinPlot::default()),
        }
    }

    /// Build the figure without displaying it.
    ///
    /// One slot is allocated per entry of `kinds`, left to right. Entries that
    /// are not `"strip"`, `"box"` or `"violin"` are skipped and leave their
    /// slot empty.
    ///
    /// # Errors
    /// - `kinds` is empty or longer than the backend can lay out
    /// - the effective palette has fewer than two colors
    /// - a non-empty option array has no entry for a drawn panel
    pub fn build_figure<S: AsRef<str>>(
        &mut self,
        kinds: &[S],
        options: &PlotOptions,
    ) -> PlotResult<Figure> {
        if kinds.is_empty() {
            return Err(
                ParameterError::invalid_value("plot_kinds", "at least one panel is required").into(),
            );
        }
        if kinds.len() > MAX_SLOTS {
            return Err(ParameterError::invalid_value(
                "plot_kinds",
                format!("at most {MAX_SLOTS} panels are supported, got {}", kinds.len()),
            )
            .into());
        }

        let colors = options
            .palette_override()
            .unwrap_or(&self.palette)
            .pair()?;

        let mut figure = Figure::new(kinds.len());
        for (slot, token) in kinds.iter().enumerate() {
            let token = token.as_ref();
            let Ok(kind) = token.parse::<PlotKind>() else {
                debug!(slot, token, "skipping unsupported plot type");
                continue;
            };
            debug!(slot, %kind, "drawing panel");

            let element = self.element(kind);
            let mut panel = Panel::new(slot, element.kind());
            element.draw(&mut panel, &self.data, colors, &mut self.rng)?;
            apply_style(&mut panel, &options.style_for(slot)?);
            element.finish(&mut panel);
            figure.push_panel(panel);
        }
        Ok(figure)
    }

    /// Build the figure and open it in a viewer.
    pub fn generate_plot<S: AsRef<str>>(
        &mut self,
        kinds: &[S],
        options: &PlotOptions,
    ) -> PlotResult<()> {
        let figure = self.build_figure(kinds, options)?;
        self.composer.show(&figure)
    }

    /// Build the figure and write it as an HTML file.
    pub fn save_plot<S: AsRef<str>, P: AsRef<std::path::Path>>(
        &mut self,
        kinds: &[S],
        options: &PlotOptions,
        path: P,
    ) -> PlotResult<()> {
        let figure = self.build_figure(kinds, options)?;
        self.composer.render_to_html(&figure, path, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RainCloudError;
    use crate::plotting::BorderVisibility;

    fn plotter() -> RainCloudPlot {
        let data = PairedDataset::from_vecs(
            vec![3.2, 2.9, 3.3, 3.8, 2.9, 2.9, 3.8, 3.4, 2.8, 3.3],
            vec![3.8, 3.8, 4.1, 3.0, 3.1, 3.7, 3.5, 4.2, 3.5, 3.9],
        )
        .expect("equal lengths");
        RainCloudPlot::new(data).with_seed(42)
    }

    #[test]
    fn test_defaults() {
        let plotter = plotter();
        assert_eq!(plotter.jitter_strength(), 0.03);
        assert_eq!(plotter.palette(), &Palette::named(DEFAULT_PALETTE).expect("registered"));
    }

    #[test]
    fn test_invalid_jitter() {
        assert!(plotter().with_jitter_strength(-0.1).is_err());
        assert!(plotter().with_jitter_strength(f64::NAN).is_err());
        assert!(plotter().with_jitter_strength(0.0).is_ok());
    }

    #[test]
    fn test_unknown_palette_name() {
        assert!(plotter().with_palette_name("nope").is_err());
    }

    #[test]
    fn test_slots_in_order() {
        let figure = plotter()
            .build_figure(&["violin", "strip", "box"], &PlotOptions::new())
            .expect("builds");
        let kinds: Vec<_> = figure.panels().iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PlotKind::Violin, PlotKind::Strip, PlotKind::Box]);
        let slots: Vec<_> = figure.panels().iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_kinds_rejected() {
        let kinds: [&str; 0] = [];
        assert!(plotter().build_figure(&kinds, &PlotOptions::new()).is_err());
    }

    #[test]
    fn test_too_many_kinds_rejected() {
        let kinds = ["box"; MAX_SLOTS + 1];
        assert!(plotter().build_figure(&kinds, &PlotOptions::new()).is_err());
    }

    #[test]
    fn test_single_color_palette_rejected() {
        let options =
            PlotOptions::new().with_palette(Palette::from_hex(&["#ff0000"]).expect("valid"));
        let err = plotter()
            .build_figure(&["box"], &options)
            .expect_err("one color is not enough");
        assert!(matches!(err, RainCloudError::Parameter(_)));
    }

    #[test]
    fn test_short_options_only_fail_for_drawn_slots() {
        let options = PlotOptions::new()
            .with_titles(["first"])
            .with_borders([BorderVisibility::none()]);

        // Slot 1 is skipped, so the one-entry arrays are never indexed past 0.
        let figure = plotter()
            .build_figure(&["strip", "scatter"], &options)
            .expect("skipped slot does not read options");
        assert_eq!(figure.panels().len(), 1);

        let err = plotter()
            .build_figure(&["strip", "box"], &options)
            .expect_err("box needs a second title");
        assert!(matches!(
            err,
            RainCloudError::Parameter(ParameterError::OutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let a = plotter()
            .build_figure(&["strip"], &PlotOptions::new())
            .expect("builds");
        let b = plotter()
            .build_figure(&["strip"], &PlotOptions::new())
            .expect("builds");
        assert_eq!(a, b);

        let mut reused = plotter();
        let first = reused.build_figure(&["strip"], &PlotOptions::new()).expect("builds");
        let second = reused.build_figure(&["strip"], &PlotOptions::new()).expect("builds");
        assert_ne!(first, second);
    }
}
