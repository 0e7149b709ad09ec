use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use raincloud_plots::{
    BorderVisibility, PairedDataset, Palette, PlotOptions, PlotResult, RainCloudPlot,
};
use tracing_subscriber::EnvFilter;

pub fn main() -> PlotResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "raincloud_plots=debug".into()),
        )
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let first = Normal::new(3.0, 0.5).unwrap();
    let second = Normal::new(4.0, 0.5).unwrap();
    let data = PairedDataset::from_vecs(
        (0..20).map(|_| first.sample(&mut rng)).collect(),
        (0..20).map(|_| second.sample(&mut rng)).collect(),
    )?;

    let border_control = [
        BorderVisibility::new(true, true, true, false),
        BorderVisibility::new(true, true, false, false),
        BorderVisibility::new(true, true, false, true),
    ];

    let options = PlotOptions::new()
        .with_show_x([false, false, true])
        .with_show_y([false, false, false])
        .with_show_xlabel([false, false, false])
        .with_show_ylabel([false, false, false])
        .with_titles(["Strip Plot", "Box Plot", "Violin Plot"])
        .with_x_labels(["X-axis Label 1", "X-axis Label 2", "X-axis Label 3"])
        .with_y_labels(["Y-axis Label 1", "Y-axis Label 2", "Y-axis Label 3"])
        .with_palette(Palette::named_n("coolwarm", 2)?)
        .with_borders(border_control);

    let mut plotter = RainCloudPlot::new(data)
        .with_jitter_strength(0.05)?
        .with_seed(42);

    let kinds = ["strip", "box", "violin"];
    plotter.save_plot(&kinds, &options, "outputs/raincloud.html")?;
    plotter.generate_plot(&kinds, &options)?;

    Ok(())
}
