use approx_eq::assert_approx_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use raincloud_plots::plotting::FILL_SATURATION;
use raincloud_plots::{
    BorderVisibility, Group, PairedDataset, Palette, PlotKind, PlotOptions, RainCloudError,
    RainCloudPlot, Rgb,
};

fn paired_rows(n: usize, seed: u64) -> PairedDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let first = Normal::new(3.0, 0.5).expect("valid normal");
    let second = Normal::new(3.6, 0.4).expect("valid normal");
    PairedDataset::from_vecs(
        (0..n).map(|_| first.sample(&mut rng)).collect(),
        (0..n).map(|_| second.sample(&mut rng)).collect(),
    )
    .expect("equal lengths")
}

fn plotter(n: usize) -> RainCloudPlot {
    RainCloudPlot::new(paired_rows(n, 42)).with_seed(42)
}

#[test]
fn test_twenty_rows_three_panels() {
    let options = PlotOptions::new().with_titles(["Strip Plot", "Box Plot", "Violin Plot"]);
    let figure = plotter(20)
        .build_figure(&["strip", "box", "violin"], &options)
        .expect("builds");

    assert_eq!(figure.slots(), 3);
    assert_eq!(figure.spacing(), 0.0);
    assert_eq!(figure.size(), (1200, 400));

    let kinds: Vec<_> = figure.panels().iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PlotKind::Strip, PlotKind::Box, PlotKind::Violin]);
    let titles: Vec<_> = figure.panels().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Strip Plot", "Box Plot", "Violin Plot"]);

    // Adjacent slots touch.
    for slot in 1..3 {
        assert_approx_eq!(figure.slot_domain(slot - 1).1, figure.slot_domain(slot).0, 1e-12);
    }
}

#[test]
fn test_strip_segments_and_points_match_rows() {
    let figure = plotter(20)
        .build_figure(&["strip"], &PlotOptions::new())
        .expect("builds");
    let panel = figure.panel(0).expect("strip drawn");
    assert_eq!(panel.segments().count(), 20);
    assert_eq!(panel.point_count(), 40);
}

#[test]
fn test_box_ticks_ignore_label_overrides() {
    let options = PlotOptions::new().with_x_labels(["Condition"]);
    let figure = plotter(12)
        .build_figure(&["box"], &options)
        .expect("builds");
    let panel = figure.panel(0).expect("box drawn");
    assert_eq!(panel.x_axis.label, "Condition");
    assert_eq!(panel.x_axis.tick_labels(), Some(vec!["Group 1", "Group 2"]));
}

#[test]
fn test_box_ticks_ignore_column_names() {
    let data = paired_rows(8, 3);
    let renamed = PairedDataset::from_columns(
        "Before",
        data.group(Group::First).clone(),
        "After",
        data.group(Group::Second).clone(),
    )
    .expect("equal lengths");
    let figure = RainCloudPlot::new(renamed)
        .with_seed(1)
        .build_figure(&["strip", "box"], &PlotOptions::new())
        .expect("builds");

    let legend = figure.panel(0).and_then(|p| p.legend.as_ref()).expect("legend");
    let labels: Vec<_> = legend.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Before", "After"]);
    assert_eq!(
        figure.panel(1).expect("box drawn").x_axis.tick_labels(),
        Some(vec!["Group 1", "Group 2"])
    );
}

#[test]
fn test_violin_limits_are_fixed() {
    let options = PlotOptions::new()
        .with_show_x([false])
        .with_x_labels(["ignored for limits"]);
    let figure = plotter(15)
        .build_figure(&["violin"], &options)
        .expect("builds");
    let panel = figure.panel(0).expect("violin drawn");
    assert_eq!(panel.x_axis.limits, Some((-0.5, -0.13)));
    assert_eq!(panel.areas().count(), 2);
    let opacities: Vec<_> = panel.areas().map(|a| a.opacity).collect();
    assert!(opacities[1] < opacities[0]);
}

#[test]
fn test_tick_flags_toggle_labels_and_marks() {
    let options = PlotOptions::new()
        .with_show_x([false, true])
        .with_show_y([true, false]);
    let figure = plotter(10)
        .build_figure(&["strip", "box"], &options)
        .expect("builds");

    let strip = figure.panel(0).expect("strip drawn");
    assert!(!strip.x_axis.tick_labels_visible);
    assert!(!strip.x_axis.tick_marks_visible);
    assert!(strip.y_axis.tick_labels_visible);
    assert!(strip.y_axis.tick_marks_visible);

    let boxed = figure.panel(1).expect("box drawn");
    assert!(boxed.x_axis.tick_labels_visible);
    assert!(boxed.x_axis.tick_marks_visible);
    assert!(!boxed.y_axis.tick_labels_visible);
    assert!(!boxed.y_axis.tick_marks_visible);
}

#[test]
fn test_label_flags_blank_labels() {
    let options = PlotOptions::new()
        .with_x_labels(["Group"])
        .with_y_labels(["Value"])
        .with_show_ylabel([false]);
    let figure = plotter(10)
        .build_figure(&["strip"], &options)
        .expect("builds");
    let panel = figure.panel(0).expect("strip drawn");
    assert_eq!(panel.x_axis.label, "Group");
    assert_eq!(panel.y_axis.label, "");
}

#[test]
fn test_border_visibility_applied() {
    let options = PlotOptions::new().with_borders([BorderVisibility::new(false, true, false, true)]);
    let figure = plotter(10)
        .build_figure(&["box"], &options)
        .expect("builds");
    let borders = figure.panel(0).expect("box drawn").borders;
    assert!(!borders.top);
    assert!(borders.bottom);
    assert!(!borders.left);
    assert!(borders.right);
}

#[test]
fn test_only_first_two_palette_colors_used() {
    let palette = Palette::from_hex(&["#3b4cc0", "#b40426", "#00ff00", "#ffff00"]).expect("valid");
    let colors: Vec<Rgb> = palette.colors()[..2].to_vec();
    let options = PlotOptions::new().with_palette(palette);
    let figure = plotter(10)
        .build_figure(&["strip", "box", "violin"], &options)
        .expect("builds");

    let point_colors: Vec<_> = figure
        .panel(0)
        .expect("strip drawn")
        .point_series()
        .map(|p| p.color)
        .collect();
    assert_eq!(point_colors, colors);

    let fills: Vec<_> = figure
        .panel(1)
        .expect("box drawn")
        .boxes()
        .map(|b| b.fill)
        .collect();
    assert_eq!(
        fills,
        vec![
            colors[0].desaturate(FILL_SATURATION),
            colors[1].desaturate(FILL_SATURATION)
        ]
    );

    let violin_fills: Vec<_> = figure
        .panel(2)
        .expect("violin drawn")
        .areas()
        .map(|a| a.fill)
        .collect();
    assert_eq!(violin_fills, fills);
}

#[test]
fn test_two_strip_panels_keep_separate_legends() {
    let figure = plotter(10)
        .build_figure(&["strip", "strip"], &PlotOptions::new())
        .expect("builds");
    for slot in 0..2 {
        let legend = figure
            .panel(slot)
            .and_then(|p| p.legend.as_ref())
            .expect("each strip has a legend");
        let labels: Vec<_> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Group 1", "Group 2"]);
    }

    let value = serde_json::to_value(figure.to_plotly().expect("composes")).expect("serializes");
    let legends: Vec<f64> = value["layout"]["annotations"]
        .as_array()
        .expect("annotations")
        .iter()
        .filter(|a| a["text"].as_str().is_some_and(|t| t.starts_with("<b>Group</b>")))
        .filter_map(|a| a["x"].as_f64())
        .collect();
    assert_eq!(legends.len(), 2);
    assert!(legends[0] < 0.5 && legends[1] > 0.5);
}

#[test]
fn test_unknown_token_leaves_slot_empty() {
    let figure = plotter(10)
        .build_figure(&["strip", "scatter", "violin"], &PlotOptions::new())
        .expect("unknown tokens are not errors");
    assert_eq!(figure.slots(), 3);
    assert_eq!(figure.panels().len(), 2);
    assert!(figure.panel(1).is_none());
    assert_eq!(figure.panel(2).map(|p| p.kind), Some(PlotKind::Violin));
}

#[test]
fn test_mismatched_columns_rejected() {
    let err = PairedDataset::from_vecs(vec![1.0, 2.0, 3.0], vec![1.0, 2.0])
        .expect_err("lengths differ");
    assert!(matches!(err, RainCloudError::Data(_)));
}

#[test]
fn test_short_option_array_rejected() {
    let options = PlotOptions::new().with_show_y([false]);
    let err = plotter(10)
        .build_figure(&["strip", "box", "violin"], &options)
        .expect_err("show_y has one entry for three panels");
    assert!(matches!(err, RainCloudError::Parameter(_)));
}

#[test]
fn test_full_figure_composes_to_plotly() {
    let options = PlotOptions::new()
        .with_titles(["Strip Plot", "Box Plot", "Violin Plot"])
        .with_borders([
            BorderVisibility::new(true, true, true, false),
            BorderVisibility::new(true, true, false, false),
            BorderVisibility::new(true, true, false, true),
        ])
        .with_palette(Palette::named_n("coolwarm", 2).expect("registered"));
    let figure = plotter(20)
        .with_jitter_strength(0.05)
        .expect("valid jitter")
        .build_figure(&["strip", "box", "violin"], &options)
        .expect("builds");

    let plot = figure.to_plotly().expect("composes");
    let value = serde_json::to_value(&plot).expect("serializes");
    let layout = &value["layout"];
    assert_eq!(layout["width"], 1200);
    assert_eq!(layout["height"], 400);
    assert_eq!(layout["shapes"].as_array().expect("spines").len(), 3 + 2 + 3);
    // Three titles and the strip legend.
    assert_eq!(layout["annotations"].as_array().expect("annotations").len(), 4);
    assert_eq!(layout["xaxis3"]["range"][0], -0.5);
    assert_eq!(layout["xaxis2"]["ticktext"][1], "Group 2");
    assert_eq!(layout["xaxis2"]["tickmode"], "array");

    let html = figure.to_html().expect("renders");
    assert!(html.contains("Violin Plot"));
}
