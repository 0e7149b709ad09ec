// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains
// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`
// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![allow(clippy::too_many_arguments)]
#![deny(missing_docs)] // Documentation is a must for release

//! # RainCloud Plots
//!
//! Comparative "raincloud" figures for paired two-group data: a jittered strip
//! plot joining each pair of observations, a box plot, and a half-violin
//! density plot, composed side by side with per-panel control over titles,
//! axis labels, tick visibility, spines and colors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raincloud_plots::{BorderVisibility, PairedDataset, Palette, PlotOptions, RainCloudPlot};
//!
//! # fn main() -> raincloud_plots::PlotResult<()> {
//! let data = PairedDataset::from_vecs(
//!     vec![3.1, 2.7, 3.4, 3.9, 2.9],
//!     vec![4.0, 3.6, 4.5, 4.1, 3.8],
//! )?;
//!
//! let mut plotter = RainCloudPlot::new(data).with_jitter_strength(0.05)?;
//! let options = PlotOptions::new()
//!     .with_titles(["Strip Plot", "Box Plot", "Violin Plot"])
//!     .with_show_y([false, false, false])
//!     .with_borders([
//!         BorderVisibility::new(true, true, true, false),
//!         BorderVisibility::new(true, true, false, false),
//!         BorderVisibility::new(true, true, false, true),
//!     ])
//!     .with_palette(Palette::named_n("coolwarm", 2)?);
//!
//! // Inspect the figure, write it out, or show it.
//! let figure = plotter.build_figure(&["strip", "box", "violin"], &options)?;
//! assert_eq!(figure.panels().len(), 3);
//! figure.write_html("raincloud.html")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible call returns [`PlotResult`], whose error is the
//! [`RainCloudError`] hierarchy:
//!
//! ```rust
//! use raincloud_plots::{DataError, PairedDataset, RainCloudError};
//!
//! match PairedDataset::from_vecs(vec![1.0, 2.0], vec![1.0]) {
//!     Err(RainCloudError::Data(DataError::LengthMismatch { left, right })) => {
//!         assert_eq!((left, right), (2, 1));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! Unsupported plot tokens are not errors: their slot is left empty.

mod error;

pub mod dataset;
pub mod options;
pub mod palette;
pub mod plotting;
pub mod raincloud;
pub mod stats;

pub use crate::dataset::{GROUP_1, GROUP_2, Group, PairedDataset};
pub use crate::error::{
    DataError, PaletteError, ParameterError, PlotResult, RainCloudError, RenderError,
};
pub use crate::options::PlotOptions;
pub use crate::palette::{Palette, Rgb};
pub use crate::plotting::{
    BorderVisibility, Figure, FigureComposer, Panel, PanelStyle, PlotKind, PlotTheme,
};
pub use crate::raincloud::{DEFAULT_JITTER_STRENGTH, DEFAULT_PALETTE, RainCloudPlot};
