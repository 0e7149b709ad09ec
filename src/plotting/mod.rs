//! Figure model, panel renderers and plotly output.
//!
//! - **core**: the backend-independent [`Figure`] / [`Panel`] / [`Artist`] model
//! - **elements**: strip, box and half-violin renderers behind [`PanelElement`]
//! - **cosmetics**: title, label, tick and spine helpers shared by every panel
//! - **composer**: conversion to plotly, HTML output and display

pub mod composer;
pub mod core;
pub mod cosmetics;
pub mod elements;

pub use composer::*;
pub use core::*;
pub use cosmetics::*;
pub use elements::*;
