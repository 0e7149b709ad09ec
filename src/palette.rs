//! Colors and named color palettes.
//!
//! Qualitative palettes are stored as fixed hex lists. Continuous colormaps are
//! sampled at `n` interior points of `[0, 1]`, so a two-color `coolwarm` gives
//! one blue and one red without hitting the extreme ends of the map.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, ParameterError, PlotResult};

/// An opaque sRGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Create a color, clamping each channel into range.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PaletteError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| PaletteError::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let to_u8 = |c: f64| (c * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b)
        )
    }

    /// Linear interpolation between two colors.
    pub fn lerp(&self, other: &Rgb, t: f64) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Scale the HLS saturation by `prop`, keeping hue and lightness.
    pub fn desaturate(&self, prop: f64) -> Self {
        let (h, l, s) = rgb_to_hls(self.r, self.g, self.b);
        let (r, g, b) = hls_to_rgb(h, l, (s * prop).clamp(0.0, 1.0));
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < f64::EPSILON {
        return (0.0, l, 0.0);
    }
    let delta = max - min;
    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    let hue = |h: f64| {
        let h = h.rem_euclid(1.0);
        if h < 1.0 / 6.0 {
            m1 + (m2 - m1) * h * 6.0
        } else if h < 0.5 {
            m2
        } else if h < 2.0 / 3.0 {
            m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
        } else {
            m1
        }
    };
    (hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0))
}

const DEEP: &[&str] = &[
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
    "#ccb974", "#64b5cd",
];
const MUTED: &[&str] = &[
    "#4878d0", "#ee854a", "#6acc64", "#d65f5f", "#956cb4", "#8c613c", "#dc7ec0", "#797979",
    "#d5bb67", "#82c6e2",
];
const PASTEL: &[&str] = &[
    "#a1c9f4", "#ffb482", "#8de5a1", "#ff9f9b", "#d0bbff", "#debb9b", "#fab0e4", "#cfcfcf",
    "#fffea3", "#b9f2f0",
];
const BRIGHT: &[&str] = &[
    "#023eff", "#ff7c00", "#1ac938", "#e8000b", "#8b2be2", "#9f4800", "#f14cc1", "#a3a3a3",
    "#ffc400", "#00d7ff",
];
const DARK: &[&str] = &[
    "#001c7f", "#b1400d", "#12711c", "#8c0800", "#591e71", "#592f0d", "#a23582", "#3c3c3c",
    "#b8850a", "#006374",
];
const COLORBLIND: &[&str] = &[
    "#0173b2", "#de8f05", "#029e73", "#d55e00", "#cc78bc", "#ca9161", "#fbafe4", "#949494",
    "#ece133", "#56b4e9",
];
const TAB10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];
const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];
const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];
const PASTEL1: &[&str] = &[
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];
const PASTEL2: &[&str] = &[
    "#b3e2cd", "#fdcdac", "#cbd5e8", "#f4cae4", "#e6f5c9", "#fff2ae", "#f1e2cc", "#cccccc",
];
const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
const ACCENT: &[&str] = &[
    "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];
const PAIRED: &[&str] = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

// Anchor stops at evenly spaced positions along [0, 1].
const COOLWARM: &[&str] = &["#3b4cc0", "#8db0fe", "#dddcdc", "#f4987a", "#b40426"];
const VIRIDIS: &[&str] = &["#440154", "#3b528b", "#21918c", "#5ec962", "#fde725"];

fn qualitative(name: &str) -> Option<&'static [&'static str]> {
    Some(match name {
        "deep" => DEEP,
        "muted" => MUTED,
        "pastel" => PASTEL,
        "bright" => BRIGHT,
        "dark" => DARK,
        "colorblind" => COLORBLIND,
        "tab10" => TAB10,
        "Set1" => SET1,
        "Set2" => SET2,
        "Set3" => SET3,
        "Pastel1" => PASTEL1,
        "Pastel2" => PASTEL2,
        "Dark2" => DARK2,
        "Accent" => ACCENT,
        "Paired" => PAIRED,
        _ => return None,
    })
}

fn continuous(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "coolwarm" => Some(COOLWARM),
        "viridis" => Some(VIRIDIS),
        _ => None,
    }
}

fn parse_all(hexes: &[&str]) -> Result<Vec<Rgb>, PaletteError> {
    hexes.iter().map(|h| Rgb::from_hex(h)).collect()
}

fn sample_colormap(stops: &[Rgb], t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let last = stops.len() - 1;
    let scaled = t * last as f64;
    let lo = (scaled.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    stops[lo].lerp(&stops[hi], scaled - lo as f64)
}

/// Ordered list of colors; the raincloud renderers consume the first two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Rgb>);

/// The "Set2" palette.
impl Default for Palette {
    fn default() -> Self {
        Self(SET2.iter().filter_map(|h| Rgb::from_hex(h).ok()).collect())
    }
}

impl Palette {
    /// Wrap an explicit list of colors.
    pub const fn from_colors(colors: Vec<Rgb>) -> Self {
        Self(colors)
    }

    /// Parse a list of `#rrggbb` strings.
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> PlotResult<Self> {
        let colors = hexes
            .iter()
            .map(|h| Rgb::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(colors))
    }

    /// Resolve a named palette with its natural number of colors.
    ///
    /// Continuous colormaps default to six samples.
    pub fn named(name: &str) -> PlotResult<Self> {
        match qualitative(name) {
            Some(hexes) => Ok(Self(parse_all(hexes)?)),
            None => Self::named_n(name, 6),
        }
    }

    /// Resolve a named palette with exactly `n` colors.
    ///
    /// Qualitative palettes cycle when `n` exceeds their length.
    pub fn named_n(name: &str, n: usize) -> PlotResult<Self> {
        if let Some(hexes) = qualitative(name) {
            let base = parse_all(hexes)?;
            return Ok(Self(base.iter().copied().cycle().take(n).collect()));
        }
        let stops = continuous(name).ok_or_else(|| PaletteError::UnknownPalette(name.to_string()))?;
        let stops = parse_all(stops)?;
        let colors = (1..=n)
            .map(|i| sample_colormap(&stops, i as f64 / (n + 1) as f64))
            .collect();
        Ok(Self(colors))
    }

    /// All colors.
    pub fn colors(&self) -> &[Rgb] {
        &self.0
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The two colors used for the paired groups.
    ///
    /// # Errors
    /// Returns a parameter error if fewer than two colors are available.
    pub fn pair(&self) -> PlotResult<[Rgb; 2]> {
        match self.0.as_slice() {
            [first, second, ..] => Ok([*first, *second]),
            _ => Err(ParameterError::invalid_value(
                "palette",
                format!("needs at least 2 colors, got {}", self.0.len()),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_hex_parsing() {
        let c = Rgb::from_hex("#66c2a5").expect("valid hex");
        assert_eq!(c.to_hex(), "#66c2a5");
        assert_eq!("fc8d62".parse::<Rgb>().expect("no hash is fine").to_hex(), "#fc8d62");

        assert!(matches!(Rgb::from_hex("#12345"), Err(PaletteError::InvalidHex(_))));
        assert!(matches!(Rgb::from_hex("#zzzzzz"), Err(PaletteError::InvalidHex(_))));
    }

    #[test]
    fn test_set2_is_default_pair() {
        let palette = Palette::named("Set2").expect("Set2 is registered");
        assert_eq!(palette.len(), 8);
        let [a, b] = palette.pair().expect("two colors");
        assert_eq!(a.to_hex(), "#66c2a5");
        assert_eq!(b.to_hex(), "#fc8d62");
    }

    #[test]
    fn test_default_is_set2() {
        let named = Palette::named("Set2").expect("Set2 is registered");
        assert_eq!(Palette::default(), named);
    }

    #[test]
    fn test_coolwarm_two_colors() {
        let palette = Palette::named_n("coolwarm", 2).expect("coolwarm is registered");
        assert_eq!(palette.len(), 2);
        let [cool, warm] = palette.pair().expect("two colors");
        // Blue dominates the first sample, red the second.
        assert!(cool.b > cool.r);
        assert!(warm.r > warm.b);
    }

    #[test]
    fn test_qualitative_cycles() {
        let palette = Palette::named_n("Set1", 11).expect("Set1 is registered");
        assert_eq!(palette.len(), 11);
        assert_eq!(palette.colors()[9], palette.colors()[0]);
    }

    #[test]
    fn test_unknown_palette() {
        let err = Palette::named("NotAPalette").expect_err("unknown name");
        assert!(matches!(
            err,
            crate::RainCloudError::Palette(PaletteError::UnknownPalette(_))
        ));
    }

    #[test]
    fn test_pair_requires_two_colors() {
        let palette = Palette::from_hex(&["#000000"]).expect("valid hex");
        assert!(palette.pair().is_err());
    }

    #[test]
    fn test_desaturate() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        let muted = red.desaturate(0.75);
        assert_approx_eq!(muted.r, 0.875, 1e-9);
        assert_approx_eq!(muted.g, 0.125, 1e-9);
        assert_approx_eq!(muted.b, 0.125, 1e-9);

        let gray = Rgb::new(0.5, 0.5, 0.5);
        assert_eq!(gray.desaturate(0.75), gray);
    }

    #[test]
    fn test_serde_hex_strings() {
        let palette: Palette =
            serde_json::from_str(r##"["#ff0000", "#00ff00", "#0000ff"]"##).expect("valid json");
        assert_eq!(palette.len(), 3);
        let json = serde_json::to_string(&palette).expect("serializable");
        assert_eq!(json, r##"["#ff0000","#00ff00","#0000ff"]"##);
    }
}
