//! Summary statistics behind the box and half-violin panels.

use std::f64::consts::PI;

/// Linear-interpolated percentile of pre-sorted data, `q` in `0.0..=1.0`.
///
/// Matches the default ("linear") method used by numpy.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn finite_sorted(values: &[f64]) -> Vec<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    finite.sort_by(f64::total_cmp);
    finite
}

/// Sample standard deviation (ddof = 1) of finite values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return None;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

/// Five-number summary with Tukey whiskers, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Lowest observation within `q1 - whis * IQR`.
    pub whisker_low: f64,
    /// Highest observation within `q3 + whis * IQR`.
    pub whisker_high: f64,
    /// Observations beyond the whiskers.
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// Default whisker reach in multiples of the IQR.
    pub const WHIS: f64 = 1.5;

    /// Compute the summary of the finite values, or `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Self::with_whis(values, Self::WHIS)
    }

    /// Compute the summary with a custom whisker reach.
    pub fn with_whis(values: &[f64], whis: f64) -> Option<Self> {
        let sorted = finite_sorted(values);
        let q1 = percentile_sorted(&sorted, 0.25)?;
        let median = percentile_sorted(&sorted, 0.5)?;
        let q3 = percentile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - whis * iqr;
        let high_fence = q3 + whis * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1)
            .min(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3)
            .max(q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }
}

/// Parameters for a Gaussian kernel density estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdeConfig {
    /// Bandwidth as a multiple of the sample standard deviation.
    pub bw_factor: f64,
    /// Number of support points.
    pub gridsize: usize,
    /// How many bandwidths the support extends past the data range.
    pub cut: f64,
}

impl Default for KdeConfig {
    fn default() -> Self {
        Self {
            bw_factor: 0.3,
            gridsize: 100,
            cut: 2.0,
        }
    }
}

/// Density evaluated along an evenly spaced support.
#[derive(Debug, Clone, PartialEq)]
pub struct KdeCurve {
    /// Evaluation points, ascending.
    pub support: Vec<f64>,
    /// Density at each support point.
    pub density: Vec<f64>,
    /// Kernel bandwidth in data units.
    pub bandwidth: f64,
}

impl KdeCurve {
    /// Largest density value on the support.
    pub fn peak(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }

    /// Rescale so that `peak` maps to 1.0.
    pub fn normalized_by(mut self, peak: f64) -> Self {
        if peak > 0.0 {
            self.density.iter_mut().for_each(|d| *d /= peak);
        }
        self
    }
}

/// Gaussian KDE of the finite values.
///
/// Returns `None` when fewer than two finite values exist or they have zero
/// spread, since no bandwidth can be derived.
pub fn gaussian_kde(values: &[f64], config: &KdeConfig) -> Option<KdeCurve> {
    let data = finite_sorted(values);
    let std = sample_std(&data)?;
    let bandwidth = config.bw_factor * std;
    if bandwidth <= 0.0 || !bandwidth.is_finite() || config.gridsize < 2 {
        return None;
    }

    let lo = data[0] - config.cut * bandwidth;
    let hi = data[data.len() - 1] + config.cut * bandwidth;
    let step = (hi - lo) / (config.gridsize - 1) as f64;
    let norm = 1.0 / (data.len() as f64 * bandwidth * (2.0 * PI).sqrt());

    let support: Vec<f64> = (0..config.gridsize).map(|i| lo + step * i as f64).collect();
    let density = support
        .iter()
        .map(|&x| {
            norm * data
                .iter()
                .map(|xi| (-0.5 * ((x - xi) / bandwidth).powi(2)).exp())
                .sum::<f64>()
        })
        .collect();

    Some(KdeCurve {
        support,
        density,
        bandwidth,
    })
}
