use histo_common::{HistoError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub left: f64,
    pub right: f64,
}

impl Bound {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn is_degenerate(&self) -> bool {
        self.left == self.right
    }

    /// closed on both ends; NaN is never contained
    pub fn contains(&self, v: f64) -> bool {
        v >= self.left && v <= self.right
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub bound: Bound,
    pub count: u64,
}

impl Bin {
    pub fn left(&self) -> f64 {
        self.bound.left
    }
    pub fn right(&self) -> f64 {
        self.bound.right
    }
}

/// Effective bound for `values`: explicit sides are kept as given, missing
/// sides take the data minimum / maximum. Empty input resolves to `[0, 0]`.
pub fn resolve_bounds(values: &[f64], left: Option<f64>, right: Option<f64>) -> Bound {
    if let (Some(l), Some(r)) = (left, right) {
        return Bound::new(l, r);
    }
    let data = data_extent(values);
    Bound::new(left.unwrap_or(data.left), right.unwrap_or(data.right))
}

fn data_extent(values: &[f64]) -> Bound {
    let mut finite = values.iter().copied().filter(|v| !v.is_nan());
    let Some(first) = finite.next() else {
        return Bound::new(0.0, 0.0);
    };
    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Bound::new(min, max)
}

/// Upper limit on the number of bins; each bin is one line of output.
pub const MAX_BINS: usize = 1 << 20;

pub fn validate_bin_count(n: i64) -> Result<usize> {
    if n <= 0 {
        return Err(HistoError::InvalidBinCount(n));
    }
    match usize::try_from(n) {
        Ok(count) if count <= MAX_BINS => Ok(count),
        _ => Err(HistoError::TooManyBins { requested: n, max: MAX_BINS }),
    }
}

/// Edge `i` of `n` by interpolation, which stays finite for any finite bound
/// even when `right - left` overflows.
fn edge(bound: Bound, i: usize, n: usize) -> f64 {
    let t = i as f64 / n as f64;
    bound.left * (1.0 - t) + bound.right * t
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bound: Bound,
    pub bin_width: f64,
    pub bins: Vec<Bin>,
    pub total: u64,
    pub excluded: u64, // outside the bound, or NaN
}

impl Histogram {
    pub fn build(values: &[f64], bin_count: i64, bound: Bound) -> Result<Self> {
        let n = validate_bin_count(bin_count)?;
        if bound.left > bound.right {
            warn!(
                left = bound.left,
                right = bound.right,
                "left bound exceeds right bound; every value will be excluded"
            );
        } else if bound.is_degenerate() && !values.is_empty() {
            warn!(edge = bound.left, "degenerate bound, all bins have zero width");
        }
        let mut width = (bound.right - bound.left) / n as f64;
        if !width.is_finite() {
            width = bound.right / n as f64 - bound.left / n as f64;
        }

        // edges[i]..edges[i + 1] is bin i; shared edges keep neighbours contiguous
        let mut edges: Vec<f64> = (0..n).map(|i| edge(bound, i, n)).collect();
        edges.push(bound.right);
        let mut bins: Vec<Bin> = edges
            .windows(2)
            .map(|w| Bin { bound: Bound::new(w[0], w[1]), count: 0 })
            .collect();

        // halved so the span cannot overflow
        let half_span = bound.right / 2.0 - bound.left / 2.0;
        let mut excluded = 0u64;
        for &v in values {
            if !bound.contains(v) {
                excluded += 1;
                continue;
            }
            let idx = if bound.is_degenerate() {
                0
            } else if v == bound.right {
                n - 1
            } else {
                let t = (v / 2.0 - bound.left / 2.0) / half_span;
                // saturating cast, then settle against the stored edges
                let mut idx = ((t * n as f64) as usize).min(n - 1);
                while idx > 0 && v < edges[idx] {
                    idx -= 1;
                }
                while idx + 1 < n && v >= edges[idx + 1] {
                    idx += 1;
                }
                idx
            };
            bins[idx].count += 1;
        }

        debug!(bins = n, width, excluded, total = values.len(), "binned values");
        Ok(Self {
            bound,
            bin_width: width,
            bins,
            total: values.len() as u64,
            excluded,
        })
    }

    pub fn binned(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

pub fn group_to_bins(values: &[f64], bin_count: i64, bound: Bound) -> Result<Vec<Bin>> {
    Histogram::build(values, bin_count, bound).map(|h| h.bins)
}
