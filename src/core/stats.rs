// NYHousing - core/stats.rs
//
// Small descriptive-statistics helpers shared by the query engine and the
// dashboard. Every function returns `None` on empty input instead of
// dividing by zero or indexing past the end.

/// Quantile of already-sorted data using linear interpolation between the
/// two nearest ranks (position `(n - 1) * q`). `q` is clamped to [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let q = q.clamp(0.0, 1.0);

    let position = last as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    let lo = sorted[lower];
    let hi = sorted[upper.min(last)];
    Some(lo + (hi - lo) * weight)
}

/// Count, mean, minimum, and maximum of a set of prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl PriceStats {
    /// Single pass over `prices`. `None` when the iterator is empty.
    pub fn from_prices<I: IntoIterator<Item = f64>>(prices: I) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for price in prices {
            count += 1;
            sum += price;
            min = min.min(price);
            max = max.max(price);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            // Summation order can push the mean a hair outside [min, max].
            mean: (sum / count as f64).clamp(min, max),
            min,
            max,
        })
    }
}

/// Five-number summary used to draw a boxplot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumber {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count: sorted.len(),
            min: *sorted.first()?,
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}
