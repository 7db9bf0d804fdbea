//! Descriptive statistics used by every analysis.
//!
//! All functions are pure and recomputed on each call. Empty input yields
//! `None` rather than NaN so callers decide how to report it.

use statrs::statistics::Statistics;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(Statistics::mean(data))
}

/// Sample variance (n - 1 denominator). Needs at least two values.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    Some(Statistics::variance(data))
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(Statistics::min(data))
}

pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(Statistics::max(data))
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` is clamped to `[0, 1]`.
pub fn quantile(data: &[f64], q: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let v = sorted(data);
    let pos = q.clamp(0.0, 1.0) * (v.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(v[lower] + (v[upper] - v[lower]) * frac)
}

pub fn median(data: &[f64]) -> Option<f64> {
    quantile(data, 0.5)
}

/// Percentage of values less than or equal to `value`.
pub fn percentile_rank(data: &[f64], value: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let at_or_below = data.iter().filter(|&&x| x <= value).count();
    Some(at_or_below as f64 / data.len() as f64 * 100.0)
}

/// Pearson correlation coefficient.
///
/// Returns `None` when lengths differ, fewer than two pairs exist, or either
/// series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let cov = Statistics::covariance(x, y);
    let sx = std_dev(x)?;
    let sy = std_dev(y)?;
    if sx < 1e-300 || sy < 1e-300 {
        return None;
    }
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

/// One histogram bin; `upper` is inclusive only for the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Sturges bin count: `ceil(log2 n) + 1`.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Frequency distribution with Sturges binning.
///
/// A constant series yields a single bin holding every value.
pub fn histogram(data: &[f64]) -> Option<Vec<Bin>> {
    let lo = min(data)?;
    let hi = max(data)?;
    let range = hi - lo;
    if range < 1e-300 {
        return Some(vec![Bin {
            lower: lo,
            upper: hi,
            count: data.len(),
        }]);
    }

    let k = sturges_bins(data.len());
    let width = range / k as f64;
    let mut counts = vec![0usize; k];
    for &v in data {
        let idx = (((v - lo) / width).floor() as usize).min(k - 1);
        counts[idx] += 1;
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: lo + i as f64 * width,
                upper: if i == k - 1 { hi } else { lo + (i + 1) as f64 * width },
                count,
            })
            .collect(),
    )
}

/// Summary shared by histogram, dashboard and describe output.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: Option<f64>,
    pub variance: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn of(data: &[f64]) -> Option<Self> {
        Some(Self {
            count: data.len(),
            mean: mean(data)?,
            median: median(data)?,
            std: std_dev(data),
            variance: variance(data),
            min: min(data)?,
            max: max(data)?,
        })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mean_and_std_match_known_values() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&data).unwrap() - 5.0).abs() < EPS);
        // sample variance = 32 / 7
        assert!((variance(&data).unwrap() - 32.0 / 7.0).abs() < EPS);
    }

    #[test]
    fn empty_input_has_no_statistics() {
        assert!(mean(&[]).is_none());
        assert!(median(&[]).is_none());
        assert!(std_dev(&[1.0]).is_none());
        assert!(histogram(&[]).is_none());
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&data, 0.25).unwrap() - 1.75).abs() < EPS);
        assert!((median(&data).unwrap() - 2.5).abs() < EPS);
        assert!((quantile(&data, 0.75).unwrap() - 3.25).abs() < EPS);
    }

    #[test]
    fn percentile_rank_counts_values_at_or_below() {
        let data = [10.0, 20.0, 30.0, 40.0];
        assert!((percentile_rank(&data, 20.0).unwrap() - 50.0).abs() < EPS);
        assert!((percentile_rank(&data, 5.0).unwrap()).abs() < EPS);
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        let neg = [10.0, 8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_rejects_constant_series() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).is_none());
        assert!(pearson(&[1.0], &[2.0]).is_none());
    }

    #[test]
    fn histogram_uses_sturges_and_keeps_every_value() {
        let data: Vec<f64> = (0..16).map(f64::from).collect();
        let bins = histogram(&data).unwrap();
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 16);
        assert!((bins.last().unwrap().upper - 15.0).abs() < EPS);
    }

    #[test]
    fn constant_series_has_single_bin() {
        let bins = histogram(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn summary_range_is_max_minus_min() {
        let s = NumericSummary::of(&[1.0, 5.0, 3.0]).unwrap();
        assert!((s.range() - 4.0).abs() < EPS);
        assert!((s.median - 3.0).abs() < EPS);
    }
}
