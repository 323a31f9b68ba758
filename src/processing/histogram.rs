/// Equal-width bins with density-normalized heights.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bin_count + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Height of each bin such that the bar areas sum to 1.
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `values` over their own [min, max] span.
    ///
    /// Every bin is half-open except the last, which also takes the maximum.
    /// A zero-width span is widened to `[v - 0.5, v + 0.5]`.
    pub fn density(values: &[f64], bin_count: usize) -> Option<Self> {
        if values.is_empty() || bin_count == 0 {
            return None;
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bin_count as f64;
        let edges: Vec<f64> = (0..=bin_count)
            .map(|i| if i == bin_count { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bin_count];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        let total = values.len() as f64;
        let densities = counts.iter().map(|&c| c as f64 / (total * width)).collect();

        Some(Self { edges, densities })
    }

    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.densities)
            .map(|(edge, &d)| (edge[0], edge[1], d))
    }

    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(h: &Histogram) -> f64 {
        h.bins().map(|(l, r, d)| (r - l) * d).sum()
    }

    #[test]
    fn bar_areas_sum_to_one() {
        let values = [0.025, 0.025, 0.3, 0.31, 0.7, 1.0];
        let h = Histogram::density(&values, 20).unwrap();
        assert_eq!(h.edges.len(), 21);
        assert!((area(&h) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let h = Histogram::density(&[0.0, 0.5, 1.0], 2).unwrap();
        assert_eq!(h.edges, [0.0, 0.5, 1.0]);
        // width 0.5, n 3: one value in the first bin, two in the second.
        assert!((h.densities[0] - 1.0 / 1.5).abs() < 1e-12);
        assert!((h.densities[1] - 2.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn single_value_gets_unit_span() {
        let h = Histogram::density(&[1.0, 1.0], 20).unwrap();
        assert_eq!(h.edges[0], 0.5);
        assert_eq!(h.edges[20], 1.5);
        assert!((area(&h) - 1.0).abs() < 1e-12);
        assert!((h.max_density() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_has_no_histogram() {
        assert!(Histogram::density(&[], 20).is_none());
    }
}
