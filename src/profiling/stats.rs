//! Numeric kernels shared by the profilers.
//!
//! All functions take already-filtered samples (no missing values). Functions return `None` when
//! the statistic is undefined for the given input instead of producing `NaN`.

use crate::types::{DataSet, Value};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (denominator `n - 1`). Undefined below two samples.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Copy of `values` in ascending order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Percentile `p` in `[0, 1]` of an ascending slice, by linear interpolation between the order
/// statistics at `floor((n - 1) p)` and `ceil((n - 1) p)`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if lo == hi || frac == 0.0 {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Pearson correlation coefficient of two equally long samples.
///
/// `None` when fewer than two pairs exist or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx * syy).sqrt();
    if r.is_finite() {
        Some(r.clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Rows where both columns hold a numeric value, as `(row_index, x, y)` in row order.
///
/// Each column pair gets its own pass, so different pairs may keep different rows.
pub fn paired_values(dataset: &DataSet, x_idx: usize, y_idx: usize) -> Vec<(usize, f64, f64)> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter_map(|(row_idx, row)| {
            let x = row.get(x_idx).and_then(Value::as_f64)?;
            let y = row.get(y_idx).and_then(Value::as_f64)?;
            Some((row_idx, x, y))
        })
        .collect()
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_and_std() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&v), Some(3.0));
        assert!(close(sample_std_dev(&v).unwrap(), 2.5f64.sqrt()));
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std_dev(&[7.0]), None);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let s = sorted(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(close(percentile_sorted(&s, 0.25).unwrap(), 1.75));
        assert!(close(percentile_sorted(&s, 0.5).unwrap(), 2.5));
        assert!(close(percentile_sorted(&s, 0.75).unwrap(), 3.25));
        assert_eq!(percentile_sorted(&s, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&s, 1.0), Some(4.0));
        assert_eq!(percentile_sorted(&[9.0], 0.75), Some(9.0));
        assert_eq!(percentile_sorted(&[], 0.5), None);
    }

    #[test]
    fn percentile_on_an_order_statistic_returns_it_exactly() {
        let s = [1.0, 2.0, f64::INFINITY, f64::INFINITY, f64::INFINITY];
        assert_eq!(percentile_sorted(&s, 0.25), Some(2.0));
        assert_eq!(percentile_sorted(&s, 0.75), Some(f64::INFINITY));
        assert_eq!(percentile_sorted(&s, 1.0), Some(f64::INFINITY));
    }

    #[test]
    fn pearson_perfect_and_undefined() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!(close(pearson(&x, &[2.0, 4.0, 6.0, 8.0]).unwrap(), 1.0));
        assert!(close(pearson(&x, &[8.0, 6.0, 4.0, 2.0]).unwrap(), -1.0));
        assert_eq!(pearson(&x, &[5.0, 5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
        assert_eq!(pearson(&x, &[1.0]), None);
    }

    #[test]
    fn paired_values_drops_rows_missing_either_side() {
        let schema = Schema::new(vec![
            Field::new("a", DataType::Float64),
            Field::new("b", DataType::Int64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Float64(1.0), Value::Int64(10)],
                vec![Value::Null, Value::Int64(20)],
                vec![Value::Float64(3.0), Value::Null],
                vec![Value::Float64(f64::NAN), Value::Int64(40)],
                vec![Value::Float64(5.0), Value::Int64(50)],
            ],
        );
        assert_eq!(
            paired_values(&ds, 0, 1),
            vec![(0, 1.0, 10.0), (4, 5.0, 50.0)]
        );
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(66.666_666, 2), 66.67);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
