/// `n` evenly spaced points from `a` to `b`, inclusive.
///
/// # Example
///
/// ```rust
/// # use bayes_est::misc::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
/// assert!(linspace(3.0, 4.0, 0).is_empty());
/// ```
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { b } else { step.mul_add(i as f64, a) })
                .collect()
        }
    }
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        None
    } else {
        Some(xs.iter().sum::<f64>() / xs.len() as f64)
    }
}

/// Standard deviation with `ddof` delta degrees of freedom; the sum of
/// squared deviations is divided by `n - ddof`.
///
/// `None` if `n <= ddof`.
///
/// # Example
///
/// ```rust
/// # use bayes_est::misc::std_dev;
/// let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(std_dev(&xs, 0), Some(2.0));
/// assert!(std_dev(&[1.0], 1).is_none());
/// ```
pub fn std_dev(xs: &[f64], ddof: usize) -> Option<f64> {
    let n = xs.len();
    if n <= ddof {
        return None;
    }
    let m = mean(xs)?;
    let ss = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>();
    Some((ss / (n - ddof) as f64).sqrt())
}

/// Quantile of `xs` at `q` in [0, 1] using linear interpolation between the
/// closest ranks (numpy's default `percentile` rule).
///
/// Returns `None` for empty input or `q` outside [0, 1], and NaN if any of
/// `xs` is NaN.
///
/// # Example
///
/// ```rust
/// # use bayes_est::misc::quantile;
/// let xs = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile(&xs, 0.5), Some(2.5));
/// assert_eq!(quantile(&xs, 0.0), Some(1.0));
/// assert_eq!(quantile(&xs, 1.0), Some(4.0));
/// assert!(quantile(&xs, 1.5).is_none());
/// ```
pub fn quantile(xs: &[f64], q: f64) -> Option<f64> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Several quantiles of `xs`, sorting only once.
///
/// `None` under the same conditions as [`quantile`].
pub fn quantiles(xs: &[f64], qs: &[f64]) -> Option<Vec<f64>> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    qs.iter().map(|&q| quantile_sorted(&sorted, q)).collect()
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    if sorted.iter().any(|x| x.is_nan()) {
        return Some(f64::NAN);
    }

    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;

    Some(frac.mul_add(sorted[hi] - sorted[lo], sorted[lo]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    #[test]
    fn linspace_endpoints_are_exact() {
        let xs = linspace(-2.3, 7.1, 17);
        assert_eq!(xs.len(), 17);
        assert_eq!(xs[0], -2.3);
        assert_eq!(xs[16], 7.1);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert!(mean(&[]).is_none());
        assert::close(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0, TOL);
    }

    #[test]
    fn std_dev_bessel() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert::close(std_dev(&xs, 1).unwrap(), (32.0_f64 / 7.0).sqrt(), TOL);
    }

    #[test]
    fn quantile_matches_numpy_linear() {
        // numpy.percentile([1, 2, 3, 4, 5, 6, 7, 8, 9, 10], [2.5, 50, 97.5])
        let xs: Vec<f64> = (1..=10).map(f64::from).collect();
        let qs = quantiles(&xs, &[0.025, 0.5, 0.975]).unwrap();
        assert::close(qs[0], 1.225, TOL);
        assert::close(qs[1], 5.5, TOL);
        assert::close(qs[2], 9.775, TOL);
    }

    #[test]
    fn quantile_of_single_value() {
        assert_eq!(quantile(&[3.3], 0.025), Some(3.3));
        assert_eq!(quantile(&[3.3], 0.975), Some(3.3));
    }

    #[test]
    fn quantile_rejects_bad_input() {
        assert!(quantile(&[], 0.5).is_none());
        assert!(quantile(&[1.0], -0.1).is_none());
        assert!(quantile(&[1.0], f64::NAN).is_none());
        assert!(quantiles(&[1.0, 2.0], &[0.5, 2.0]).is_none());
    }

    #[test]
    fn quantile_with_nan_is_nan() {
        assert!(quantile(&[1.0, f64::NAN, 3.0], 0.5).unwrap().is_nan());
    }
}
