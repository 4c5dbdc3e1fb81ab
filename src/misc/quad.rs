use itertools::Itertools;

const QUAD_EPS: f64 = 1E-8;

fn simpsons_rule<F>(func: &F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let c = (a + b) / 2.0;
    let h3 = (b - a).abs() / 6.0;
    h3 * (4.0_f64.mul_add(func(c), func(a)) + func(b))
}

fn recursive_asr<F>(func: &F, a: f64, b: f64, eps: f64, whole: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let c = (a + b) / 2.0;
    let left = simpsons_rule(func, a, c);
    let right = simpsons_rule(func, c, b);
    let delta = left + right - whole;
    if delta.abs() <= 15.0 * eps {
        left + right + delta / 15.0
    } else {
        recursive_asr(func, a, c, eps / 2.0, left)
            + recursive_asr(func, c, b, eps / 2.0, right)
    }
}

/// Adaptive Simpson's quadrature
///
/// # Example
///
/// Integrate f: x<sup>2</sup> over the interval [0, 1].
///
/// ```
/// use bayes_est::misc::quad;
///
/// let func = |x: f64| x.powi(2);
/// let q = quad(func, 0.0, 1.0);
///
/// assert!((q - 1.0/3.0).abs() < 1E-8);
/// ```
pub fn quad<F>(func: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    recursive_asr(&func, a, b, QUAD_EPS, simpsons_rule(&func, a, b))
}

/// Trapezoid rule over paired grid points `(xs[i], ys[i])`.
///
/// The grid need not be evenly spaced. Extra entries in the longer slice are
/// ignored; fewer than two points integrate to zero.
///
/// # Example
///
/// ```
/// use bayes_est::misc::{linspace, trapz};
///
/// let xs = linspace(0.0, 2.0, 201);
/// let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x).collect();
///
/// assert!((trapz(&xs, &ys) - 6.0).abs() < 1E-12);
/// ```
pub fn trapz(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .tuple_windows()
        .map(|((x0, y0), (x1, y1))| 0.5 * (x1 - x0) * (y0 + y1))
        .sum()
}
