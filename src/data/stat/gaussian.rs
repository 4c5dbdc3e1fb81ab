#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::dist::Gaussian;
use crate::traits::{HasSuffStat, SuffStat};

/// Gaussian sufficient statistic.
///
/// Holds the number of observations, their mean, and the sum of squared
/// deviations from that mean.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GaussianSuffStat {
    /// Number of observations
    n: usize,
    /// Mean of `x`
    mean: f64,
    /// Sum of squared deviations, Σ(x - x̄)²
    sx: f64,
}

impl GaussianSuffStat {
    #[inline]
    pub fn new() -> Self {
        GaussianSuffStat {
            n: 0,
            mean: 0.0,
            sx: 0.0,
        }
    }

    /// Create a sufficient statistic from components without checking whether
    /// they are valid.
    #[inline]
    pub fn from_parts_unchecked(n: usize, mean: f64, sx: f64) -> Self {
        GaussianSuffStat { n, mean, sx }
    }

    /// Get the number of observations
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Get the sample mean. Zero if nothing has been observed.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of `x`
    #[inline]
    pub fn sum_x(&self) -> f64 {
        self.mean * self.n as f64
    }

    /// Sum of `x^2`
    #[inline]
    pub fn sum_x_sq(&self) -> f64 {
        let nf = self.n as f64;
        self.mean().powi(2).mul_add(nf, self.sx)
    }

    /// Sum of squared deviations from the sample mean
    #[inline]
    pub fn sum_sq_dev(&self) -> f64 {
        self.sx
    }

    /// Unbiased sample variance (divides by `n - 1`).
    ///
    /// ```
    /// use bayes_est::data::GaussianSuffStat;
    /// use bayes_est::traits::SuffStat;
    ///
    /// let mut stat = GaussianSuffStat::new();
    /// stat.observe(&1.0_f64);
    /// assert!(stat.sample_variance().is_none());
    ///
    /// stat.observe(&3.0_f64);
    /// assert_eq!(stat.sample_variance(), Some(2.0));
    /// ```
    #[inline]
    pub fn sample_variance(&self) -> Option<f64> {
        if self.n > 1 {
            Some(self.sx / (self.n - 1) as f64)
        } else {
            None
        }
    }

    /// Population variance (divides by `n`)
    #[inline]
    pub fn population_variance(&self) -> Option<f64> {
        if self.n > 0 {
            Some(self.sx / self.n as f64)
        } else {
            None
        }
    }
}

impl Default for GaussianSuffStat {
    fn default() -> Self {
        GaussianSuffStat::new()
    }
}

macro_rules! impl_gaussian_suffstat {
    ($kind:ty) => {
        impl From<&[$kind]> for GaussianSuffStat {
            fn from(xs: &[$kind]) -> Self {
                let mut stat = GaussianSuffStat::new();
                stat.observe_many(xs);
                stat
            }
        }

        impl From<&Vec<$kind>> for GaussianSuffStat {
            fn from(xs: &Vec<$kind>) -> Self {
                GaussianSuffStat::from(xs.as_slice())
            }
        }

        impl HasSuffStat<$kind> for Gaussian {
            type Stat = GaussianSuffStat;

            fn empty_suffstat(&self) -> Self::Stat {
                GaussianSuffStat::new()
            }
        }

        impl SuffStat<$kind> for GaussianSuffStat {
            fn n(&self) -> usize {
                self.n
            }

            fn observe(&mut self, x: &$kind) {
                let xf = f64::from(*x);

                self.n += 1;

                let mean_xn = (xf - self.mean)
                    .mul_add((self.n as f64).recip(), self.mean);
                self.sx = (xf - self.mean).mul_add(xf - mean_xn, self.sx);
                self.mean = mean_xn;
            }

            fn forget(&mut self, x: &$kind) {
                if self.n > 1 {
                    let xf = f64::from(*x);

                    let n = self.n as f64;
                    let nm1 = (self.n - 1) as f64;

                    let old_mean = (n / nm1).mul_add(self.mean, -xf / nm1);

                    self.sx -= (xf - old_mean) * (xf - self.mean);
                    self.mean = old_mean;
                    self.n -= 1;
                } else {
                    self.n = 0;
                    self.mean = 0.0;
                    self.sx = 0.0;
                }
            }
        }
    };
}

impl_gaussian_suffstat!(f32);
impl_gaussian_suffstat!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    #[test]
    fn from_parts_unchecked() {
        let stat = GaussianSuffStat::from_parts_unchecked(10, 0.5, 1.2);
        assert_eq!(stat.n(), 10);
        assert_eq!(stat.mean(), 0.5);
        assert_eq!(stat.sum_sq_dev(), 1.2);
    }

    #[test]
    fn empty_stat_has_zero_mean_and_no_variance() {
        let stat = GaussianSuffStat::new();
        assert_eq!(stat.n(), 0);
        assert_eq!(stat.mean(), 0.0);
        assert!(stat.sample_variance().is_none());
        assert!(stat.population_variance().is_none());
    }

    #[test]
    fn suffstat_increments_correctly() {
        let xs: Vec<f64> = vec![0.0, 1.2, 2.3, 4.6];
        let mut suffstat = GaussianSuffStat::new();

        for x in xs {
            suffstat.observe(&x);
        }

        assert_eq!(suffstat.n(), 4);
        assert::close(suffstat.mean(), 2.025, 1e-14);
        assert::close(suffstat.sum_x(), 8.1, 1e-14);
        assert::close(suffstat.sum_x_sq(), 27.889_999_999_999_993, 1e-13);
    }

    #[test]
    fn suffstat_decrements_correctly() {
        let xs: Vec<f64> = vec![0.0, 1.2, 2.3, 4.6];
        let mut suffstat = GaussianSuffStat::from(&xs);

        suffstat.observe(&5.0);
        suffstat.forget(&5.0);

        assert_eq!(suffstat.n(), 4);
        assert::close(suffstat.mean(), 2.025, 1e-14);
        assert::close(suffstat.sum_x(), 8.1, 1e-14);
        assert::close(suffstat.sum_x_sq(), 27.889_999_999_999_993, 1e-13);
    }

    #[test]
    fn variances_match_two_pass_computation() {
        let xs: Vec<f64> = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stat = GaussianSuffStat::from(&xs);

        // mean is 5, sum of squared deviations is 32
        assert::close(stat.mean(), 5.0, TOL);
        assert::close(stat.sum_sq_dev(), 32.0, TOL);
        assert::close(stat.population_variance().unwrap(), 4.0, TOL);
        assert::close(stat.sample_variance().unwrap(), 32.0 / 7.0, TOL);
    }

    #[test]
    fn identical_values_have_zero_variance() {
        let stat = GaussianSuffStat::from(&vec![3.5_f64; 6]);
        assert_eq!(stat.sample_variance(), Some(0.0));
    }

    #[test]
    fn forgetting_last_observation_resets() {
        let mut stat = GaussianSuffStat::from(&vec![1.5_f32]);
        stat.forget(&1.5_f32);
        assert_eq!(stat, GaussianSuffStat::new());
    }
}
