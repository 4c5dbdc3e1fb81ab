#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::dist::Gaussian;
use crate::summary::{CredibleInterval, SampleSummary, SummaryError};
use crate::traits::HasDensity;

/// Paired Monte Carlo draws of a Gaussian's mean, `mu`, and standard
/// deviation, `sigma`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct PosteriorSamples {
    mu: Vec<f64>,
    sigma: Vec<f64>,
}

impl PosteriorSamples {
    /// Pair up draws of `mu` and `sigma`, which must have equal lengths.
    pub fn new(mu: Vec<f64>, sigma: Vec<f64>) -> Result<Self, SummaryError> {
        if mu.len() == sigma.len() {
            Ok(PosteriorSamples { mu, sigma })
        } else {
            Err(SummaryError::LengthMismatch {
                n_mu: mu.len(),
                n_sigma: sigma.len(),
            })
        }
    }

    /// Pair up draws without checking their lengths
    #[inline]
    pub fn new_unchecked(mu: Vec<f64>, sigma: Vec<f64>) -> Self {
        PosteriorSamples { mu, sigma }
    }

    #[inline]
    pub fn mu(&self) -> &[f64] {
        &self.mu
    }

    #[inline]
    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    /// Number of draws
    #[inline]
    pub fn len(&self) -> usize {
        self.mu.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mu.is_empty()
    }

    /// Take ownership of `(mu, sigma)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.mu, self.sigma)
    }

    /// Summary statistics of the `mu` draws
    pub fn mu_summary(&self) -> Option<SampleSummary> {
        SampleSummary::new(&self.mu)
    }

    /// Summary statistics of the `sigma` draws
    pub fn sigma_summary(&self) -> Option<SampleSummary> {
        SampleSummary::new(&self.sigma)
    }

    /// Equal-tailed credible interval for `mu`
    pub fn mu_interval(
        &self,
        level: f64,
    ) -> Result<CredibleInterval, SummaryError> {
        CredibleInterval::from_samples(&self.mu, level)
    }

    /// Equal-tailed credible interval for `sigma`
    pub fn sigma_interval(
        &self,
        level: f64,
    ) -> Result<CredibleInterval, SummaryError> {
        CredibleInterval::from_samples(&self.sigma, level)
    }

    /// Monte Carlo predictive density at `xs`.
    ///
    /// Averages the Gaussian densities `N(muᵢ, sigmaᵢ)` over roughly
    /// `n_curves` draws taken at an even stride of `len / n_curves` (at
    /// least 1). Returns `None` if there are no draws or `n_curves` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::estimator::PosteriorSamples;
    ///
    /// let samples =
    ///     PosteriorSamples::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
    /// let fs = samples.mean_predictive(&[0.0], 2).unwrap();
    ///
    /// // Both curves are the standard normal
    /// assert!((fs[0] - 0.398_942_280_401_432_7).abs() < 1E-12);
    /// ```
    pub fn mean_predictive(&self, xs: &[f64], n_curves: usize) -> Option<Vec<f64>> {
        if self.is_empty() || n_curves == 0 {
            return None;
        }

        let stride = (self.len() / n_curves).max(1);
        let curves: Vec<Gaussian> = self
            .mu
            .iter()
            .zip(self.sigma.iter())
            .step_by(stride)
            .map(|(&mu, &sigma)| Gaussian::new_unchecked(mu, sigma))
            .collect();

        let n = curves.len() as f64;
        let fs = xs
            .iter()
            .map(|x| curves.iter().map(|g| g.f(x)).sum::<f64>() / n)
            .collect();
        Some(fs)
    }
}

impl From<PosteriorSamples> for (Vec<f64>, Vec<f64>) {
    fn from(samples: PosteriorSamples) -> Self {
        samples.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    #[test]
    fn new_rejects_mismatched_lengths() {
        assert_eq!(
            PosteriorSamples::new(vec![1.0, 2.0], vec![1.0]),
            Err(SummaryError::LengthMismatch { n_mu: 2, n_sigma: 1 })
        );
    }

    #[test]
    fn into_tuple() {
        let samples =
            PosteriorSamples::new_unchecked(vec![1.0, 2.0], vec![0.5, 0.6]);
        let (mu, sigma): (Vec<f64>, Vec<f64>) = samples.into();
        assert_eq!(mu, vec![1.0, 2.0]);
        assert_eq!(sigma, vec![0.5, 0.6]);
    }

    #[test]
    fn empty_samples_have_no_summaries() {
        let samples = PosteriorSamples::default();
        assert!(samples.is_empty());
        assert!(samples.mu_summary().is_none());
        assert!(samples.sigma_summary().is_none());
        assert!(samples.mu_interval(0.95).is_err());
        assert!(samples.mean_predictive(&[0.0], 10).is_none());
    }

    #[test]
    fn mean_predictive_uses_strided_draws() {
        // stride is 4 / 2 = 2, so draws 0 and 2 are used
        let samples = PosteriorSamples::new(
            vec![0.0, 100.0, 2.0, 100.0],
            vec![1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let fs = samples.mean_predictive(&[1.0], 2).unwrap();
        let expected = Gaussian::standard().f(&1.0_f64);
        assert::close(fs[0], expected, TOL);
    }

    #[test]
    fn mean_predictive_more_curves_than_draws() {
        let samples =
            PosteriorSamples::new(vec![0.0, 2.0], vec![1.0, 1.0]).unwrap();
        let fs = samples.mean_predictive(&[1.0], 100).unwrap();
        let expected = Gaussian::standard().f(&1.0_f64);
        assert::close(fs[0], expected, TOL);
    }
}
