//! Bayesian estimation of a Gaussian's mean and precision
//!
//! [`BayesianNormalEstimator`] holds a fixed prior and a posterior that is
//! recomputed from that prior and a full sample on every call to
//! [`update`](BayesianNormalEstimator::update).
//!
//! # Degenerate samples
//!
//! When the sample has no spread (fewer than two values, or all values
//! equal) the belief about the mean does not move: the posterior mean and
//! mean-scale equal the prior's. The precision belief still gains `n/2` in
//! shape, and its rate only moves when `n > 1`.
//!
//! # Non-finite input
//!
//! Nothing here validates numbers. Zero or negative scales, shapes or rates
//! and NaN data produce NaN or infinite results rather than errors. Use
//! [`PriorHyperparameters::new`] to reject such priors up front.
mod samples;

pub use samples::PosteriorSamples;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use log::{debug, trace, warn};
use rand::Rng;
use std::fmt;

use crate::data::GaussianSuffStat;
use crate::dist::{NormalGamma, StudentsT};
use crate::traits::{HasDensity, Sampleable};

/// Prior belief about an unknown Gaussian's mean and precision.
///
/// The mean is believed to be `N(prior_mean, prior_mean_scale)` and the
/// precision (inverse variance) `Gamma(prior_shape, prior_rate)` in the
/// shape/rate parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct PriorHyperparameters {
    prior_mean: f64,
    prior_mean_scale: f64,
    prior_shape: f64,
    prior_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum PriorError {
    /// The prior mean is infinite or NaN
    MeanNotFinite { prior_mean: f64 },
    /// The prior mean scale is less than or equal to zero
    MeanScaleTooLow { prior_mean_scale: f64 },
    /// The prior mean scale is infinite or NaN
    MeanScaleNotFinite { prior_mean_scale: f64 },
    /// The prior shape is less than or equal to zero
    ShapeTooLow { prior_shape: f64 },
    /// The prior shape is infinite or NaN
    ShapeNotFinite { prior_shape: f64 },
    /// The prior rate is less than or equal to zero
    RateTooLow { prior_rate: f64 },
    /// The prior rate is infinite or NaN
    RateNotFinite { prior_rate: f64 },
}

impl PriorHyperparameters {
    /// Create a validated set of prior hyperparameters.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::estimator::{PriorError, PriorHyperparameters};
    ///
    /// assert!(PriorHyperparameters::new(0.0, 2.0, 1.0, 1.0).is_ok());
    /// assert_eq!(
    ///     PriorHyperparameters::new(0.0, 0.0, 1.0, 1.0),
    ///     Err(PriorError::MeanScaleTooLow { prior_mean_scale: 0.0 }),
    /// );
    /// ```
    pub fn new(
        prior_mean: f64,
        prior_mean_scale: f64,
        prior_shape: f64,
        prior_rate: f64,
    ) -> Result<Self, PriorError> {
        if !prior_mean.is_finite() {
            Err(PriorError::MeanNotFinite { prior_mean })
        } else if !prior_mean_scale.is_finite() {
            Err(PriorError::MeanScaleNotFinite { prior_mean_scale })
        } else if prior_mean_scale <= 0.0 {
            Err(PriorError::MeanScaleTooLow { prior_mean_scale })
        } else if !prior_shape.is_finite() {
            Err(PriorError::ShapeNotFinite { prior_shape })
        } else if prior_shape <= 0.0 {
            Err(PriorError::ShapeTooLow { prior_shape })
        } else if !prior_rate.is_finite() {
            Err(PriorError::RateNotFinite { prior_rate })
        } else if prior_rate <= 0.0 {
            Err(PriorError::RateTooLow { prior_rate })
        } else {
            Ok(Self::new_unchecked(
                prior_mean,
                prior_mean_scale,
                prior_shape,
                prior_rate,
            ))
        }
    }

    /// Create prior hyperparameters without checking whether they are valid.
    #[inline]
    pub fn new_unchecked(
        prior_mean: f64,
        prior_mean_scale: f64,
        prior_shape: f64,
        prior_rate: f64,
    ) -> Self {
        PriorHyperparameters {
            prior_mean,
            prior_mean_scale,
            prior_shape,
            prior_rate,
        }
    }

    /// Center of the belief about the mean, μ₀
    #[inline]
    pub fn prior_mean(&self) -> f64 {
        self.prior_mean
    }

    /// Spread of the belief about the mean, σ₀
    #[inline]
    pub fn prior_mean_scale(&self) -> f64 {
        self.prior_mean_scale
    }

    /// Shape of the Gamma belief about the precision, α₀
    #[inline]
    pub fn prior_shape(&self) -> f64 {
        self.prior_shape
    }

    /// Rate of the Gamma belief about the precision, β₀
    #[inline]
    pub fn prior_rate(&self) -> f64 {
        self.prior_rate
    }

    /// Precision of the belief about the mean, 1/σ₀²
    #[inline]
    pub fn prior_precision(&self) -> f64 {
        self.prior_mean_scale.powi(2).recip()
    }
}

impl Default for PriorHyperparameters {
    fn default() -> Self {
        PriorHyperparameters::new_unchecked(0.0, 1.0, 1.0, 1.0)
    }
}

impl From<&PriorHyperparameters> for String {
    fn from(prior: &PriorHyperparameters) -> String {
        format!(
            "Prior(μ₀: {}, σ₀: {}, α₀: {}, β₀: {})",
            prior.prior_mean,
            prior.prior_mean_scale,
            prior.prior_shape,
            prior.prior_rate
        )
    }
}

crate::impl_display!(PriorHyperparameters);

/// Posterior belief, recomputed in full on every update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct PosteriorState {
    posterior_mean: f64,
    posterior_mean_scale: f64,
    posterior_shape: f64,
    posterior_rate: f64,
    observed_data: Vec<f64>,
}

impl PosteriorState {
    /// The posterior before any data has been seen is the prior
    pub fn from_prior(prior: &PriorHyperparameters) -> Self {
        PosteriorState {
            posterior_mean: prior.prior_mean,
            posterior_mean_scale: prior.prior_mean_scale,
            posterior_shape: prior.prior_shape,
            posterior_rate: prior.prior_rate,
            observed_data: Vec::new(),
        }
    }

    /// Point estimate of the unknown mean, μₙ
    #[inline]
    pub fn posterior_mean(&self) -> f64 {
        self.posterior_mean
    }

    /// Spread of the belief about the mean, σₙ
    #[inline]
    pub fn posterior_mean_scale(&self) -> f64 {
        self.posterior_mean_scale
    }

    /// Shape of the precision belief, αₙ
    #[inline]
    pub fn posterior_shape(&self) -> f64 {
        self.posterior_shape
    }

    /// Rate of the precision belief, βₙ
    #[inline]
    pub fn posterior_rate(&self) -> f64 {
        self.posterior_rate
    }

    /// The sample the posterior was last computed from
    #[inline]
    pub fn observed_data(&self) -> &[f64] {
        &self.observed_data
    }
}

impl From<&PosteriorState> for String {
    fn from(post: &PosteriorState) -> String {
        format!(
            "Posterior(μₙ: {}, σₙ: {}, αₙ: {}, βₙ: {}, n: {})",
            post.posterior_mean,
            post.posterior_mean_scale,
            post.posterior_shape,
            post.posterior_rate,
            post.observed_data.len()
        )
    }
}

crate::impl_display!(PosteriorState);

/// Estimates the mean and precision of a Gaussian from a sample.
///
/// # Example
///
/// ```
/// use bayes_est::estimator::BayesianNormalEstimator;
///
/// let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
///
/// // A single observation has no spread, so the mean belief is unchanged
/// est.update(&[5.0]);
/// assert_eq!(est.posterior_mean(), 0.0);
/// assert_eq!(est.posterior_mean_scale(), 2.0);
/// assert_eq!(est.posterior_shape(), 1.5);
/// assert_eq!(est.posterior_rate(), 1.0);
///
/// // Updating again starts over from the prior
/// est.update(&[4.0, 6.0]);
/// assert_eq!(est.posterior_shape(), 2.0);
/// assert_eq!(est.n_updates(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct BayesianNormalEstimator {
    prior: PriorHyperparameters,
    posterior: PosteriorState,
    n_updates: usize,
}

impl BayesianNormalEstimator {
    /// Create an estimator from prior hyperparameters. No validation is
    /// performed.
    ///
    /// # Arguments
    /// - prior_mean: center of the belief about the mean, μ₀
    /// - prior_mean_scale: spread of the belief about the mean, σ₀
    /// - prior_shape: shape of the Gamma belief about the precision, α₀
    /// - prior_rate: rate of the Gamma belief about the precision, β₀
    pub fn new(
        prior_mean: f64,
        prior_mean_scale: f64,
        prior_shape: f64,
        prior_rate: f64,
    ) -> Self {
        Self::from_prior(PriorHyperparameters::new_unchecked(
            prior_mean,
            prior_mean_scale,
            prior_shape,
            prior_rate,
        ))
    }

    /// Create an estimator whose posterior starts equal to `prior`
    pub fn from_prior(prior: PriorHyperparameters) -> Self {
        BayesianNormalEstimator {
            posterior: PosteriorState::from_prior(&prior),
            prior,
            n_updates: 0,
        }
    }

    #[inline]
    pub fn prior(&self) -> &PriorHyperparameters {
        &self.prior
    }

    #[inline]
    pub fn posterior(&self) -> &PosteriorState {
        &self.posterior
    }

    #[inline]
    pub fn posterior_mean(&self) -> f64 {
        self.posterior.posterior_mean
    }

    #[inline]
    pub fn posterior_mean_scale(&self) -> f64 {
        self.posterior.posterior_mean_scale
    }

    #[inline]
    pub fn posterior_shape(&self) -> f64 {
        self.posterior.posterior_shape
    }

    #[inline]
    pub fn posterior_rate(&self) -> f64 {
        self.posterior.posterior_rate
    }

    #[inline]
    pub fn observed_data(&self) -> &[f64] {
        &self.posterior.observed_data
    }

    /// Number of times [`update`](Self::update) has been called
    #[inline]
    pub fn n_updates(&self) -> usize {
        self.n_updates
    }

    /// Recompute the posterior from the prior and `data`.
    ///
    /// Any previous posterior is discarded, not folded in. To chain updates,
    /// see [`into_sequential_prior`](Self::into_sequential_prior).
    pub fn update(&mut self, data: &[f64]) {
        let prior = &self.prior;
        let stat = GaussianSuffStat::from(data);

        let n = stat.n();
        let nf = n as f64;
        let sample_mean = stat.mean();
        let sample_variance = stat.sample_variance().unwrap_or(0.0);

        let prior_precision = prior.prior_precision();
        let has_spread = sample_variance > 0.0;

        let posterior_precision = if has_spread {
            prior_precision + nf / sample_variance
        } else {
            prior_precision
        };

        let (posterior_mean, posterior_mean_scale) = if has_spread {
            let mean = prior_precision
                .mul_add(prior.prior_mean, nf * sample_mean / sample_variance)
                / posterior_precision;
            (mean, posterior_precision.sqrt().recip())
        } else {
            debug!(
                "sample of {} value(s) has no spread; mean belief stays at the prior",
                n
            );
            // 1/sqrt(1/σ₀²) without the round trip
            (prior.prior_mean, prior.prior_mean_scale.abs())
        };

        let posterior_shape = nf.mul_add(0.5, prior.prior_shape);

        let posterior_rate = if n > 1 {
            let dev = sample_mean - prior.prior_mean;
            prior.prior_rate
                + stat.sum_sq_dev() / 2.0
                + (prior_precision * nf * dev * dev)
                    / (2.0 * posterior_precision)
        } else {
            prior.prior_rate
        };

        self.posterior = PosteriorState {
            posterior_mean,
            posterior_mean_scale,
            posterior_shape,
            posterior_rate,
            observed_data: data.to_vec(),
        };
        self.n_updates += 1;

        trace!("updated {}", self.posterior);
    }

    /// The joint belief about `(μ, σ)` implied by the current posterior
    pub fn posterior_distr(&self) -> NormalGamma {
        NormalGamma::new_unchecked(
            self.posterior.posterior_mean,
            self.posterior.posterior_mean_scale,
            self.posterior.posterior_shape,
            self.posterior.posterior_rate,
        )
    }

    /// Draw `n_samples` Monte Carlo samples of `(μ, σ)` from the posterior.
    ///
    /// All precisions `ρ ~ Gamma(αₙ, βₙ)` are drawn first, giving
    /// `σ = 1/√ρ`, then all means `μ ~ N(μₙ, σₙ)`. The mean is drawn
    /// independently of the drawn precision.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::estimator::BayesianNormalEstimator;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    /// est.update(&[2.1, 2.9, 2.4, 3.3]);
    ///
    /// let a = est.sample_posterior(500, &mut StdRng::seed_from_u64(3));
    /// let b = est.sample_posterior(500, &mut StdRng::seed_from_u64(3));
    /// assert_eq!(a, b);
    /// ```
    pub fn sample_posterior<R: Rng>(
        &self,
        n_samples: usize,
        rng: &mut R,
    ) -> PosteriorSamples {
        let distr = self.posterior_distr();
        if let Err(err) = NormalGamma::new(
            distr.m(),
            distr.s(),
            distr.shape(),
            distr.rate(),
        ) {
            warn!("sampling from an invalid posterior ({}); draws may be NaN", err);
        }

        let (mu, sigma): (Vec<f64>, Vec<f64>) =
            distr.sample(n_samples, rng).into_iter().unzip();
        PosteriorSamples::new_unchecked(mu, sigma)
    }

    /// The Student's t posterior predictive distribution with `ν = 2αₙ`,
    /// location `μₙ` and scale `√(2βₙ/αₙ)`.
    pub fn predictive_distr(&self) -> StudentsT {
        let shape = self.posterior.posterior_shape;
        // The factor of two stands in for (1 + 1/κ) with κ fixed at one
        let scale = (self.posterior.posterior_rate * (1.0 + 1.0) / shape).sqrt();
        StudentsT::new_unchecked(2.0 * shape, self.posterior.posterior_mean, scale)
    }

    /// Posterior predictive density at each of `xs`.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::estimator::BayesianNormalEstimator;
    ///
    /// let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    /// est.update(&[2.1, 2.9, 2.4, 3.3]);
    ///
    /// let fs = est.posterior_predictive(&[-1.0, 2.0, 10.0]);
    /// assert_eq!(fs.len(), 3);
    /// assert!(fs.iter().all(|&f| f >= 0.0));
    /// assert!(fs[1] > fs[0] && fs[1] > fs[2]);
    /// ```
    pub fn posterior_predictive(&self, xs: &[f64]) -> Vec<f64> {
        let t = self.predictive_distr();
        xs.iter().map(|x| t.f(x)).collect()
    }

    /// Posterior predictive density at a single point
    pub fn posterior_predictive_at(&self, x: f64) -> f64 {
        self.predictive_distr().f(&x)
    }

    /// Log posterior predictive density at a single point
    pub fn ln_posterior_predictive_at(&self, x: f64) -> f64 {
        self.predictive_distr().ln_f(&x)
    }

    /// A fresh estimator whose prior is this estimator's posterior.
    ///
    /// This is how to update sequentially: `update` on the returned
    /// estimator conditions on new data given everything seen so far.
    ///
    /// ```
    /// use bayes_est::estimator::BayesianNormalEstimator;
    ///
    /// let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    /// est.update(&[2.1, 2.9, 2.4, 3.3]);
    ///
    /// let mut next = est.into_sequential_prior();
    /// assert_eq!(next.prior().prior_shape(), 3.0);
    /// assert_eq!(next.n_updates(), 0);
    ///
    /// next.update(&[2.0, 2.6]);
    /// assert_eq!(next.posterior_shape(), 4.0);
    /// ```
    pub fn into_sequential_prior(&self) -> Self {
        Self::from_prior(PriorHyperparameters::new_unchecked(
            self.posterior.posterior_mean,
            self.posterior.posterior_mean_scale,
            self.posterior.posterior_shape,
            self.posterior.posterior_rate,
        ))
    }
}

impl Default for BayesianNormalEstimator {
    fn default() -> Self {
        Self::from_prior(PriorHyperparameters::default())
    }
}

impl From<&BayesianNormalEstimator> for String {
    fn from(est: &BayesianNormalEstimator) -> String {
        format!(
            "BayesianNormalEstimator {{ {}, {}, updates: {} }}",
            est.prior, est.posterior, est.n_updates
        )
    }
}

crate::impl_display!(BayesianNormalEstimator);

impl std::error::Error for PriorError {}

impl fmt::Display for PriorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeanNotFinite { prior_mean } => {
                write!(f, "non-finite prior mean: {}", prior_mean)
            }
            Self::MeanScaleTooLow { prior_mean_scale } => write!(
                f,
                "prior mean scale ({}) must be greater than zero",
                prior_mean_scale
            ),
            Self::MeanScaleNotFinite { prior_mean_scale } => {
                write!(f, "non-finite prior mean scale: {}", prior_mean_scale)
            }
            Self::ShapeTooLow { prior_shape } => write!(
                f,
                "prior shape ({}) must be greater than zero",
                prior_shape
            ),
            Self::ShapeNotFinite { prior_shape } => {
                write!(f, "non-finite prior shape: {}", prior_shape)
            }
            Self::RateTooLow { prior_rate } => write!(
                f,
                "prior rate ({}) must be greater than zero",
                prior_rate
            ),
            Self::RateNotFinite { prior_rate } => {
                write!(f, "non-finite prior rate: {}", prior_rate)
            }
        }
    }
}

#[cfg(test)]
mod tests;
