//! Summaries of posterior draws and the frequentist point of comparison
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::consts::Z_975;
use crate::estimator::{
    BayesianNormalEstimator, PosteriorSamples, PosteriorState,
    PriorHyperparameters,
};
use crate::misc::{mean, quantiles, std_dev};

/// Level of the intervals in a [`PosteriorReport`]
pub const DEFAULT_LEVEL: f64 = 0.95;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum SummaryError {
    /// There were no samples to summarize
    EmptySamples,
    /// The interval level must be in (0, 1)
    LevelOutOfRange { level: f64 },
    /// The computation needs more observations than were given
    TooFewObservations { n: usize, required: usize },
    /// Paired draws of the mean and standard deviation differ in number
    LengthMismatch { n_mu: usize, n_sigma: usize },
}

/// Location and spread of a set of draws.
///
/// The standard deviation divides by `n`. Percentiles use linear
/// interpolation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// 2.5th percentile
    pub p025: f64,
    pub median: f64,
    /// 97.5th percentile
    pub p975: f64,
}

impl SampleSummary {
    /// Summarize `xs`. `None` if `xs` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::summary::SampleSummary;
    ///
    /// let xs: Vec<f64> = (1..=10).map(f64::from).collect();
    /// let summary = SampleSummary::new(&xs).unwrap();
    ///
    /// assert_eq!(summary.mean, 5.5);
    /// assert_eq!(summary.median, 5.5);
    /// assert!((summary.p025 - 1.225).abs() < 1E-12);
    /// ```
    pub fn new(xs: &[f64]) -> Option<Self> {
        let qs = quantiles(xs, &[0.025, 0.5, 0.975])?;
        Some(SampleSummary {
            n: xs.len(),
            mean: mean(xs)?,
            std_dev: std_dev(xs, 0)?,
            p025: qs[0],
            median: qs[1],
            p975: qs[2],
        })
    }
}

/// Equal-tailed interval holding `level` of the probability mass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CredibleInterval {
    pub level: f64,
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

impl CredibleInterval {
    /// Interval from the `(1 - level)/2` and `(1 + level)/2` quantiles of
    /// `xs`.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::summary::{CredibleInterval, SummaryError};
    ///
    /// let xs: Vec<f64> = (0..=100).map(f64::from).collect();
    /// let ci = CredibleInterval::from_samples(&xs, 0.9).unwrap();
    ///
    /// assert!((ci.lower - 5.0).abs() < 1E-9);
    /// assert!((ci.upper - 95.0).abs() < 1E-9);
    /// assert!(ci.contains(50.0));
    ///
    /// assert_eq!(
    ///     CredibleInterval::from_samples(&xs, 1.0),
    ///     Err(SummaryError::LevelOutOfRange { level: 1.0 }),
    /// );
    /// ```
    pub fn from_samples(xs: &[f64], level: f64) -> Result<Self, SummaryError> {
        if !(level > 0.0 && level < 1.0) {
            return Err(SummaryError::LevelOutOfRange { level });
        }
        let tail = (1.0 - level) / 2.0;
        quantiles(xs, &[tail, 0.5, 1.0 - tail])
            .map(|qs| CredibleInterval {
                level,
                lower: qs[0],
                median: qs[1],
                upper: qs[2],
            })
            .ok_or(SummaryError::EmptySamples)
    }

    /// Whether `x` lies in the closed interval
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// `upper - lower`
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Classical estimates from the raw sample, for comparison with the
/// posterior.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct FrequentistEstimate {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (divides by `n - 1`)
    pub std_dev: f64,
    /// Standard error of the mean, `std_dev / √n`
    pub std_err: f64,
    /// Lower end of the 95% normal-approximation interval for the mean
    pub lower: f64,
    /// Upper end of the 95% normal-approximation interval for the mean
    pub upper: f64,
}

impl FrequentistEstimate {
    /// Estimate from `data`, which needs at least two observations.
    ///
    /// # Example
    ///
    /// ```
    /// use bayes_est::summary::FrequentistEstimate;
    ///
    /// let est = FrequentistEstimate::from_data(&[1.0, 3.0]).unwrap();
    /// assert_eq!(est.mean, 2.0);
    /// assert_eq!(est.std_err, 1.0);
    /// assert!((est.lower - 0.04).abs() < 1E-12);
    /// assert!((est.upper - 3.96).abs() < 1E-12);
    ///
    /// assert!(FrequentistEstimate::from_data(&[1.0]).is_err());
    /// ```
    pub fn from_data(data: &[f64]) -> Result<Self, SummaryError> {
        let n = data.len();
        let too_few = SummaryError::TooFewObservations { n, required: 2 };
        let mean = mean(data).ok_or_else(|| too_few.clone())?;
        let std_dev = std_dev(data, 1).ok_or(too_few)?;
        let std_err = std_dev / (n as f64).sqrt();
        Ok(FrequentistEstimate {
            n,
            mean,
            std_dev,
            std_err,
            lower: mean - Z_975 * std_err,
            upper: mean + Z_975 * std_err,
        })
    }

    /// Whether `x` lies in the closed 95% interval for the mean
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// Everything needed to compare a fitted estimator against the classical
/// estimates and, optionally, known true parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct PosteriorReport {
    pub prior: PriorHyperparameters,
    pub posterior: PosteriorState,
    pub mu: SampleSummary,
    pub sigma: SampleSummary,
    pub mu_interval: CredibleInterval,
    pub sigma_interval: CredibleInterval,
    pub frequentist: FrequentistEstimate,
    /// Known `(μ, σ)` used to generate the data, if any
    pub truth: Option<(f64, f64)>,
}

impl PosteriorReport {
    /// Build a report from a fitted estimator and draws from its posterior.
    ///
    /// Fails if there are no draws or fewer than two observations.
    pub fn new(
        estimator: &BayesianNormalEstimator,
        samples: &PosteriorSamples,
    ) -> Result<Self, SummaryError> {
        let mu = samples.mu_summary().ok_or(SummaryError::EmptySamples)?;
        let sigma = samples.sigma_summary().ok_or(SummaryError::EmptySamples)?;
        Ok(PosteriorReport {
            prior: *estimator.prior(),
            posterior: estimator.posterior().clone(),
            mu,
            sigma,
            mu_interval: samples.mu_interval(DEFAULT_LEVEL)?,
            sigma_interval: samples.sigma_interval(DEFAULT_LEVEL)?,
            frequentist: FrequentistEstimate::from_data(
                estimator.observed_data(),
            )?,
            truth: None,
        })
    }

    /// Attach the true parameters of simulated data
    pub fn with_truth(mut self, mu: f64, sigma: f64) -> Self {
        self.truth = Some((mu, sigma));
        self
    }
}

impl fmt::Display for PosteriorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let post = &self.posterior;
        let freq = &self.frequentist;
        let fmt_truth = |x: Option<f64>| {
            x.map_or_else(|| String::from("-"), |x| format!("{:.3}", x))
        };

        writeln!(f, "{}", self.prior)?;
        writeln!(
            f,
            "Posterior μ: {:.3} ± {:.3}",
            post.posterior_mean(),
            post.posterior_mean_scale()
        )?;
        writeln!(f, "Posterior precision shape: {:.3}", post.posterior_shape())?;
        writeln!(f, "Posterior precision rate: {:.3}", post.posterior_rate())?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:<8} {:<12} {:<12}",
            "Parameter", "True", "Frequentist", "Bayesian"
        )?;
        writeln!(f, "{}", "-".repeat(45))?;
        writeln!(
            f,
            "{:<12} {:<8} {:<12.3} {:<12.3}",
            "Mean",
            fmt_truth(self.truth.map(|t| t.0)),
            freq.mean,
            self.mu.mean
        )?;
        writeln!(
            f,
            "{:<12} {:<8} {:<12.3} {:<12.3}",
            "Std Dev",
            fmt_truth(self.truth.map(|t| t.1)),
            freq.std_dev,
            self.sigma.mean
        )?;
        writeln!(f)?;
        writeln!(f, "{:.0}% intervals for the mean:", 100.0 * self.mu_interval.level)?;
        writeln!(f, "Frequentist CI: [{:.3}, {:.3}]", freq.lower, freq.upper)?;
        writeln!(
            f,
            "Bayesian CI:    [{:.3}, {:.3}]",
            self.mu_interval.lower, self.mu_interval.upper
        )?;
        writeln!(
            f,
            "Bayesian CI for the std dev: [{:.3}, {:.3}]",
            self.sigma_interval.lower, self.sigma_interval.upper
        )?;
        if let Some((mu, sigma)) = self.truth {
            writeln!(
                f,
                "Contains true mean: frequentist={}, bayesian={}",
                freq.contains(mu),
                self.mu_interval.contains(mu)
            )?;
            write!(
                f,
                "Contains true std dev: {}",
                self.sigma_interval.contains(sigma)
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for SummaryError {}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySamples => write!(f, "no samples to summarize"),
            Self::LevelOutOfRange { level } => {
                write!(f, "interval level ({}) must be in (0, 1)", level)
            }
            Self::TooFewObservations { n, required } => write!(
                f,
                "{} observation(s) given but at least {} are required",
                n, required
            ),
            Self::LengthMismatch { n_mu, n_sigma } => write!(
                f,
                "{} draw(s) of the mean paired with {} of the std dev",
                n_mu, n_sigma
            ),
        }
    }
}
