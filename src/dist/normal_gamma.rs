//! Joint belief over the mean and precision of a Gaussian
use crate::dist::{Gamma, Gaussian};
use crate::impl_display;
use crate::traits::*;
use rand::Rng;
use std::fmt;

/// Belief over the parameters of a Gaussian with unknown mean and precision.
///
/// Given `x ~ N(μ, σ)` with precision `ρ = 1/σ²`, this distribution places
/// `μ ~ N(m, s)` and `ρ ~ Gamma(α, β)` (shape/rate). Unlike the textbook
/// normal-gamma, the spread of `μ` is a fixed `s` and does not scale with the
/// drawn precision; `μ` and `ρ` are independent.
///
/// Values are `(μ, σ)` pairs. The density is reported over `(μ, ρ)`.
///
/// # Example
///
/// ```
/// use bayes_est::prelude::*;
/// use rand::SeedableRng;
///
/// let ng = NormalGamma::new(0.0, 2.0, 3.0, 1.5).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
///
/// let (mu, sigma): (f64, f64) = ng.draw(&mut rng);
/// assert!(mu.is_finite());
/// assert!(sigma > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalGamma {
    m: f64,
    s: f64,
    shape: f64,
    rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalGammaError {
    /// The m parameter is infinite or NaN
    MNotFinite { m: f64 },
    /// The s parameter is less than or equal to zero
    STooLow { s: f64 },
    /// The s parameter is infinite or NaN
    SNotFinite { s: f64 },
    /// The shape parameter is less than or equal to zero
    ShapeTooLow { shape: f64 },
    /// The shape parameter is infinite or NaN
    ShapeNotFinite { shape: f64 },
    /// The rate parameter is less than or equal to zero
    RateTooLow { rate: f64 },
    /// The rate parameter is infinite or NaN
    RateNotFinite { rate: f64 },
}

impl NormalGamma {
    /// Create a new Normal Gamma distribution
    ///
    /// # Arguments
    /// - m: The center of the belief about μ
    /// - s: The standard deviation of the belief about μ
    /// - shape: Shape of the Gamma belief about the precision, ρ
    /// - rate: Rate of the Gamma belief about the precision, ρ
    pub fn new(
        m: f64,
        s: f64,
        shape: f64,
        rate: f64,
    ) -> Result<Self, NormalGammaError> {
        if !m.is_finite() {
            Err(NormalGammaError::MNotFinite { m })
        } else if !s.is_finite() {
            Err(NormalGammaError::SNotFinite { s })
        } else if !shape.is_finite() {
            Err(NormalGammaError::ShapeNotFinite { shape })
        } else if !rate.is_finite() {
            Err(NormalGammaError::RateNotFinite { rate })
        } else if s <= 0.0 {
            Err(NormalGammaError::STooLow { s })
        } else if shape <= 0.0 {
            Err(NormalGammaError::ShapeTooLow { shape })
        } else if rate <= 0.0 {
            Err(NormalGammaError::RateTooLow { rate })
        } else {
            Ok(NormalGamma { m, s, shape, rate })
        }
    }

    /// Creates a new NormalGamma without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(m: f64, s: f64, shape: f64, rate: f64) -> Self {
        NormalGamma { m, s, shape, rate }
    }

    /// Get the m parameter
    #[inline]
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Get the s parameter
    #[inline]
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Get the shape of the precision belief
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Get the rate of the precision belief
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Return (m, s, shape, rate)
    #[inline]
    pub fn params(&self) -> (f64, f64, f64, f64) {
        (self.m, self.s, self.shape, self.rate)
    }

    /// The marginal belief about μ
    ///
    /// ```
    /// use bayes_est::dist::NormalGamma;
    ///
    /// let ng = NormalGamma::new(1.0, 0.5, 2.0, 3.0).unwrap();
    /// let mu = ng.mean_distr();
    /// assert_eq!(mu.mu(), 1.0);
    /// assert_eq!(mu.sigma(), 0.5);
    /// ```
    #[inline]
    pub fn mean_distr(&self) -> Gaussian {
        Gaussian::new_unchecked(self.m, self.s)
    }

    /// The marginal belief about the precision, ρ
    #[inline]
    pub fn precision_distr(&self) -> Gamma {
        Gamma::new_unchecked(self.shape, self.rate)
    }
}

impl From<&NormalGamma> for String {
    fn from(ng: &NormalGamma) -> String {
        format!(
            "Normal-Gamma(m: {}, s: {}, α: {}, β: {})",
            ng.m, ng.s, ng.shape, ng.rate
        )
    }
}

impl_display!(NormalGamma);

impl HasDensity<(f64, f64)> for NormalGamma {
    fn ln_f(&self, x: &(f64, f64)) -> f64 {
        let (mu, sigma) = *x;
        let rho = (sigma * sigma).recip();
        self.mean_distr().ln_f(&mu) + self.precision_distr().ln_f(&rho)
    }
}

impl Sampleable<(f64, f64)> for NormalGamma {
    fn draw<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        let rho: f64 = self.precision_distr().draw(rng);
        let mu: f64 = self.mean_distr().draw(rng);
        (mu, rho.sqrt().recip())
    }

    /// Draws every precision before any mean, so a seeded generator yields
    /// the same stream no matter how the caller consumes it.
    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<(f64, f64)> {
        let rhos: Vec<f64> = self.precision_distr().sample(n, rng);
        let mus: Vec<f64> = self.mean_distr().sample(n, rng);
        mus.into_iter()
            .zip(rhos)
            .map(|(mu, rho)| (mu, rho.sqrt().recip()))
            .collect()
    }
}

impl Support<(f64, f64)> for NormalGamma {
    fn supports(&self, x: &(f64, f64)) -> bool {
        x.0.is_finite() && x.1 > 0.0 && x.1.is_finite()
    }
}

impl ContinuousDistr<(f64, f64)> for NormalGamma {}

impl std::error::Error for NormalGammaError {}

impl fmt::Display for NormalGammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MNotFinite { m } => write!(f, "non-finite m: {}", m),
            Self::SNotFinite { s } => write!(f, "non-finite s: {}", s),
            Self::ShapeNotFinite { shape } => {
                write!(f, "non-finite shape: {}", shape)
            }
            Self::RateNotFinite { rate } => {
                write!(f, "non-finite rate: {}", rate)
            }
            Self::STooLow { s } => {
                write!(f, "s ({}) must be greater than zero", s)
            }
            Self::ShapeTooLow { shape } => {
                write!(f, "shape ({}) must be greater than zero", shape)
            }
            Self::RateTooLow { rate } => {
                write!(f, "rate ({}) must be greater than zero", rate)
            }
        }
    }
}
