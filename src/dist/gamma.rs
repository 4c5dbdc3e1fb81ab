//! Gamma distribution over x in (0, ∞)
use crate::impl_display;
use crate::traits::*;
use rand::Rng;
use special::Gamma as _;
use std::cell::OnceCell;
use std::fmt;

/// [Gamma distribution](https://en.wikipedia.org/wiki/Gamma_distribution) G(α, β)
/// over x in (0, ∞).
///
/// **NOTE**: The gamma distribution is parameterized in terms of shape, α, and
/// rate, β.
///
/// ```math
///             β^α
/// f(x|α, β) = ----  x^(α-1) e^(-βx)
///             Γ(α)
/// ```
#[derive(Debug, Clone)]
pub struct Gamma {
    shape: f64,
    rate: f64,
    // ln(gamma(shape))
    ln_gamma_shape: OnceCell<f64>,
    // ln(rate)
    ln_rate: OnceCell<f64>,
}

impl PartialEq for Gamma {
    fn eq(&self, other: &Gamma) -> bool {
        self.shape == other.shape && self.rate == other.rate
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GammaError {
    /// Shape parameter is less than or equal to zero
    ShapeTooLow { shape: f64 },
    /// Shape parameter is infinite or NaN
    ShapeNotFinite { shape: f64 },
    /// Rate parameter is less than or equal to zero
    RateTooLow { rate: f64 },
    /// Rate parameter is infinite or NaN
    RateNotFinite { rate: f64 },
}

impl Gamma {
    /// Create a new `Gamma` distribution with shape (α) and rate (β).
    pub fn new(shape: f64, rate: f64) -> Result<Self, GammaError> {
        if shape <= 0.0 {
            Err(GammaError::ShapeTooLow { shape })
        } else if rate <= 0.0 {
            Err(GammaError::RateTooLow { rate })
        } else if !shape.is_finite() {
            Err(GammaError::ShapeNotFinite { shape })
        } else if !rate.is_finite() {
            Err(GammaError::RateNotFinite { rate })
        } else {
            Ok(Gamma::new_unchecked(shape, rate))
        }
    }

    /// Creates a new Gamma without checking whether the parameters are valid.
    #[inline]
    pub fn new_unchecked(shape: f64, rate: f64) -> Self {
        Gamma {
            shape,
            rate,
            ln_gamma_shape: OnceCell::new(),
            ln_rate: OnceCell::new(),
        }
    }

    /// Get ln(rate)
    #[inline]
    fn ln_rate(&self) -> f64 {
        *self.ln_rate.get_or_init(|| self.rate.ln())
    }

    /// Sampler for valid parameters. `rand_distr` takes a scale and accepts
    /// an infinite one, so a zero rate is rejected here.
    fn sampler(&self) -> Option<rand_distr::Gamma<f64>> {
        let valid = self.shape > 0.0
            && self.shape.is_finite()
            && self.rate > 0.0
            && self.rate.is_finite();
        if valid {
            rand_distr::Gamma::new(self.shape, self.rate.recip()).ok()
        } else {
            None
        }
    }

    /// Get ln(gamma(shape))
    #[inline]
    fn ln_gamma_shape(&self) -> f64 {
        *self.ln_gamma_shape.get_or_init(|| self.shape.ln_gamma().0)
    }

    /// Get the shape parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use bayes_est::dist::Gamma;
    /// let gam = Gamma::new(2.0, 1.0).unwrap();
    /// assert_eq!(gam.shape(), 2.0);
    /// ```
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Get the rate parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use bayes_est::dist::Gamma;
    /// let gam = Gamma::new(2.0, 1.0).unwrap();
    /// assert_eq!(gam.rate(), 1.0);
    /// ```
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for Gamma {
    fn default() -> Self {
        Gamma::new_unchecked(1.0, 1.0)
    }
}

impl From<&Gamma> for String {
    fn from(gam: &Gamma) -> String {
        format!("G(α: {}, β: {})", gam.shape, gam.rate)
    }
}

impl_display!(Gamma);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for Gamma {
            fn ln_f(&self, x: &$kind) -> f64 {
                self.shape.mul_add(self.ln_rate(), -self.ln_gamma_shape())
                    + (self.shape - 1.0).mul_add(
                        f64::from(*x).ln(),
                        -(self.rate * f64::from(*x)),
                    )
            }
        }

        impl Sampleable<$kind> for Gamma {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                match self.sampler() {
                    Some(g) => rng.sample(g) as $kind,
                    None => <$kind>::NAN,
                }
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                match self.sampler() {
                    Some(g) => (0..n).map(|_| rng.sample(g) as $kind).collect(),
                    None => vec![<$kind>::NAN; n],
                }
            }
        }

        impl ContinuousDistr<$kind> for Gamma {}

        impl Support<$kind> for Gamma {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite() && *x > 0.0
            }
        }

        impl Cdf<$kind> for Gamma {
            fn cdf(&self, x: &$kind) -> f64 {
                (self.rate * f64::from(*x)).inc_gamma(self.shape)
            }
        }

        impl Mean<$kind> for Gamma {
            fn mean(&self) -> Option<$kind> {
                Some((self.shape / self.rate) as $kind)
            }
        }
    };
}

impl Variance<f64> for Gamma {
    fn variance(&self) -> Option<f64> {
        Some(self.shape / (self.rate * self.rate))
    }
}

impl_traits!(f32);
impl_traits!(f64);

impl std::error::Error for GammaError {}

impl fmt::Display for GammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeTooLow { shape } => {
                write!(f, "shape ({}) must be greater than zero", shape)
            }
            Self::ShapeNotFinite { shape } => {
                write!(f, "non-finite shape: {}", shape)
            }
            Self::RateTooLow { rate } => {
                write!(f, "rate ({}) must be greater than zero", rate)
            }
            Self::RateNotFinite { rate } => {
                write!(f, "non-finite rate: {}", rate)
            }
        }
    }
}
