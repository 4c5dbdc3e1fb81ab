use crate::consts::LN_PI;
use crate::impl_display;
use crate::traits::*;
use rand::Rng;
use special::Gamma as _;
use std::fmt;

/// Location-scale [Student's T distribution](https://en.wikipedia.org/wiki/Student%27s_t-distribution#Location-scale_t_distribution)
/// over x in (-∞, ∞).
///
/// If `z ~ t(ν)` then `loc + scale * z` follows this distribution.
///
/// # Example
///
/// ```
/// use bayes_est::prelude::*;
///
/// let t = StudentsT::new(4.0, 1.0, 2.0).unwrap();
/// let std_t = StudentsT::standard(4.0).unwrap();
///
/// // Shifting and scaling is a change of variables
/// let lhs = t.ln_pdf(&3.0_f64);
/// let rhs = std_t.ln_pdf(&1.0_f64) - 2.0_f64.ln();
/// assert!((lhs - rhs).abs() < 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StudentsT {
    /// Degrees of freedom, ν, in (0, ∞)
    v: f64,
    /// Location in (-∞, ∞)
    loc: f64,
    /// Scale in (0, ∞)
    scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudentsTError {
    /// The v parameter is infinite or NaN
    VNotFinite { v: f64 },
    /// The v parameter is less than or equal to zero
    VTooLow { v: f64 },
    /// The location parameter is infinite or NaN
    LocNotFinite { loc: f64 },
    /// The scale parameter is infinite or NaN
    ScaleNotFinite { scale: f64 },
    /// The scale parameter is less than or equal to zero
    ScaleTooLow { scale: f64 },
}

impl StudentsT {
    /// Create a new Student's T distribution with degrees of freedom, `v`,
    /// location `loc` and scale `scale`.
    #[inline]
    pub fn new(v: f64, loc: f64, scale: f64) -> Result<Self, StudentsTError> {
        if v <= 0.0 {
            Err(StudentsTError::VTooLow { v })
        } else if !v.is_finite() {
            Err(StudentsTError::VNotFinite { v })
        } else if !loc.is_finite() {
            Err(StudentsTError::LocNotFinite { loc })
        } else if scale <= 0.0 {
            Err(StudentsTError::ScaleTooLow { scale })
        } else if !scale.is_finite() {
            Err(StudentsTError::ScaleNotFinite { scale })
        } else {
            Ok(StudentsT { v, loc, scale })
        }
    }

    /// Creates a new StudentsT without checking whether the parameters are
    /// valid. Invalid parameters produce NaN or infinite densities.
    #[inline]
    pub fn new_unchecked(v: f64, loc: f64, scale: f64) -> Self {
        StudentsT { v, loc, scale }
    }

    /// Standard Student's t with location 0 and scale 1
    #[inline]
    pub fn standard(v: f64) -> Result<Self, StudentsTError> {
        StudentsT::new(v, 0.0, 1.0)
    }

    /// Get the degrees of freedom, v
    #[inline]
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Get the location
    #[inline]
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Get the scale
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for StudentsT {
    fn default() -> Self {
        StudentsT {
            v: 2.0,
            loc: 0.0,
            scale: 1.0,
        }
    }
}

impl From<&StudentsT> for String {
    fn from(t: &StudentsT) -> String {
        format!("Student's(ν: {}, loc: {}, scale: {})", t.v, t.loc, t.scale)
    }
}

impl_display!(StudentsT);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for StudentsT {
            fn ln_f(&self, x: &$kind) -> f64 {
                let vp1 = (self.v + 1.0) / 2.0;
                let z = (f64::from(*x) - self.loc) / self.scale;
                let xterm = -vp1 * (z * z / self.v).ln_1p();
                let zterm = 0.5_f64.mul_add(
                    -(self.v.ln() + LN_PI),
                    vp1.ln_gamma().0 - (self.v / 2.0).ln_gamma().0,
                ) - self.scale.ln();
                zterm + xterm
            }
        }

        impl Sampleable<$kind> for StudentsT {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                match rand_distr::StudentT::new(self.v) {
                    Ok(t) => {
                        let z: f64 = rng.sample(t);
                        self.scale.mul_add(z, self.loc) as $kind
                    }
                    Err(_) => <$kind>::NAN,
                }
            }
        }

        impl Support<$kind> for StudentsT {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite()
            }
        }

        impl ContinuousDistr<$kind> for StudentsT {}

        impl Mean<$kind> for StudentsT {
            fn mean(&self) -> Option<$kind> {
                if self.v > 1.0 {
                    Some(self.loc as $kind)
                } else {
                    None
                }
            }
        }

        impl Variance<$kind> for StudentsT {
            fn variance(&self) -> Option<$kind> {
                if self.v > 2.0 {
                    let var = self.scale * self.scale * self.v / (self.v - 2.0);
                    Some(var as $kind)
                } else {
                    None
                }
            }
        }
    };
}

impl_traits!(f64);
impl_traits!(f32);

impl std::error::Error for StudentsTError {}

impl fmt::Display for StudentsTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VNotFinite { v } => write!(f, "non-finite v: {}", v),
            Self::VTooLow { v } => {
                write!(f, "v ({}) must be greater than zero", v)
            }
            Self::LocNotFinite { loc } => write!(f, "non-finite loc: {}", loc),
            Self::ScaleNotFinite { scale } => {
                write!(f, "non-finite scale: {}", scale)
            }
            Self::ScaleTooLow { scale } => {
                write!(f, "scale ({}) must be greater than zero", scale)
            }
        }
    }
}
