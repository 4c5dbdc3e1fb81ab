//! Probability distributions
mod gamma;
mod gaussian;
mod normal_gamma;
mod students_t;

pub use gamma::{Gamma, GammaError};
pub use gaussian::{Gaussian, GaussianError};
pub use normal_gamma::{NormalGamma, NormalGammaError};
pub use students_t::{StudentsT, StudentsTError};
