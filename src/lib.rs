//! Bayesian estimation of the mean and precision of a normal distribution.
//!
//! The centerpiece is [`BayesianNormalEstimator`](estimator::BayesianNormalEstimator),
//! which conditions a normal-gamma style prior on an observed sample, draws
//! Monte Carlo samples of `(μ, σ)` from the result, and evaluates the
//! Student's t posterior predictive density.
//!
//! # Design
//!
//! Distributions live in [`dist`] and share the traits in [`traits`]. Every
//! operation that draws random numbers takes the generator as an argument;
//! nothing in this crate touches a global RNG.
//!
//! # Example
//!
//! ```
//! use bayes_est::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut estimator = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
//! estimator.update(&[2.1, 2.9, 2.4, 3.3, 1.8, 2.6]);
//!
//! assert!(estimator.posterior_mean() > 1.5);
//! assert_eq!(estimator.posterior_shape(), 4.0);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0x1234);
//! let samples = estimator.sample_posterior(1_000, &mut rng);
//! assert_eq!(samples.len(), 1_000);
//!
//! let density = estimator.posterior_predictive(&[2.5]);
//! assert!(density[0] > 0.0);
//! ```
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]

#[cfg(feature = "serde1")]
extern crate serde;

pub mod consts;
pub mod data;
pub mod dist;
pub mod estimator;
pub mod misc;
pub mod prelude;
pub mod summary;
pub mod traits;

/// Implements `fmt::Display` for a type that implements `From<&T> for String`
#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}
