//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::data::GaussianSuffStat;
#[doc(no_inline)]
pub use crate::dist::*;
#[doc(no_inline)]
pub use crate::estimator::{
    BayesianNormalEstimator, PosteriorSamples, PosteriorState, PriorError,
    PriorHyperparameters,
};
#[doc(no_inline)]
pub use crate::summary::{
    CredibleInterval, FrequentistEstimate, PosteriorReport, SampleSummary,
    SummaryError,
};
#[doc(no_inline)]
pub use crate::traits::*;
