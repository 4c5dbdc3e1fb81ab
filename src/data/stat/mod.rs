mod gaussian;

pub use gaussian::GaussianSuffStat;
