//! Data utilities
mod stat;

pub use stat::GaussianSuffStat;
