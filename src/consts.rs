//! Mathematical constants

/// 0.5 ln(2π)
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;
/// ln(π)
pub const LN_PI: f64 = 1.144_729_885_849_400_2;
/// 97.5th percentile of the standard normal, used for 95% intervals
pub const Z_975: f64 = 1.96;
