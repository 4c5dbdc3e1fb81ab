use super::*;
use crate::misc::{linspace, mean, trapz};
use crate::test_basic_impls;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

const TOL: f64 = 1E-12;

// 20 draws from N(2.5, 1.2)
const SAMPLE: [f64; 20] = [
    2.1, 3.4, 1.3, 2.9, 4.0, 2.2, 0.9, 3.1, 2.6, 1.8, 3.7, 2.4, 2.0, 3.3, 1.5,
    2.8, 4.2, 2.5, 1.7, 2.9,
];

fn fitted() -> BayesianNormalEstimator {
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&SAMPLE);
    est
}

test_basic_impls!(BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0));

#[test]
fn new_posterior_equals_prior() {
    let est = BayesianNormalEstimator::new(1.5, 0.5, 2.0, 3.0);
    assert_eq!(est.posterior_mean(), 1.5);
    assert_eq!(est.posterior_mean_scale(), 0.5);
    assert_eq!(est.posterior_shape(), 2.0);
    assert_eq!(est.posterior_rate(), 3.0);
    assert!(est.observed_data().is_empty());
    assert_eq!(est.n_updates(), 0);
}

#[test]
fn default_prior_is_standard() {
    let est = BayesianNormalEstimator::default();
    assert_eq!(*est.prior(), PriorHyperparameters::new(0.0, 1.0, 1.0, 1.0).unwrap());
}

#[test]
fn prior_validation() {
    assert!(matches!(
        PriorHyperparameters::new(f64::NAN, 1.0, 1.0, 1.0),
        Err(PriorError::MeanNotFinite { .. })
    ));
    assert!(matches!(
        PriorHyperparameters::new(0.0, f64::INFINITY, 1.0, 1.0),
        Err(PriorError::MeanScaleNotFinite { .. })
    ));
    assert!(matches!(
        PriorHyperparameters::new(0.0, 1.0, -1.0, 1.0),
        Err(PriorError::ShapeTooLow { .. })
    ));
    assert!(matches!(
        PriorHyperparameters::new(0.0, 1.0, 1.0, 0.0),
        Err(PriorError::RateTooLow { .. })
    ));
    assert!(matches!(
        PriorHyperparameters::new(0.0, 1.0, 1.0, f64::NAN),
        Err(PriorError::RateNotFinite { .. })
    ));
}

#[test]
fn prior_error_display() {
    let err = PriorHyperparameters::new(0.0, 0.0, 1.0, 1.0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "prior mean scale (0) must be greater than zero"
    );
}

#[test]
fn empty_update_leaves_prior_in_place() {
    let mut est = BayesianNormalEstimator::new(0.7, 2.0, 1.5, 2.5);
    est.update(&[]);
    assert_eq!(est.posterior_mean(), 0.7);
    assert_eq!(est.posterior_mean_scale(), 2.0);
    assert_eq!(est.posterior_shape(), 1.5);
    assert_eq!(est.posterior_rate(), 2.5);
    assert!(est.observed_data().is_empty());
    assert_eq!(est.n_updates(), 1);
}

#[test]
fn single_observation_only_moves_shape() {
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&[5.0]);
    assert_eq!(est.posterior_mean(), 0.0);
    assert_eq!(est.posterior_mean_scale(), 2.0);
    assert_eq!(est.posterior_shape(), 1.5);
    assert_eq!(est.posterior_rate(), 1.0);
    assert_eq!(est.observed_data(), &[5.0]);
}

#[test]
fn negative_prior_scale_falls_back_to_its_magnitude() {
    let mut est = BayesianNormalEstimator::new(0.0, -2.0, 1.0, 1.0);
    est.update(&[5.0]);
    assert_eq!(est.posterior_mean_scale(), 2.0);
}

#[test]
fn identical_values_still_move_rate() {
    // No spread, so the mean belief stays put, but with n > 1 the rate picks
    // up the distance between sample and prior means.
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&[3.0, 3.0]);
    assert_eq!(est.posterior_mean(), 0.0);
    assert_eq!(est.posterior_mean_scale(), 2.0);
    assert_eq!(est.posterior_shape(), 2.0);
    // 1 + 0 + (0.25 * 2 * 9) / (2 * 0.25)
    assert::close(est.posterior_rate(), 10.0, TOL);
}

#[test]
fn two_point_update_by_hand() {
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&[1.0, 3.0]);

    // xbar = 2, s² = 2, τ₀ = 1/4, τₙ = 1/4 + 2/2 = 5/4
    let post_prec = 1.25_f64;
    assert::close(est.posterior_mean(), (2.0 * 2.0 / 2.0) / post_prec, TOL);
    assert::close(est.posterior_mean_scale(), post_prec.sqrt().recip(), TOL);
    assert_eq!(est.posterior_shape(), 2.0);
    // 1 + 2/2 + (0.25 * 2 * 4) / (2 * 1.25)
    assert::close(est.posterior_rate(), 2.8, TOL);
}

#[test]
fn update_recomputes_from_prior() {
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&[10.0, 11.0, 12.0]);
    est.update(&SAMPLE);

    let fresh = fitted();
    assert_eq!(est.posterior(), fresh.posterior());
    assert_eq!(est.n_updates(), 2);
    assert_eq!(fresh.n_updates(), 1);
}

#[test]
fn sequential_prior_carries_the_posterior() {
    let est = fitted();
    let next = est.into_sequential_prior();

    assert_eq!(next.prior().prior_mean(), est.posterior_mean());
    assert_eq!(next.prior().prior_mean_scale(), est.posterior_mean_scale());
    assert_eq!(next.prior().prior_shape(), est.posterior_shape());
    assert_eq!(next.prior().prior_rate(), est.posterior_rate());
    assert!(next.observed_data().is_empty());
}

#[test]
fn posterior_shrinks_toward_data() {
    let data: Vec<f64> = (0..50).map(|i| 10.0 + 0.1 * f64::from(i % 7) - 0.3).collect();
    let xbar = mean(&data).unwrap();

    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&data);

    let mu = est.posterior_mean();
    assert!(0.0 < mu && mu < xbar);
    assert!((xbar - mu).abs() < 0.01);
    assert!(est.posterior_mean_scale() < 2.0);
}

#[test]
fn end_to_end_recovers_mean() {
    let est = fitted();
    assert!((est.posterior_mean() - 2.5).abs() < 0.5);
    assert_eq!(est.posterior_shape(), 11.0);
    assert_eq!(est.observed_data().len(), 20);
}

#[test]
fn seeded_sampling_is_reproducible() {
    let est = fitted();
    let a = est.sample_posterior(1000, &mut Xoshiro256Plus::seed_from_u64(17));
    let b = est.sample_posterior(1000, &mut Xoshiro256Plus::seed_from_u64(17));
    let c = est.sample_posterior(1000, &mut Xoshiro256Plus::seed_from_u64(18));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn sample_count_matches_request() {
    let est = fitted();
    let mut rng = Xoshiro256Plus::seed_from_u64(1);
    assert!(est.sample_posterior(0, &mut rng).is_empty());
    let samples = est.sample_posterior(123, &mut rng);
    assert_eq!(samples.mu().len(), 123);
    assert_eq!(samples.sigma().len(), 123);
}

#[test]
fn sample_moments_match_posterior() {
    let est = fitted();
    let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
    let samples = est.sample_posterior(20_000, &mut rng);

    let mu_bar = mean(samples.mu()).unwrap();
    assert!((mu_bar - est.posterior_mean()).abs() < 0.02);
    assert!(samples.sigma().iter().all(|&s| s > 0.0));

    // E[ρ] = α/β
    let rhos: Vec<f64> = samples.sigma().iter().map(|s| s.powi(-2)).collect();
    let rho_bar = mean(&rhos).unwrap();
    let expected = est.posterior_shape() / est.posterior_rate();
    assert!((rho_bar - expected).abs() / expected < 0.05);
}

#[test]
fn sampling_an_invalid_posterior_gives_nan() {
    let est = BayesianNormalEstimator::new(0.0, 1.0, 1.0, 0.0);
    let samples = est.sample_posterior(10, &mut Xoshiro256Plus::seed_from_u64(2));
    assert_eq!(samples.len(), 10);
    assert!(samples.sigma().iter().all(|s| s.is_nan()));
}

#[test]
fn update_agrees_with_two_pass_formulas() {
    let est = fitted();
    let n = SAMPLE.len() as f64;
    let xbar = SAMPLE.iter().sum::<f64>() / n;
    let ss = SAMPLE.iter().map(|x| (x - xbar) * (x - xbar)).sum::<f64>();
    let var = ss / (n - 1.0);
    let prior_prec: f64 = 0.25;
    let post_prec = prior_prec + n / var;
    let mean = (prior_prec * 0.0 + n * xbar / var) / post_prec;
    let rate = 1.0
        + ss / 2.0
        + (prior_prec * n * (xbar - 0.0) * (xbar - 0.0)) / (2.0 * post_prec);

    assert::close(est.posterior_mean(), mean, 1E-12);
    assert::close(est.posterior_mean_scale(), 1.0 / post_prec.sqrt(), 1E-12);
    assert::close(est.posterior_rate(), rate, 1E-12);
}

#[test]
fn predictive_distr_parameters() {
    let est = fitted();
    let t = est.predictive_distr();
    assert_eq!(t.v(), 22.0);
    assert_eq!(t.loc(), est.posterior_mean());
    assert::close(
        t.scale(),
        (2.0 * est.posterior_rate() / est.posterior_shape()).sqrt(),
        TOL,
    );
}

#[test]
fn predictive_integrates_to_one() {
    let est = fitted();
    let xs = linspace(-60.0, 60.0, 24_001);
    let fs = est.posterior_predictive(&xs);
    assert!((trapz(&xs, &fs) - 1.0).abs() < 0.02);
}

#[test]
fn predictive_integrates_to_one_with_heavy_tails() {
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&[2.1, 2.9, 2.4, 3.3, 1.8]);
    let xs = linspace(-200.0, 200.0, 40_001);
    let fs = est.posterior_predictive(&xs);
    assert!((trapz(&xs, &fs) - 1.0).abs() < 0.02);
}

#[test]
fn predictive_of_empty_grid_is_empty() {
    assert!(fitted().posterior_predictive(&[]).is_empty());
}

#[test]
fn predictive_point_and_log_agree() {
    let est = fitted();
    let x = 2.7;
    let f = est.posterior_predictive_at(x);
    assert::close(f, est.posterior_predictive(&[x])[0], TOL);
    assert::close(f.ln(), est.ln_posterior_predictive_at(x), TOL);
}

#[test]
fn zero_prior_scale_produces_non_finite_posterior() {
    let mut est = BayesianNormalEstimator::new(1.0, 0.0, 1.0, 1.0);
    est.update(&[2.0, 3.0, 4.0]);
    assert!(!est.posterior_mean().is_finite());
    assert_eq!(est.posterior_mean_scale(), 0.0);
}

#[test]
fn nan_data_propagates() {
    let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    est.update(&[1.0, f64::NAN, 2.0]);
    assert_eq!(est.posterior_shape(), 2.5);
    assert!(est.posterior_rate().is_nan());
    assert!(est.posterior_predictive_at(1.0).is_nan());
}

#[test]
fn display() {
    let est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
    assert_eq!(
        est.prior().to_string(),
        "Prior(μ₀: 0, σ₀: 2, α₀: 1, β₀: 1)"
    );
    assert_eq!(
        est.posterior().to_string(),
        "Posterior(μₙ: 0, σₙ: 2, αₙ: 1, βₙ: 1, n: 0)"
    );
}

proptest! {
    #[test]
    fn shape_grows_by_half_per_observation(
        xs in prop::collection::vec(-100.0_f64..100.0, 0..200),
        shape in 0.1_f64..10.0,
    ) {
        let mut est = BayesianNormalEstimator::new(0.0, 1.0, shape, 1.0);
        est.update(&xs);
        let expected = shape + xs.len() as f64 / 2.0;
        prop_assert!((est.posterior_shape() - expected).abs() < 1E-10);
    }

    #[test]
    fn predictive_density_is_non_negative(
        xs in prop::collection::vec(-10.0_f64..10.0, 0..50),
        x in -1E3_f64..1E3,
    ) {
        let mut est = BayesianNormalEstimator::new(0.0, 2.0, 1.0, 1.0);
        est.update(&xs);
        prop_assert!(est.posterior_predictive_at(x) >= 0.0);
    }
}

#[cfg(feature = "serde1")]
mod serde_tests {
    use super::*;

    #[test]
    fn estimator_roundtrip() {
        let est = fitted();
        let json = serde_json::to_string(&est).unwrap();
        let back: BayesianNormalEstimator = serde_json::from_str(&json).unwrap();
        assert_eq!(est, back);
    }

    #[test]
    fn samples_roundtrip() {
        let samples = fitted()
            .sample_posterior(1000, &mut Xoshiro256Plus::seed_from_u64(9));
        let json = serde_json::to_string(&samples).unwrap();
        let back: PosteriorSamples = serde_json::from_str(&json).unwrap();
        assert_eq!(samples, back);
    }
}
