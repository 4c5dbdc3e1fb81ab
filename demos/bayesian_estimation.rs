//! Fit a Bayesian estimator to simulated data and compare it with the
//! classical estimates.
//!
//! Run with `cargo run --example bayesian_estimation`.
use bayes_est::misc::{linspace, trapz};
use bayes_est::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TRUE_MEAN: f64 = 2.5;
const TRUE_STD: f64 = 1.2;
const N_DATA: usize = 20;
const N_SAMPLES: usize = 5_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);

    let truth = Gaussian::new(TRUE_MEAN, TRUE_STD)?;
    let data: Vec<f64> = truth.sample(N_DATA, &mut rng);

    println!("Generated {} observations from {}", N_DATA, truth);
    for (i, chunk) in data.chunks(5).enumerate() {
        let row: Vec<String> = chunk.iter().map(|x| format!("{:6.3}", x)).collect();
        println!("  [{:2}] {}", 5 * i, row.join(" "));
    }
    println!();

    let prior = PriorHyperparameters::new(0.0, 2.0, 1.0, 1.0)?;
    let mut estimator = BayesianNormalEstimator::from_prior(prior);
    estimator.update(&data);

    let samples = estimator.sample_posterior(N_SAMPLES, &mut rng);
    let report =
        PosteriorReport::new(&estimator, &samples)?.with_truth(TRUE_MEAN, TRUE_STD);
    println!("{}", report);
    println!();

    // The analytic predictive against the Monte Carlo average of the
    // sampled Gaussians
    let xs = linspace(-2.0, 7.0, 181);
    let analytic = estimator.posterior_predictive(&xs);
    let monte_carlo = samples
        .mean_predictive(&xs, 100)
        .ok_or("no posterior samples")?;

    println!("{:>8} {:>10} {:>12}", "x", "Student t", "Monte Carlo");
    for ((x, f), g) in xs.iter().zip(&analytic).zip(&monte_carlo).step_by(20) {
        println!("{:>8.2} {:>10.4} {:>12.4}", x, f, g);
    }
    println!();
    println!(
        "Predictive mass on [{}, {}]: {:.4}",
        xs[0],
        xs[xs.len() - 1],
        trapz(&xs, &analytic)
    );

    Ok(())
}
