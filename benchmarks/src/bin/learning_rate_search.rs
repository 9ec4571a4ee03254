//! Sweeps the initial learning rate on synthetic weekly sales and reports how
//! much halving each start needs and where the polynomial fit ends up.

use benchmarks::{data::SyntheticSales, utils::time_fn};
use salesfit::{
    model::LinearRegression, trainer::RegularizedTrainer, FitError, Metrics, TrainingConfig,
};

fn main() -> Result<(), FitError> {
    println!("Learning Rate Search (fixed budget, halving on cost increase)");
    println!("=============================================================\n");

    let data = SyntheticSales::new(26).dataset()?;
    println!("{} weeks, {} features\n", data.len(), data.n_features());

    let learning_rates = [1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1, 1.0];

    let mut best: Option<(f64, f64)> = None;
    for lr in learning_rates {
        let config = TrainingConfig::builder().learning_rate(lr).log_every(0).build()?;
        let trainer = RegularizedTrainer::from_config(&config)?;

        let (result, elapsed) = time_fn(|| trainer.fit(LinearRegression::new(3), &data));
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                println!("LR = {:.0e}: {}", lr, err);
                continue;
            }
        };
        let metrics = Metrics::evaluate(&result.model, &data)?;

        println!(
            "LR = {:.0e}: time = {:.2} ms, halvings = {:2}, final LR = {:.3e}, cost = {:.4}, R² = {:.4}",
            lr,
            elapsed.as_secs_f64() * 1000.0,
            result.halvings,
            result.final_learning_rate,
            result.final_cost,
            metrics.r_squared
        );

        if best.map_or(true, |(_, cost)| result.final_cost < cost) {
            best = Some((lr, result.final_cost));
        }
    }

    if let Some((lr, cost)) = best {
        println!("\nLowest final cost {:.4} at initial LR = {:.0e}", cost, lr);
    }
    Ok(())
}
