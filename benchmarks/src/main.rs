fn main() {
    println!("salesfit benchmark suite");
    println!();
    println!("Usage:");
    println!("  cargo bench --package benchmarks");
    println!("  cargo bench --package benchmarks --bench <benchmark_name>");
    println!();
    println!("Available benchmarks:");
    println!("  - training: polynomial, linear and full selection runs per series length");
    println!("  - metrics: R², MAE, RMSE on growing arrays");
    println!();
    println!("Binaries:");
    println!("  cargo run --release --bin learning_rate_search");
}
