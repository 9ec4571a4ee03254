use benchmarks::data::SyntheticSales;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use salesfit::{
    model::LinearRegression,
    trainer::{RegularizedTrainer, SimpleLinearTrainer},
    ModelSelector, TrainingConfig,
};

const WEEKS: [usize; 4] = [8, 26, 52, 104];

fn quiet_config() -> TrainingConfig {
    TrainingConfig {
        log_every: 0,
        ..TrainingConfig::default()
    }
}

fn bench_polynomial_fit(c: &mut Criterion) {
    let trainer = RegularizedTrainer::from_config(&quiet_config()).expect("valid config");
    let mut group = c.benchmark_group("polynomial_fit");

    for weeks in WEEKS.iter() {
        let data = SyntheticSales::new(*weeks).dataset().expect("synthetic data");
        group.bench_with_input(BenchmarkId::from_parameter(weeks), weeks, |b, _| {
            b.iter(|| {
                let result = trainer.fit(LinearRegression::new(3), black_box(&data));
                black_box(result)
            });
        });
    }
    group.finish();
}

fn bench_linear_fit(c: &mut Criterion) {
    let trainer = SimpleLinearTrainer::from_config(&quiet_config()).expect("valid config");
    let mut group = c.benchmark_group("linear_fit");

    for weeks in WEEKS.iter() {
        let data = SyntheticSales::new(*weeks).dataset().expect("synthetic data");
        group.bench_with_input(BenchmarkId::from_parameter(weeks), weeks, |b, _| {
            b.iter(|| black_box(trainer.fit(black_box(&data))));
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let selector = ModelSelector::new(quiet_config());
    let mut group = c.benchmark_group("select");
    group.sample_size(20);

    for weeks in WEEKS.iter() {
        let data = SyntheticSales::new(*weeks).dataset().expect("synthetic data");
        group.bench_with_input(BenchmarkId::from_parameter(weeks), weeks, |b, _| {
            b.iter(|| black_box(selector.select(black_box(&data))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_polynomial_fit, bench_linear_fit, bench_selection);
criterion_main!(benches);
