use std::time::{Duration, Instant};

/// Accumulating stopwatch.
#[derive(Debug, Default)]
pub struct Timer {
    start: Option<Instant>,
    total: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    /// Stops the running lap and adds it to the total. Returns the lap time,
    /// or zero if the timer was not running.
    pub fn stop(&mut self) -> Duration {
        match self.start.take() {
            Some(start) => {
                let elapsed = start.elapsed();
                self.total += elapsed;
                elapsed
            }
            None => Duration::ZERO,
        }
    }

    pub fn total_ms(&self) -> f64 {
        self.total.as_secs_f64() * 1000.0
    }
}

/// Runs `f` once and returns its result with the elapsed time.
pub fn time_fn<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Runs `f` `warmup + iterations` times and summarizes the measured runs.
///
/// Returns the last result and `None` for the stats when `iterations == 0`.
pub fn benchmark_fn<F, R>(
    warmup: usize,
    iterations: usize,
    mut f: F,
) -> (Option<R>, Option<BenchmarkStats>)
where
    F: FnMut() -> R,
{
    for _ in 0..warmup {
        let _ = f();
    }

    let mut last = None;
    let mut times = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let (result, elapsed) = time_fn(&mut f);
        times.push(elapsed.as_secs_f64() * 1000.0);
        last = Some(result);
    }
    (last, BenchmarkStats::from_times(times))
}

/// Summary of repeated timings, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkStats {
    pub runs: usize,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub max_ms: f64,
}

impl BenchmarkStats {
    /// `None` for an empty sample.
    pub fn from_times(mut times: Vec<f64>) -> Option<Self> {
        if times.is_empty() {
            return None;
        }
        times.sort_by(f64::total_cmp);

        let n = times.len();
        let mean = times.iter().sum::<f64>() / n as f64;
        let variance = times.iter().map(|&t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (times[n / 2 - 1] + times[n / 2]) / 2.0
        } else {
            times[n / 2]
        };
        let p95 = times[((n as f64 * 0.95) as usize).min(n - 1)];

        Some(Self {
            runs: n,
            mean_ms: mean,
            std_dev_ms: variance.sqrt(),
            min_ms: times[0],
            median_ms: median,
            p95_ms: p95,
            max_ms: times[n - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_accumulates() {
        let mut timer = Timer::new();
        timer.start();
        std::thread::sleep(Duration::from_millis(5));
        let lap = timer.stop();
        assert!(lap.as_millis() >= 5);
        assert_eq!(timer.stop(), Duration::ZERO);
        assert!(timer.total_ms() >= 5.0);
    }

    #[test]
    fn test_benchmark_fn_returns_last_result() {
        let mut calls = 0;
        let (last, stats) = benchmark_fn(2, 5, || {
            calls += 1;
            calls
        });
        assert_eq!(last, Some(7));
        assert_eq!(stats.unwrap().runs, 5);
    }

    #[test]
    fn test_benchmark_fn_without_iterations() {
        let (last, stats) = benchmark_fn(0, 0, || 1);
        assert!(last.is_none());
        assert!(stats.is_none());
    }

    #[test]
    fn test_benchmark_stats() {
        let stats = BenchmarkStats::from_times(vec![5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();

        assert!((stats.mean_ms - 3.0).abs() < 1e-12);
        assert_eq!(stats.median_ms, 3.0);
        assert_eq!(stats.min_ms, 1.0);
        assert_eq!(stats.max_ms, 5.0);
        assert_eq!(stats.p95_ms, 5.0);
    }
}
