/// Normalized autocorrelation function Γ(δ) of a time series for
/// `δ = 0..=max_lag`.
///
/// Lags with no overlapping pairs, and series with zero variance, report
/// `Γ(0) = 1` and `Γ(δ > 0) = 0`.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    let degenerate = |delta: usize| if delta == 0 { 1.0 } else { 0.0 };
    if n == 0 {
        return (0..=max_lag).map(degenerate).collect();
    }

    let mean = series.iter().sum::<f64>() / n as f64;
    let var = series.iter().map(|&o| (o - mean) * (o - mean)).sum::<f64>() / n as f64;

    (0..=max_lag)
        .map(|delta| {
            if delta >= n || var <= 0.0 {
                return degenerate(delta);
            }
            let count = n - delta;
            let cov = series[..count]
                .iter()
                .zip(&series[delta..])
                .map(|(&a, &b)| (a - mean) * (b - mean))
                .sum::<f64>()
                / count as f64;
            cov / var
        })
        .collect()
}

/// Integrated autocorrelation time with Sokal's automatic window `W >= 5 τ`.
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}
