/// Running accumulator for one scalar observable.
///
/// Keeps `sum(x)` and `sum(x^2)` in `f64`; moments are population moments
/// (divided by `count`, not `count - 1`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub sum: f64,
    pub sum_sq: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series(values: &[f64]) -> Self {
        let mut stats = Self::new();
        for &v in values {
            stats.update(v);
        }
        stats
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// `<x>`; zero when nothing has been recorded.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// `<x^2>`.
    pub fn mean_sq(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum_sq / self.count as f64
    }

    /// `<x^2> - <x>^2`, clamped at zero against cancellation.
    pub fn variance(&self) -> f64 {
        let m = self.mean();
        (self.mean_sq() - m * m).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Naive standard error of the mean, `std / sqrt(count)`.
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.std_dev() / (self.count as f64).sqrt()
    }
}

/// Heat capacity per spin from energy fluctuations,
/// `C = (<E^2> - <E>^2) / (T^2 * L^2)`, with `E` the total energy.
pub fn heat_capacity(energy_mean: f64, energy_sq_mean: f64, temperature: f64, side: usize) -> f64 {
    let variance = (energy_sq_mean - energy_mean * energy_mean).max(0.0);
    let n_spins = (side * side) as f64;
    variance / (temperature * temperature * n_spins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moments() {
        let s = Statistics::from_series(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean(), 2.5);
        assert_eq!(s.mean_sq(), 7.5);
        assert_eq!(s.variance(), 1.25);
        assert!((s.std_error() - 1.25f64.sqrt() / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_empty_accumulator() {
        let s = Statistics::new();
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.variance(), 0.0);
        assert_eq!(s.std_error(), 0.0);
    }

    #[test]
    fn test_constant_series_has_no_spread() {
        let s = Statistics::from_series(&[-32.0; 1000]);
        assert_eq!(s.variance(), 0.0);
        assert_eq!(s.std_error(), 0.0);
    }

    #[test]
    fn test_heat_capacity() {
        // energies -30 and -34 in equal measure: variance 4
        let c = heat_capacity(-32.0, 1028.0, 2.0, 4);
        assert_eq!(c, 4.0 / (4.0 * 16.0));
        assert_eq!(heat_capacity(-32.0, 1024.0, 2.0, 4), 0.0);
    }

    #[test]
    fn test_heat_capacity_clamps_rounding() {
        let e = -0.1 * 3.0;
        assert!(heat_capacity(e, e * e - 1e-18, 1.0, 3) >= 0.0);
    }
}
