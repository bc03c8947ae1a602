pub mod autocorrelation;
pub mod results;
mod stats;

pub use autocorrelation::{autocorrelation, sokal_tau};
pub use results::{ObservableSeries, SizeScan, TemperatureResult, TemperatureSweep};
pub use stats::{heat_capacity, Statistics};
