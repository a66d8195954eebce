use crate::utils::error::Result;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn canvas_width(&self) -> f64;
    fn canvas_height(&self) -> f64;
    fn margin(&self) -> f64;
    fn transition_delay(&self) -> Duration;
    /// Fixed seed for reproducible layouts; `None` uses the thread RNG.
    fn seed(&self) -> Option<u64>;
}

/// Source of uniform samples for the position generator.
pub trait RandomSource {
    /// Next sample, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
