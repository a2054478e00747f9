// Time Provider Port - microsecond wall clock, swappable in tests

/// Source of timestamps for elapsed-time measurement
pub trait TimeProvider: Send + Sync {
    /// Get current time in microseconds since epoch
    fn now_micros(&self) -> i64;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_micros(&self) -> i64 {
        chrono::Utc::now().timestamp_micros()
    }
}

/// Milliseconds between two microsecond readings
pub fn elapsed_ms(start_micros: i64, end_micros: i64) -> f64 {
    (end_micros - start_micros) as f64 / 1000.0
}

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Advances by a fixed step on every reading
    pub struct SteppingTimeProvider {
        next: AtomicI64,
        step_micros: i64,
    }

    impl SteppingTimeProvider {
        pub fn new(start_micros: i64, step_micros: i64) -> Self {
            Self {
                next: AtomicI64::new(start_micros),
                step_micros,
            }
        }
    }

    impl TimeProvider for SteppingTimeProvider {
        fn now_micros(&self) -> i64 {
            self.next.fetch_add(self.step_micros, Ordering::SeqCst)
        }
    }
}
