use std::time::Duration;
use tokio::time::Instant;
use tokio::time::{Interval, MissedTickBehavior, interval_at};

/// Default worker tick: sixty times per second.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Shortest tick the clock runs at; `Interval` rejects a zero period.
pub const MIN_TICK_PERIOD: Duration = Duration::from_nanos(1);

pub(crate) struct Clock {
    inner: Interval,
}

impl Clock {
    /// The first tick completes one full period after creation.
    pub(crate) fn new(period: Duration) -> Self {
        let period = period.max(MIN_TICK_PERIOD);
        let mut inner = interval_at(Instant::now() + period, period);
        inner.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { inner }
    }

    pub(crate) async fn tick(&mut self) {
        self.inner.tick().await;
    }
}
