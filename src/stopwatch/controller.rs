use std::time::Duration;

use async_channel::TryRecvError;
use tokio::runtime::Handle;

use crate::{
    stopwatch::{data::TimerThreadData, display::format_elapsed},
    worker::{ThreadEvent, Waker, WindowUpdateThread},
};

/// UI-thread state behind the timer widget: the elapsed time, the label text,
/// and the worker that keeps both moving.
///
/// None of the methods block. Notifications are applied in [`poll`](Self::poll),
/// which the widget calls once per frame.
pub struct Stopwatch {
    runtime: Handle,
    tick_period: Duration,
    waker: Option<Waker>,
    timer_thread: WindowUpdateThread<TimerThreadData>,
    current_time: Duration,
    label: String,
}

impl Stopwatch {
    pub fn new(runtime: Handle, tick_period: Duration) -> Self {
        let timer_thread = Self::build_thread(&runtime, tick_period, None, Duration::ZERO);
        Self {
            runtime,
            tick_period,
            waker: None,
            timer_thread,
            current_time: Duration::ZERO,
            label: format_elapsed(Duration::ZERO),
        }
    }

    /// Run `waker` whenever the worker has something for the UI.
    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self.rebuild_timer_thread();
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.current_time
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_running(&self) -> bool {
        self.timer_thread.is_alive()
    }

    pub fn start(&mut self) {
        if self.timer_thread.is_alive() {
            return;
        }
        if self.timer_thread.is_started() {
            // The worker exited on its own; it cannot be started again.
            self.rebuild_timer_thread();
        }
        if let Err(err) = self.timer_thread.start() {
            tracing::warn!("failed to start timer thread: {err}");
        }
    }

    pub fn stop(&mut self) {
        tracing::debug!("stop called");
        if self.timer_thread.is_alive() {
            tracing::debug!("killing timer thread...");
            self.timer_thread.abort();
            self.poll();
            self.timer_thread.events().close();
            self.rebuild_timer_thread();
        }
    }

    pub fn reset(&mut self) {
        tracing::debug!("reset clicked");
        self.stop();
        self.current_time = Duration::ZERO;
        self.label = format_elapsed(Duration::ZERO);
        self.rebuild_timer_thread();
    }

    /// Apply every notification the worker has delivered so far.
    pub fn poll(&mut self) {
        loop {
            match self.timer_thread.events().try_recv() {
                Ok(ThreadEvent::Update(data)) => self.update_timer(&data),
                Ok(ThreadEvent::Started(data)) => {
                    tracing::debug!(elapsed = ?data.time_passed, "timer started");
                }
                Ok(ThreadEvent::Finished(data)) => {
                    tracing::debug!(elapsed = ?data.time_passed, "timer finished");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    fn update_timer(&mut self, data: &TimerThreadData) {
        self.current_time = data.time_passed;
        self.label = format_elapsed(self.current_time);
    }

    fn rebuild_timer_thread(&mut self) {
        self.timer_thread = Self::build_thread(
            &self.runtime,
            self.tick_period,
            self.waker.clone(),
            self.current_time,
        );
    }

    fn build_thread(
        runtime: &Handle,
        tick_period: Duration,
        waker: Option<Waker>,
        time_passed: Duration,
    ) -> WindowUpdateThread<TimerThreadData> {
        let thread = WindowUpdateThread::new(TimerThreadData::new(time_passed), runtime.clone())
            .with_tick_period(tick_period);
        match waker {
            Some(waker) => thread.with_waker(waker),
            None => thread,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use super::*;
    use crate::worker::DEFAULT_TICK_PERIOD;

    const TICK: Duration = Duration::from_millis(10);

    async fn run_for(stopwatch: &mut Stopwatch, duration: Duration) {
        tokio::time::sleep(duration).await;
        // Let the worker deliver the tick that lands on the deadline.
        tokio::task::yield_now().await;
        stopwatch.poll();
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_stopwatch_is_idle_at_zero() {
        let stopwatch = Stopwatch::new(Handle::current(), DEFAULT_TICK_PERIOD);
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
        assert_eq!(stopwatch.label(), "000:00:00.000");
        assert!(!stopwatch.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_counts_up() {
        let mut stopwatch = Stopwatch::new(Handle::current(), TICK);
        stopwatch.start();
        assert!(stopwatch.is_running());

        run_for(&mut stopwatch, Duration::from_millis(1_500)).await;

        let elapsed = stopwatch.elapsed();
        assert!(elapsed >= Duration::from_millis(1_400), "{elapsed:?}");
        assert!(elapsed <= Duration::from_millis(1_500), "{elapsed:?}");
        assert_eq!(stopwatch.label(), format_elapsed(elapsed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_running_is_ignored() {
        let mut stopwatch = Stopwatch::new(Handle::current(), TICK);
        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(200)).await;
        let before = stopwatch.elapsed();

        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(200)).await;
        assert!(stopwatch.elapsed() > before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_and_start_resumes() {
        let mut stopwatch = Stopwatch::new(Handle::current(), TICK);
        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(500)).await;

        stopwatch.stop();
        assert!(!stopwatch.is_running());
        let frozen = stopwatch.elapsed();
        assert!(frozen > Duration::ZERO);

        run_for(&mut stopwatch, Duration::from_secs(5)).await;
        assert_eq!(stopwatch.elapsed(), frozen);
        assert_eq!(stopwatch.label(), format_elapsed(frozen));

        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(500)).await;
        let resumed = stopwatch.elapsed();
        assert!(resumed > frozen);
        assert!(resumed <= frozen + Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_when_idle_is_noop() {
        let mut stopwatch = Stopwatch::new(Handle::current(), TICK);
        stopwatch.stop();
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
        assert!(!stopwatch.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_running_timer() {
        let mut stopwatch = Stopwatch::new(Handle::current(), TICK);
        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(800)).await;

        stopwatch.reset();
        assert!(!stopwatch.is_running());
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
        assert_eq!(stopwatch.label(), "000:00:00.000");

        run_for(&mut stopwatch, Duration::from_secs(1)).await;
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);

        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(300)).await;
        assert!(stopwatch.elapsed() <= Duration::from_millis(300));
        assert!(stopwatch.elapsed() > Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_stop() {
        let mut stopwatch = Stopwatch::new(Handle::current(), TICK);
        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(300)).await;
        stopwatch.stop();

        stopwatch.reset();
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
        assert_eq!(stopwatch.label(), "000:00:00.000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waker_is_invoked_while_running() {
        let wakes = Arc::new(AtomicU64::new(0));
        let counter = wakes.clone();
        let mut stopwatch =
            Stopwatch::new(Handle::current(), TICK).with_waker(Arc::new(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            }));
        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(100)).await;

        let woken = wakes.load(Ordering::Relaxed);
        assert!(woken >= 2);

        stopwatch.reset();
        stopwatch.start();
        run_for(&mut stopwatch, Duration::from_millis(100)).await;
        assert!(wakes.load(Ordering::Relaxed) > woken);
    }
}
