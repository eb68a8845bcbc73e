use std::time::Duration;

use tokio::time::Instant;

use crate::{
    error::ActionError,
    worker::{ThreadControl, ThreadData},
};

#[derive(Debug, Clone, Copy)]
struct TimerLocals {
    start: Instant,
    end: Instant,
    current: Instant,
}

/// Accumulates wall-clock time while its worker runs.
#[derive(Debug, Clone, Default)]
pub struct TimerThreadData {
    /// Time already on the clock when the worker started.
    offset: Duration,
    pub time_passed: Duration,
    locals: Option<TimerLocals>,
}

impl TimerThreadData {
    /// A timer that resumes counting from `time_passed`.
    pub fn new(time_passed: Duration) -> Self {
        Self {
            offset: time_passed,
            time_passed,
            locals: None,
        }
    }
}

#[async_trait::async_trait]
impl ThreadData for TimerThreadData {
    fn set_locals(&mut self) {
        let now = Instant::now();
        self.offset = self.time_passed;
        self.locals = Some(TimerLocals {
            start: now,
            end: now,
            current: now,
        });
    }

    async fn run_action(&mut self, control: &mut ThreadControl) -> Result<(), ActionError> {
        let locals = self.locals.get_or_insert_with(|| {
            let now = Instant::now();
            TimerLocals {
                start: now,
                end: now,
                current: now,
            }
        });

        locals.current = Instant::now();
        if locals.current != locals.end {
            locals.end = locals.current;
            self.time_passed = self.offset + (locals.end - locals.start);
            control.request_update();
        }
        Ok(())
    }
}
