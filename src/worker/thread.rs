use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};

use crate::{
    error::WorkerError,
    worker::{
        ThreadData,
        clock::{Clock, DEFAULT_TICK_PERIOD, MIN_TICK_PERIOD},
        data::ThreadControl,
        event::{self, EventSender, ThreadEvents},
    },
};

/// Callback run after every notification, typically to schedule a repaint.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// A background worker for the UI.
///
/// The worker owns its [`ThreadData`] from [`start`](Self::start) until it
/// exits, runs the data's action once per tick, and reports
/// [`ThreadEvent`](crate::worker::ThreadEvent)s on a channel that the UI
/// thread drains at its own pace.
/// A worker runs at most once; build a new one to run again.
///
/// Dropping a `WindowUpdateThread` aborts the worker.
pub struct WindowUpdateThread<D: ThreadData> {
    data: Option<D>,
    runtime: Handle,
    tick_period: Duration,
    abort: Arc<AtomicBool>,
    event_sender: Option<EventSender<D>>,
    event_receiver: ThreadEvents<D>,
    waker: Option<Waker>,
    handle: Option<JoinHandle<Result<D, WorkerError>>>,
}

impl<D: ThreadData> WindowUpdateThread<D> {
    pub fn new(data: D, runtime: Handle) -> Self {
        let (event_sender, event_receiver) = event::channel();
        Self {
            data: Some(data),
            runtime,
            tick_period: DEFAULT_TICK_PERIOD,
            abort: Arc::new(AtomicBool::new(false)),
            event_sender: Some(event_sender),
            event_receiver,
            waker: None,
            handle: None,
        }
    }

    /// A zero period is raised to the shortest tick the clock supports.
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period.max(MIN_TICK_PERIOD);
        self
    }

    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }

    pub fn events(&self) -> &ThreadEvents<D> {
        &self.event_receiver
    }

    /// Another handle on the same queue, usable after the thread is joined or
    /// dropped. It competes with [`events`](Self::events) for notifications
    /// rather than receiving copies.
    pub fn receiver(&self) -> ThreadEvents<D> {
        self.event_receiver.clone()
    }

    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn start(&mut self) -> Result<(), WorkerError> {
        let (data, event_sender) = match (self.data.take(), self.event_sender.take()) {
            (Some(data), Some(sender)) => (data, sender),
            _ => return Err(WorkerError::AlreadyStarted),
        };

        let worker = Worker {
            data,
            control: ThreadControl::default(),
            tick_period: self.tick_period,
            abort: self.abort.clone(),
            event_sender,
            waker: self.waker.clone(),
        };
        self.handle = Some(self.runtime.spawn(worker.run()));
        Ok(())
    }

    /// Stop the worker at the top of its next iteration.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    /// Wait for the worker to exit and take back its data.
    pub async fn join(mut self) -> Result<D, WorkerError> {
        let handle = self.handle.take().ok_or(WorkerError::NotStarted)?;
        handle.await?
    }
}

impl<D: ThreadData> Drop for WindowUpdateThread<D> {
    fn drop(&mut self) {
        self.abort();
    }
}

struct Worker<D: ThreadData> {
    data: D,
    control: ThreadControl,
    tick_period: Duration,
    abort: Arc<AtomicBool>,
    event_sender: EventSender<D>,
    waker: Option<Waker>,
}

impl<D: ThreadData> Worker<D> {
    async fn run(mut self) -> Result<D, WorkerError> {
        self.data.set_locals();
        self.event_sender.started(self.data.clone());
        self.wake();
        tracing::debug!(period = ?self.tick_period, "worker started");

        let mut clock = Clock::new(self.tick_period);
        let mut outcome = Ok(());
        while !self.abort.load(Ordering::Acquire) && !self.control.is_finished() {
            clock.tick().await;
            if let Err(err) = self.data.run_action(&mut self.control).await {
                tracing::error!("worker action failed: {err}");
                outcome = Err(WorkerError::Action(err));
                break;
            }
            if self.control.take_update() {
                self.event_sender.update(self.data.clone());
                self.wake();
            }
        }

        self.event_sender.finished(self.data.clone());
        self.wake();
        tracing::debug!(
            aborted = self.abort.load(Ordering::Acquire),
            finished = self.control.is_finished(),
            "worker finished"
        );
        outcome.map(|()| self.data)
    }

    fn wake(&self) {
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}
