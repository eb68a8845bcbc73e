use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_channel::{Receiver, RecvError, Sender, TryRecvError};

/// Lifecycle notification sent from a worker to its observer.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadEvent<D> {
    /// Locals are initialized and the loop is about to begin.
    Started(D),
    /// The action requested that the UI refresh.
    Update(D),
    /// The loop has exited, whether by abort, by finishing, or by error.
    Finished(D),
}

impl<D> ThreadEvent<D> {
    pub fn data(&self) -> &D {
        match self {
            Self::Started(data) | Self::Update(data) | Self::Finished(data) => data,
        }
    }

    pub fn into_data(self) -> D {
        match self {
            Self::Started(data) | Self::Update(data) | Self::Finished(data) => data,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// What actually travels on the channel. Updates carry no payload; the newest
/// snapshot waits in the shared slot.
enum Notice<D> {
    Started(D),
    Update,
    Finished(D),
}

type Slot<D> = Arc<Mutex<Option<D>>>;

fn lock<D>(slot: &Slot<D>) -> MutexGuard<'_, Option<D>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn channel<D>() -> (EventSender<D>, ThreadEvents<D>) {
    let (sender, receiver) = async_channel::unbounded();
    let latest = Arc::new(Mutex::new(None));
    (
        EventSender {
            sender,
            latest: latest.clone(),
        },
        ThreadEvents { receiver, latest },
    )
}

pub(crate) struct EventSender<D> {
    sender: Sender<Notice<D>>,
    latest: Slot<D>,
}

impl<D> EventSender<D> {
    pub(crate) fn started(&self, data: D) {
        self.send(Notice::Started(data));
    }

    /// Replace any update the observer has not picked up yet. At most one
    /// update marker is queued at a time.
    pub(crate) fn update(&self, data: D) {
        let was_empty = lock(&self.latest).replace(data).is_none();
        if was_empty {
            self.send(Notice::Update);
        }
    }

    pub(crate) fn finished(&self, data: D) {
        self.send(Notice::Finished(data));
    }

    fn send(&self, notice: Notice<D>) {
        // The observer may have gone away; that is not an error for the worker.
        if self.sender.try_send(notice).is_err() {
            tracing::trace!("worker event dropped, receiver closed");
        }
    }
}

/// Receiving end of a worker's notifications.
///
/// Consecutive updates collapse into one carrying the newest data, so the
/// queue stays small however long the observer goes without draining it.
/// Clones share a single queue: each notification is delivered to exactly one
/// of them, not broadcast.
pub struct ThreadEvents<D> {
    receiver: Receiver<Notice<D>>,
    latest: Slot<D>,
}

impl<D> Clone for ThreadEvents<D> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            latest: self.latest.clone(),
        }
    }
}

impl<D> ThreadEvents<D> {
    pub async fn recv(&self) -> Result<ThreadEvent<D>, RecvError> {
        loop {
            if let Some(event) = self.resolve(self.receiver.recv().await?) {
                return Ok(event);
            }
        }
    }

    pub fn try_recv(&self) -> Result<ThreadEvent<D>, TryRecvError> {
        loop {
            if let Some(event) = self.resolve(self.receiver.try_recv()?) {
                return Ok(event);
            }
        }
    }

    /// Notifications waiting to be received.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Stop listening. The worker keeps running and its notifications are
    /// discarded from now on.
    pub fn close(&self) {
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
        lock(&self.latest).take();
    }

    fn resolve(&self, notice: Notice<D>) -> Option<ThreadEvent<D>> {
        match notice {
            Notice::Started(data) => Some(ThreadEvent::Started(data)),
            Notice::Update => lock(&self.latest).take().map(ThreadEvent::Update),
            Notice::Finished(data) => Some(ThreadEvent::Finished(data)),
        }
    }
}
