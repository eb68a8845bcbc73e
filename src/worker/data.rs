use crate::error::ActionError;

/// Flags shared between a worker loop and the action it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadControl {
    should_update: bool,
    finished: bool,
}

impl Default for ThreadControl {
    fn default() -> Self {
        Self {
            should_update: true,
            finished: false,
        }
    }
}

impl ThreadControl {
    /// Ask the loop to notify the UI after this tick.
    pub fn request_update(&mut self) {
        self.should_update = true;
    }

    /// End the loop after this tick.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn should_update(&self) -> bool {
        self.should_update
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns whether an update was pending, clearing it.
    pub(crate) fn take_update(&mut self) -> bool {
        std::mem::replace(&mut self.should_update, false)
    }
}

/// State that lives for the whole run of a worker, along with the action the
/// worker performs on every tick.
///
/// Notifications carry a clone of the data, so the UI sees a consistent
/// snapshot while the worker keeps mutating its own copy.
#[async_trait::async_trait]
pub trait ThreadData: Clone + Send + 'static {
    /// Initialize per-run state. Called on the worker before the first tick.
    fn set_locals(&mut self) {}

    /// One tick of work. Call [`ThreadControl::request_update`] to have the UI
    /// notified, or [`ThreadControl::finish`] to stop the worker.
    async fn run_action(&mut self, control: &mut ThreadControl) -> Result<(), ActionError>;
}

/// A [`ThreadData`] whose action is a plain closure.
///
/// Every tick runs the closure and then requests an update.
#[derive(Clone)]
pub struct ActionData<F> {
    action: F,
}

impl<F> ActionData<F>
where
    F: FnMut() -> Result<(), ActionError> + Clone + Send + 'static,
{
    pub fn new(action: F) -> Self {
        Self { action }
    }
}

#[async_trait::async_trait]
impl<F> ThreadData for ActionData<F>
where
    F: FnMut() -> Result<(), ActionError> + Clone + Send + 'static,
{
    async fn run_action(&mut self, control: &mut ThreadControl) -> Result<(), ActionError> {
        (self.action)()?;
        control.request_update();
        Ok(())
    }
}
