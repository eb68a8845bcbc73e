mod clock;
pub mod data;
pub mod event;
pub mod thread;

pub use clock::{DEFAULT_TICK_PERIOD, MIN_TICK_PERIOD};
pub use data::{ActionData, ThreadControl, ThreadData};
pub use event::{ThreadEvent, ThreadEvents};
pub use thread::{Waker, WindowUpdateThread};
