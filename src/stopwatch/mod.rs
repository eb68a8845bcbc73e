pub mod controller;
pub mod data;
pub mod display;
pub mod widget;

pub use controller::Stopwatch;
pub use data::TimerThreadData;
pub use display::{format_elapsed, time_display};
pub use widget::TimerWidget;
