use std::time::Duration;

/// Format a millisecond count as `HHH:MM:SS.mmm`.
///
/// Every field is floored. Hours keep growing past three digits; negative and
/// non-finite inputs read as zero.
pub fn time_display(time_in_ms: f64) -> String {
    let total_ms = if time_in_ms.is_finite() && time_in_ms > 0.0 {
        time_in_ms.floor() as u64
    } else {
        0
    };

    let millisecond = total_ms % 1000;
    let total_seconds = total_ms / 1000;
    let second = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minute = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:03}:{minute:02}:{second:02}.{millisecond:03}")
}

pub fn format_elapsed(elapsed: Duration) -> String {
    time_display(elapsed.as_secs_f64() * 1000.0)
}
