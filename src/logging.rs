use std::io::Write;

use env_logger::{Builder, Env, Target};

/// Install the stdout logger. `RUST_LOG` wins over `default_filter`.
///
/// Lines look like `2026-10-16T09:12:44.123Z [stopwatch::stopwatch::controller] [DEBUG] -> stop called`.
pub fn init(default_filter: &str) {
    let result = builder(default_filter).try_init();
    if let Err(err) = result {
        tracing::warn!("logger already initialized: {err}");
    }
}

fn builder(default_filter: &str) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.target(Target::Stdout).format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] [{}] -> {}",
            buf.timestamp_millis(),
            record.target(),
            record.level(),
            record.args()
        )
    });
    builder
}
