// Hides the console window on Windows in release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use stopwatch::{StopwatchConfig, app, logging};

fn main() -> anyhow::Result<()> {
    let config = StopwatchConfig::from_env().context("reading configuration")?;
    logging::init(&config.log_filter);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("stopwatch-worker")
        .enable_time()
        .build()
        .context("building worker runtime")?;

    tracing::debug!(?config, "starting");
    app::run(runtime.handle().clone(), config)
}
