//! eframe integration: the main window hosting the timer widget.

use anyhow::anyhow;
use eframe::egui;
use tokio::runtime::Handle;

use crate::{config::StopwatchConfig, stopwatch::TimerWidget};

pub struct MainWindow {
    timer: TimerWidget,
}

impl MainWindow {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Handle, config: &StopwatchConfig) -> Self {
        tracing::debug!("creating main window");
        Self {
            timer: TimerWidget::new(&cc.egui_ctx, runtime, config),
        }
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| self.timer.ui(ui));
    }
}

/// Open the window and block until it is closed.
pub fn run(runtime: Handle, config: StopwatchConfig) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(MainWindow::new(cc, runtime, &config)))),
    )
    .map_err(|err| anyhow!("window event loop failed: {err}"))
}
