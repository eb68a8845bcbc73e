use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;

use crate::{config::StopwatchConfig, stopwatch::controller::Stopwatch};

const BUTTON_HEIGHT: f32 = 24.0;

/// Time label over a Start row and a Stop/Reset row.
pub struct TimerWidget {
    stopwatch: Stopwatch,
    font_size: f32,
}

impl TimerWidget {
    pub fn new(ctx: &egui::Context, runtime: Handle, config: &StopwatchConfig) -> Self {
        let repaint = ctx.clone();
        let stopwatch = Stopwatch::new(runtime, config.tick_period())
            .with_waker(Arc::new(move || repaint.request_repaint()));
        Self {
            stopwatch,
            font_size: config.font_size,
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.stopwatch.poll();

        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(self.stopwatch.label())
                    .font(egui::FontId::monospace(self.font_size)),
            );
        });
        ui.add_space(4.0);

        let width = ui.available_width();
        if ui
            .add_sized([width, BUTTON_HEIGHT], egui::Button::new("Start"))
            .clicked()
        {
            self.stopwatch.start();
        }

        let half = (width - ui.spacing().item_spacing.x) / 2.0;
        ui.horizontal(|ui| {
            if ui
                .add_sized([half, BUTTON_HEIGHT], egui::Button::new("Stop"))
                .clicked()
            {
                self.stopwatch.stop();
            }
            if ui
                .add_sized([half, BUTTON_HEIGHT], egui::Button::new("Reset"))
                .clicked()
            {
                self.stopwatch.reset();
            }
        });
    }
}
