// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! This module provides the timeline scrubber for navigating through the
//! video and selecting the position to capture.

/// Result of timeline interaction.
pub enum TimelineAction {
    None,
    Seek(f64),
    TogglePlay,
}

/// Display play/pause, the position slider and the time readout.
pub fn show(ui: &mut egui::Ui, position: f64, duration: f64, playing: bool, enabled: bool) -> TimelineAction {
    let mut action = TimelineAction::None;

    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            let label = if playing { "⏸" } else { "▶" };
            if ui.button(label).clicked() {
                action = TimelineAction::TogglePlay;
            }

            let mut scrub = position;
            let slider_width = (ui.available_width() - 140.0).max(80.0);
            ui.spacing_mut().slider_width = slider_width;
            let response = ui.add(
                egui::Slider::new(&mut scrub, 0.0..=duration.max(0.0))
                    .show_value(false)
                    .smart_aim(false),
            );
            if response.changed() {
                action = TimelineAction::Seek(scrub);
            }

            ui.monospace(format!("{} / {}", format_time(position), format_time(duration)));
        });
    });

    action
}

/// Format seconds as `m:ss.mmm`.
pub fn format_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{}:{:02}.{:03}", minutes, secs, millis)
}
