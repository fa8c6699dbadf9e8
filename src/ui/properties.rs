// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyframe session panel.
//!
//! Shows frame counters, the range indicator and preview rate, and offers
//! capture, preview, export and reset controls.

use crate::models::preview::{MAX_PREVIEW_FPS, MIN_PREVIEW_FPS};

/// State the panel displays.
pub struct KeyframeSummary {
    pub frame_count: usize,
    pub impact: Option<usize>,
    pub range_count: Option<usize>,
    pub fps: u32,
    pub previewing: bool,
    /// Video loaded and no capture in flight
    pub ready: bool,
}

/// Result of panel interaction.
pub enum PropertiesAction {
    None,
    CaptureSingle,
    ToggleRange,
    TogglePreview,
    SetFps(u32),
    Export,
    Reset,
}

/// `"N frame"` / `"N frames"`.
pub fn frame_count_label(count: usize) -> String {
    format!("{} frame{}", count, if count == 1 { "" } else { "s" })
}

/// Display the panel and return the requested action.
pub fn show(ui: &mut egui::Ui, summary: &KeyframeSummary) -> PropertiesAction {
    let mut action = PropertiesAction::None;
    let has_frames = summary.frame_count > 0;

    ui.heading("Keyframes");
    ui.separator();

    ui.label(egui::RichText::new(frame_count_label(summary.frame_count)).strong());
    match summary.impact {
        Some(i) => ui.label(format!("Impact frame: #{}", i + 1)),
        None => ui.label(egui::RichText::new("No impact frame").weak()),
    };

    if let Some(count) = summary.range_count {
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(format!("◉ RANGE MODE ACTIVE · {} selected", frame_count_label(count)))
                .color(egui::Color32::from_rgb(255, 80, 160)),
        );
    }

    ui.add_space(8.0);
    ui.add_enabled_ui(summary.ready && !summary.previewing, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Capture").clicked() {
                action = PropertiesAction::CaptureSingle;
            }
            let range_label = if summary.range_count.is_some() { "End Range" } else { "Start Range" };
            if ui.button(range_label).clicked() {
                action = PropertiesAction::ToggleRange;
            }
        });
    });

    ui.separator();
    ui.label("Preview");

    let mut fps = summary.fps;
    if ui
        .add(egui::Slider::new(&mut fps, MIN_PREVIEW_FPS..=MAX_PREVIEW_FPS).suffix(" FPS"))
        .changed()
    {
        action = PropertiesAction::SetFps(fps);
    }

    let preview_label = if summary.previewing { "◼ Back to Video" } else { "▶ Preview Animation" };
    if ui
        .add_enabled(has_frames && summary.ready, egui::Button::new(preview_label))
        .clicked()
    {
        action = PropertiesAction::TogglePreview;
    }

    ui.separator();

    let export_label = if summary.frame_count == 1 { "↓ Save Screenshot" } else { "↓ Generate PNG" };
    if ui.add_enabled(has_frames, egui::Button::new(export_label)).clicked() {
        action = PropertiesAction::Export;
    }

    ui.add_space(8.0);
    if ui.add_enabled(summary.ready, egui::Button::new("Reset")).clicked() {
        action = PropertiesAction::Reset;
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_label() {
        assert_eq!(frame_count_label(0), "0 frames");
        assert_eq!(frame_count_label(1), "1 frame");
        assert_eq!(frame_count_label(12), "12 frames");
    }
}
