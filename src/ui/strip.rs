// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Horizontal strip of captured keyframes.

use super::TextureSet;

const STRIP_HEIGHT: f32 = 90.0;

/// Result of strip interaction.
pub enum StripAction {
    None,
    SetImpact(usize),
    Delete(usize),
}

/// Display `count` thumbnails in capture order.
pub fn show(
    ui: &mut egui::Ui,
    textures: &TextureSet,
    count: usize,
    impact: Option<usize>,
    scroll_to_end: bool,
) -> StripAction {
    let mut action = StripAction::None;

    if count == 0 {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(egui::RichText::new("◇ No frames yet").color(egui::Color32::from_gray(180)));
            ui.label(egui::RichText::new("Capture frames from the video above").weak());
        });
        return action;
    }

    let mut scroll = egui::ScrollArea::horizontal().auto_shrink([false, true]);
    if scroll_to_end {
        scroll = scroll.horizontal_scroll_offset(f32::MAX);
    }

    scroll.show(ui, |ui| {
        ui.horizontal(|ui| {
            for index in 0..count {
                let Some(texture) = textures.get(index) else {
                    continue;
                };
                let is_impact = impact == Some(index);
                let stroke = if is_impact {
                    egui::Stroke::new(3.0, egui::Color32::from_rgb(255, 80, 160))
                } else {
                    egui::Stroke::new(1.0, egui::Color32::from_gray(90))
                };

                egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(format!("{}", index + 1)).monospace());
                            if ui.small_button("×").on_hover_text("Delete frame").clicked() {
                                action = StripAction::Delete(index);
                            }
                        });
                        let size = super::scaled_to_height(texture, STRIP_HEIGHT);
                        let response = ui
                            .add(
                                egui::Image::new(egui::load::SizedTexture::new(texture.id(), size))
                                    .sense(egui::Sense::click()),
                            )
                            .on_hover_text("Set as impact frame");
                        if response.clicked() {
                            action = StripAction::SetImpact(index);
                        }
                    });
                });
            }
        });
    });

    action
}
