// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bulk-extracted frame grid and the six sprite slots.
//!
//! Frames are drag sources carrying their index; slots are drop zones.

use super::TextureSet;
use crate::io::capture::Segment;
use crate::models::session::SlotSession;
use crate::models::slots::{SLOT_COUNT, SLOT_NAMES};
use crate::ui::timeline::format_time;

const GRID_THUMB_HEIGHT: f32 = 64.0;
const SLOT_THUMB_HEIGHT: f32 = 72.0;

/// Result of slot tab interaction.
pub enum SlotsAction {
    None,
    Extract(Segment),
    Drop { frame: usize, slot: usize },
    ClearSlot(usize),
    SeekTo(f64),
    Export,
    Reset,
}

/// Segment chooser shown before extraction.
pub fn show_extract_controls(
    ui: &mut egui::Ui,
    segments: &[Segment],
    extracted: Option<Segment>,
    enabled: bool,
) -> SlotsAction {
    let mut action = SlotsAction::None;
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal_wrapped(|ui| {
            if segments.len() > 1 {
                ui.label("Segment:");
            }
            for segment in segments {
                let label = if segments.len() > 1 {
                    format!("{}–{}", format_time(segment.start), format_time(segment.end))
                } else {
                    "Extract Frames".to_string()
                };
                let selected = extracted == Some(*segment);
                if ui.selectable_label(selected, label).clicked() {
                    action = SlotsAction::Extract(*segment);
                }
            }
        });
    });
    action
}

/// Display the extracted frames and the slot row.
pub fn show(
    ui: &mut egui::Ui,
    session: &SlotSession,
    frame_textures: &TextureSet,
    slot_textures: &[Option<egui::TextureHandle>; SLOT_COUNT],
    current: Option<usize>,
) -> SlotsAction {
    let mut action = SlotsAction::None;

    // Slot row
    ui.horizontal(|ui| {
        for slot in 0..SLOT_COUNT {
            let frame = egui::Frame::group(ui.style()).inner_margin(6.0);
            let (_, payload) = ui.dnd_drop_zone::<usize, ()>(frame, |ui| {
                ui.set_min_size(egui::vec2(110.0, SLOT_THUMB_HEIGHT + 24.0));
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(SLOT_NAMES[slot]).strong());
                        if session.board.slot(slot).is_some()
                            && ui.small_button("×").on_hover_text("Clear slot").clicked()
                        {
                            action = SlotsAction::ClearSlot(slot);
                        }
                    });
                    match &slot_textures[slot] {
                        Some(texture) => {
                            let size = super::scaled_to_height(texture, SLOT_THUMB_HEIGHT);
                            ui.image(egui::load::SizedTexture::new(texture.id(), size));
                        }
                        None => {
                            ui.label(egui::RichText::new("drop a frame").weak());
                        }
                    }
                });
            });
            if let Some(frame_index) = payload {
                action = SlotsAction::Drop {
                    frame: *frame_index,
                    slot,
                };
            }
        }
    });

    let complete = session.board.is_complete();
    ui.horizontal(|ui| {
        ui.label(format!("{}/{} slots filled", session.board.filled_count(), SLOT_COUNT));
        if ui
            .add_enabled(complete, egui::Button::new("↓ Export 2×3 Sheet"))
            .clicked()
        {
            action = SlotsAction::Export;
        }
        if ui
            .add_enabled(!session.board.frames().is_empty(), egui::Button::new("Reset"))
            .clicked()
        {
            action = SlotsAction::Reset;
        }
    });

    ui.separator();

    let frames = session.board.frames();
    if frames.is_empty() {
        ui.label(egui::RichText::new("No frames extracted yet").weak());
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (index, extracted) in frames.iter().enumerate() {
                    let Some(texture) = frame_textures.get(index) else {
                        continue;
                    };
                    let id = egui::Id::new(("extracted_frame", index));
                    let is_current = current == Some(index);

                    let clicked = ui
                        .dnd_drag_source(id, index, |ui| {
                            let stroke = if is_current {
                                egui::Stroke::new(2.0, egui::Color32::from_rgb(80, 220, 255))
                            } else {
                                egui::Stroke::new(1.0, egui::Color32::from_gray(70))
                            };
                            egui::Frame::none()
                                .stroke(stroke)
                                .inner_margin(2.0)
                                .show(ui, |ui| {
                                    ui.vertical(|ui| {
                                        let size = super::scaled_to_height(texture, GRID_THUMB_HEIGHT);
                                        let image = ui.add(
                                            egui::Image::new(egui::load::SizedTexture::new(texture.id(), size))
                                                .sense(egui::Sense::click()),
                                        );
                                        let badge = match extracted.slot() {
                                            Some(slot) => format!(
                                                "{} · S{}",
                                                format_time(extracted.frame.time),
                                                slot + 1
                                            ),
                                            None => format_time(extracted.frame.time),
                                        };
                                        ui.label(egui::RichText::new(badge).small());
                                        image.clicked()
                                    })
                                    .inner
                                })
                                .inner
                        })
                        .inner;

                    if clicked {
                        action = SlotsAction::SeekTo(extracted.frame.time);
                    }
                }
            });
        });

    action
}
