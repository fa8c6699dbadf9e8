// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Card collection panel.

use crate::models::card::CardMeta;

const CARD_THUMB_HEIGHT: f32 = 96.0;

/// Result of card panel interaction.
pub enum CardAction {
    None,
    AddFiles,
    Remove(String),
    Clear,
}

/// `"50%"`, `"12.5%"` or `"unweighted"`.
pub fn weight_label(weight: Option<f64>) -> String {
    match weight {
        Some(w) if w.fract() == 0.0 => format!("{}%", w as i64),
        Some(w) => format!("{}%", w),
        None => "unweighted".to_string(),
    }
}

/// Display the cards with their thumbnails.
pub fn show(ui: &mut egui::Ui, cards: &[CardMeta], thumbnails: &[Option<egui::TextureHandle>]) -> CardAction {
    let mut action = CardAction::None;

    ui.horizontal(|ui| {
        ui.heading("Cards");
        ui.label(format!("({})", cards.len()));
        if ui.button("Add Images…").clicked() {
            action = CardAction::AddFiles;
        }
        if ui.add_enabled(!cards.is_empty(), egui::Button::new("Clear")).clicked() {
            action = CardAction::Clear;
        }
    });
    ui.separator();

    if cards.is_empty() {
        ui.label(egui::RichText::new("No cards stored for this session").weak());
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (index, card) in cards.iter().enumerate() {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.vertical(|ui| {
                            match thumbnails.get(index).and_then(Option::as_ref) {
                                Some(texture) => {
                                    let size = super::scaled_to_height(texture, CARD_THUMB_HEIGHT);
                                    ui.image(egui::load::SizedTexture::new(texture.id(), size));
                                }
                                None => {
                                    ui.label(egui::RichText::new("no preview").weak());
                                }
                            }
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(&card.name).strong());
                                if ui.small_button("×").on_hover_text("Remove card").clicked() {
                                    action = CardAction::Remove(card.id.clone());
                                }
                            });
                            ui.label(egui::RichText::new(weight_label(card.weight)).small());
                        });
                    });
                }
            });
        });

    action
}
