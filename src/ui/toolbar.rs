// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tab selection UI.
//!
//! This module provides the toolbar for switching between the keyframe,
//! slot and card tools.

use crate::app::Tab;

/// Display the toolbar with tab selection buttons.
pub fn show(ui: &mut egui::Ui, current_tab: &mut Tab) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        if ui.selectable_label(*current_tab == Tab::Keyframes, "◆ Keyframes").clicked() {
            *current_tab = Tab::Keyframes;
        }

        if ui.selectable_label(*current_tab == Tab::Slots, "▦ Slots").clicked() {
            *current_tab = Tab::Slots;
        }

        if ui.selectable_label(*current_tab == Tab::Cards, "🂠 Cards").clicked() {
            *current_tab = Tab::Cards;
        }

        ui.separator();

        // Key hints
        let hint_text = match current_tab {
            Tab::Keyframes => "←/→ step · ↑/Enter capture · ↓ start/end range · click a frame to set impact",
            Tab::Slots => "←/→ step · Space/Enter fill next slot · Delete unslot · drag frames onto slots",
            Tab::Cards => "Drop images here or use Add Images… · name-50%.png sets a 50% weight",
        };

        ui.label(egui::RichText::new(hint_text).italics().weak());
    });
}
