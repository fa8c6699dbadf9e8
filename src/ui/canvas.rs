// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display canvas for the video picture and the animation preview.
//!
//! The picture is scaled to fit the available area while keeping its aspect
//! ratio, and centered.

use crate::util::geometry::fit_size;

/// What the canvas should show.
pub enum CanvasContent<'a> {
    /// A picture with its native size
    Picture(&'a egui::TextureHandle, (u32, u32)),
    /// Nothing loaded yet
    Welcome,
    /// A long-running capture is in progress
    Busy(&'a str),
}

/// Display the canvas, reserving `height` points.
pub fn show(ui: &mut egui::Ui, content: CanvasContent<'_>, height: f32, highlight: bool) {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);
    let available = egui::vec2(ui.available_width(), height);

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available);
        ui.set_max_height(available.y);

        match content {
            CanvasContent::Picture(texture, (img_width, img_height)) => {
                let (display_width, display_height) =
                    fit_size(img_width, img_height, available.x, available.y);

                // Center the picture
                let x_offset = (available.x - display_width) / 2.0;
                let y_offset = (available.y - display_height) / 2.0;
                let image_rect = egui::Rect::from_min_size(
                    ui.min_rect().min + egui::vec2(x_offset, y_offset),
                    egui::vec2(display_width, display_height),
                );

                let painter = ui.painter();
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                if highlight {
                    painter.rect_stroke(
                        image_rect,
                        0.0,
                        egui::Stroke::new(3.0, egui::Color32::from_rgb(255, 80, 160)),
                    );
                }
            }
            CanvasContent::Busy(message) => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
            }
            CanvasContent::Welcome => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.heading(
                            egui::RichText::new("spritecap")
                                .size(32.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                        ui.label(
                            egui::RichText::new("Video frames to sprite sheets")
                                .size(14.0)
                                .color(egui::Color32::from_gray(150)),
                        );
                        ui.add_space(20.0);
                        ui.label(
                            egui::RichText::new("Open or drop a video to begin")
                                .color(egui::Color32::from_gray(180)),
                        );
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new("File → Open Video... / Open Frame Folder...")
                                .weak()
                                .color(egui::Color32::from_gray(130)),
                        );
                    });
                });
            }
        }
    });
}
