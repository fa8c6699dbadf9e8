// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! spritecap - video frames to sprite sheets
//!
//! A cross-platform desktop tool for capturing keyframes from a video,
//! previewing them as an animation, and exporting PNG sprite sheets.

mod app;
mod audio;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::SpritecapApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("spritecap"),
        ..Default::default()
    };

    eframe::run_native(
        "spritecap",
        options,
        Box::new(|_cc| Ok(Box::new(SpritecapApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
